pub mod auth;
pub mod snippet;

pub use auth::AuthController;
pub use snippet::SnippetController;
