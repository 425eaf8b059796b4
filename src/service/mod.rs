pub mod auth;
pub mod snippet;

pub use auth::AuthService;
pub use snippet::SnippetService;
