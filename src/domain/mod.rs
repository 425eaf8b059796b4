pub mod snippet;
pub mod user;

#[allow(unused_imports)]
pub use snippet::Snippet;
#[allow(unused_imports)]
pub use user::{HashedPassword, PasswordHashError, User};
