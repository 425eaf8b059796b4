pub mod error;
pub mod password;
pub mod response;
pub mod validation;

pub use error::{AppError, BusinessError, InternalError, ValidationField};
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, ResponseBuilder};
pub use validation::{FieldErrors, Form, FormData, EMAIL_REGEX};
