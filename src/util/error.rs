use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use super::response::{ApiResponse, ResponseBuilder};
use super::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BusinessError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcomes a caller can act on. Everything else collapses into a generic
/// internal failure so no storage detail leaks to clients.
#[derive(Debug, Error)]
pub enum BusinessError {
    #[error("Validation failed")]
    Validation(Vec<ValidationField>),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Record not found")]
    NotFound,
}

impl BusinessError {
    fn code(&self) -> i32 {
        match self {
            BusinessError::Validation(_) => 4001,
            BusinessError::InvalidCredentials => 4011,
            BusinessError::NotFound => 4041,
        }
    }
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Database failure")]
    Database,
    #[error("Unknown error")]
    Unknown,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationField {
    pub field: String,
    pub message: String,
}

/// Flattens accumulated form errors for the response envelope. Fields are
/// sorted by name so the payload is deterministic; per-field message order
/// is preserved.
pub fn validation_fields(errors: &FieldErrors) -> Vec<ValidationField> {
    let mut fields: Vec<ValidationField> = errors
        .iter()
        .flat_map(|(field, messages)| {
            messages.iter().map(move |message| ValidationField {
                field: field.to_string(),
                message: message.clone(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Business(business) => match business {
                BusinessError::Validation(fields) => {
                    let mut body: ApiResponse<Vec<ValidationField>> = ApiResponse::failure(
                        business.code(),
                        business.to_string(),
                        ResponseBuilder::current_trace_id(),
                    );
                    body.data = Some(fields.clone());
                    HttpResponse::Ok().json(body)
                }
                other => HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::failure(
                    other.code(),
                    other.to_string(),
                    ResponseBuilder::current_trace_id(),
                )),
            },
            AppError::Internal(_) | AppError::Io(_) => {
                HttpResponse::Ok().json(ApiResponse::<serde_json::Value>::failure(
                    5000,
                    "Internal server error",
                    ResponseBuilder::current_trace_id(),
                ))
            }
        }
    }
}
