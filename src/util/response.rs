use actix_web::HttpResponse;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Unified JSON envelope. The HTTP status is always 200; outcomes are carried
/// by the business `code`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
    #[serde(rename = "traceId")]
    pub trace_id: String,
    pub timestamp: i64,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, trace_id: String) -> Self {
        Self {
            code: 2000,
            message: "OK".to_string(),
            data: Some(data),
            trace_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn failure(code: i32, message: impl Into<String>, trace_id: String) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            trace_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn ok<T>(data: T) -> Result<HttpResponse, crate::util::AppError>
    where
        T: Serialize,
    {
        let body = ApiResponse::success(data, Self::current_trace_id());
        Ok(HttpResponse::Ok().json(body))
    }

    /// Success envelope with no payload, for operations that only signal
    /// completion.
    pub fn empty() -> Result<HttpResponse, crate::util::AppError> {
        let body = ApiResponse::<serde_json::Value> {
            code: 2000,
            message: "OK".to_string(),
            data: None,
            trace_id: Self::current_trace_id(),
            timestamp: Utc::now().timestamp_millis(),
        };
        Ok(HttpResponse::Ok().json(body))
    }

    /// Request-scoped trace id when inside the request-id middleware, a fresh
    /// UUID otherwise.
    pub(crate) fn current_trace_id() -> String {
        if let Ok(id) = REQUEST_ID.try_with(|id| id.clone()) {
            return id;
        }
        Uuid::new_v4().to_string()
    }
}

// Request-scoped id linking response envelopes to log lines.
tokio::task_local! {
    pub static REQUEST_ID: String;
}
