use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use doh_relay_domain::DomainError;
use serde_json::json;
use std::any::Any;
use tracing::{debug, error, warn};

const GENERIC_INTERNAL_ERROR: &str = "internal error";

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, self.0.to_string()),
            DomainError::NotAcceptable => (StatusCode::NOT_ACCEPTABLE, self.0.to_string()),
            DomainError::InvalidRequest(_) | DomainError::InvalidDnsMessage(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            DomainError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.0.to_string())
            }

            // Per-upstream reasons stay in the logs.
            DomainError::AllUpstreamsFailed(failures) => {
                for failure in failures {
                    debug!(upstream = %failure.upstream, reason = %failure.reason, "Upstream failure");
                }
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
            DomainError::UpstreamTimeout { .. } => (StatusCode::GATEWAY_TIMEOUT, self.0.to_string()),

            DomainError::ServiceMisconfiguration(_) | DomainError::Internal(_) => {
                error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_INTERNAL_ERROR.to_string(),
                )
            }
        };

        if status.is_client_error() {
            debug!(status = status.as_u16(), error = %self.0, "Rejected request");
        } else if status != StatusCode::INTERNAL_SERVER_ERROR {
            warn!(status = status.as_u16(), error = %self.0, "Upstream error");
        }

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        }
        response
    }
}

/// Response for a handler panic caught by `CatchPanicLayer`.
///
/// The panic message is logged and never sent to the client.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": GENERIC_INTERNAL_ERROR })),
    )
        .into_response()
}
