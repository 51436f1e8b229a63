use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerruxError {
    #[error("Artifact error ({path}): {message}")]
    Artifact { path: String, message: String },

    #[error("Malformed feature list: {0}")]
    Catalog(String),

    #[error("Shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {field}: {value}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("Model evaluation error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerruxError {
    pub fn artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by the request rather than the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            VerruxError::InvalidInput(_) | VerruxError::UnknownCategory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VerruxError>;

// ── HTTP mapping ─────────────────────────────────────────────────────────────

/// Error returned by the JSON API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VerruxError> for ApiError {
    fn from(err: VerruxError) -> Self {
        if err.is_client_error() {
            ApiError::Unprocessable(err.to_string())
        } else {
            tracing::error!("Request failed: {err}");
            ApiError::Internal(err.to_string())
        }
    }
}

/// Well-formed JSON with the wrong shape or out-of-range values is a 422,
/// anything that is not JSON at all is a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::Unprocessable(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_client_error() {
        let err = VerruxError::UnknownCategory {
            field: "lesion type",
            value: "Ringworm".to_string(),
        };
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Unknown lesion type: Ringworm");
        assert!(matches!(ApiError::from(err), ApiError::Unprocessable(_)));
    }

    #[test]
    fn test_shape_mismatch_maps_to_internal() {
        let err = VerruxError::ShapeMismatch { expected: 9, actual: 7 };
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.to_string().contains("expected 9"));
    }
}
