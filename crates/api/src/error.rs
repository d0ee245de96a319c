use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use services::GenerateError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("Requête invalide : {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_topic_is_bad_request() {
        let err = ApiError::from(GenerateError::UnknownTopic);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Sujet inconnu");
    }

    #[test]
    fn server_side_failures_are_internal_errors() {
        for err in [
            GenerateError::MissingCredential,
            GenerateError::Upstream("boom".into()),
            GenerateError::EmptyReply,
            GenerateError::InvalidJson,
            GenerateError::Transport("connection refused".into()),
        ] {
            assert_eq!(
                ApiError::from(err).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
