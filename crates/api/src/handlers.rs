use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use course_core::CoursePlan;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use services::GenerationService;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub slug: Option<String>,
}

impl GenerateRequest {
    /// Parse a request body regardless of its declared content type.
    ///
    /// A `slug` that is absent or not a string is treated as missing.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the body is not JSON.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let slug = value
            .get("slug")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { slug })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub plan: CoursePlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroupBody {
    pub group: String,
    pub options: Vec<TopicOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOption {
    pub value: String,
    pub label: String,
}

/// `POST /api/generate`
pub async fn generate(
    State(service): State<Arc<GenerationService>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request = GenerateRequest::from_body(&body).map_err(|err| {
        warn!(error = %err, "rejected generation request body");
        ApiError::from(err)
    })?;

    let plan = service.generate(request.slug.as_deref()).await?;
    Ok(Json(GenerateResponse { plan }))
}

/// `GET /api/topics`
pub async fn topics(State(service): State<Arc<GenerationService>>) -> Json<Vec<TopicGroupBody>> {
    let groups = service
        .catalog()
        .groups()
        .into_iter()
        .map(|group| TopicGroupBody {
            group: group.category.to_string(),
            options: group
                .topics
                .iter()
                .map(|topic| TopicOption {
                    value: topic.id().to_string(),
                    label: topic.label().to_string(),
                })
                .collect(),
        })
        .collect();
    Json(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_slug_is_kept() {
        let request = GenerateRequest::from_body(br#"{"slug":"html"}"#).unwrap();
        assert_eq!(request.slug.as_deref(), Some("html"));
    }

    #[test]
    fn non_string_slug_is_missing() {
        for body in [&br#"{"slug":5}"#[..], br#"{"slug":null}"#, b"{}", b"[1,2]", br#""html""#] {
            assert_eq!(GenerateRequest::from_body(body).unwrap().slug, None);
        }
    }

    #[test]
    fn non_json_body_is_an_error() {
        assert!(GenerateRequest::from_body(b"not json").is_err());
        assert!(GenerateRequest::from_body(b"").is_err());
    }
}
