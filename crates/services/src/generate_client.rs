use course_core::{CoursePlan, CoursePlanDraft};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenerateClientError;

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    slug: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratePayload {
    plan: CoursePlanDraft,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

/// Client side of `POST /api/generate`.
#[derive(Clone)]
pub struct GenerateClient {
    client: Client,
    base_url: String,
}

impl GenerateClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Ask the server to generate a course for `slug`. One request, no retry.
    ///
    /// # Errors
    ///
    /// Returns `GenerateClientError::Status` for non-2xx responses, with the
    /// server's `error` message when present, `Http` for transport failures,
    /// and `Plan` when the returned plan does not validate.
    pub async fn request_plan(&self, slug: &str) -> Result<CoursePlan, GenerateClientError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .json(&GenerateBody { slug })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorPayload>(&text)
                .map(|payload| payload.error)
                .unwrap_or(text);
            return Err(GenerateClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GeneratePayload = response.json().await?;
        Ok(payload.plan.validate()?)
    }
}
