use std::sync::Arc;

use course_core::prompt::{LESSON_COUNT, SYSTEM_INSTRUCTION, topic_prompt};
use course_core::{CoursePlan, CoursePlanDraft, Topic, TopicCatalog};
use tracing::{error, info, warn};

use crate::completion::{ChatCompletion, ChatRequest, GeneratorConfig, OpenAiClient};
use crate::error::{CompletionError, GenerateError};

/// Turns a topic id into a generated course plan.
///
/// Holds no state across calls: every `generate` makes at most one outbound
/// request and caches nothing.
#[derive(Clone)]
pub struct GenerationService {
    catalog: Arc<TopicCatalog>,
    api_key: Option<String>,
    client: Arc<dyn ChatCompletion>,
}

impl GenerationService {
    #[must_use]
    pub fn new(
        catalog: TopicCatalog,
        api_key: Option<String>,
        client: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            api_key,
            client,
        }
    }

    /// Service calling the OpenAI-compatible endpoint from `config`.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig, catalog: TopicCatalog) -> Self {
        Self::new(
            catalog,
            config.api_key.clone(),
            Arc::new(OpenAiClient::from_config(config)),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Generate a course for the topic `slug`.
    ///
    /// # Errors
    ///
    /// - `UnknownTopic` if `slug` is absent, empty, or not in the catalog.
    /// - `MissingCredential` if no API key is configured.
    /// - `Upstream`, `Transport` if the outbound call fails.
    /// - `EmptyReply`, `InvalidJson`, `InvalidPlan` if the reply is unusable.
    pub async fn generate(&self, slug: Option<&str>) -> Result<CoursePlan, GenerateError> {
        let topic = slug
            .filter(|slug| !slug.is_empty())
            .and_then(|slug| self.catalog.get(slug))
            .ok_or(GenerateError::UnknownTopic)?;

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerateError::MissingCredential)?;

        info!(topic = topic.id(), "generating course");
        let request = course_request(topic);

        let content = self
            .client
            .complete(api_key, &request)
            .await
            .map_err(|err| match err {
                CompletionError::Status { status, body } => {
                    warn!(topic = topic.id(), status, "chat completion rejected");
                    GenerateError::Upstream(body)
                }
                other => {
                    warn!(topic = topic.id(), error = %other, "chat completion failed");
                    GenerateError::Transport(other.to_string())
                }
            })?;

        let content = content
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerateError::EmptyReply)?;

        let value: serde_json::Value = serde_json::from_str(&content).map_err(|err| {
            error!(topic = topic.id(), error = %err, content = %content, "model reply is not JSON");
            GenerateError::InvalidJson
        })?;

        let plan = CoursePlanDraft::from_value(value)
            .and_then(CoursePlanDraft::validate)
            .map_err(|err| {
                warn!(topic = topic.id(), error = %err, "model reply does not match the course schema");
                GenerateError::InvalidPlan(err)
            })?;

        if plan.lesson_count() != LESSON_COUNT as usize {
            warn!(
                topic = topic.id(),
                lessons = plan.lesson_count(),
                expected = LESSON_COUNT,
                "model returned an unexpected number of lessons"
            );
        }

        info!(topic = topic.id(), slug = plan.slug(), "course generated");
        Ok(plan)
    }
}

fn course_request(topic: &Topic) -> ChatRequest {
    ChatRequest::with_system(SYSTEM_INSTRUCTION, topic_prompt(topic))
}
