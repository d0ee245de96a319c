//! Shared error types for the services crate.

use thiserror::Error;

use course_core::PlanError;
use storage::StorageError;

/// Errors from loading generator configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors emitted by a `ChatCompletion` backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionError {
    /// Upstream answered with a non-success status; `body` is its raw text.
    #[error("chat completion failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `GenerationService`.
///
/// Display strings are the messages returned to API callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("Sujet inconnu")]
    UnknownTopic,
    #[error("OPENAI_API_KEY manquant")]
    MissingCredential,
    #[error("Erreur OpenAI : {0}")]
    Upstream(String),
    #[error("Réponse vide d'OpenAI")]
    EmptyReply,
    #[error("Format JSON invalide")]
    InvalidJson,
    #[error("Parcours invalide : {0}")]
    InvalidPlan(#[from] PlanError),
    #[error("{0}")]
    Transport(String),
}

impl GenerateError {
    /// True when the caller can fix the request.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownTopic)
    }
}

/// Errors emitted by `CourseSource` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseSourceError {
    #[error("Parcours introuvable")]
    NotFound,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid course document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors emitted by `CourseViewer` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViewerError {
    #[error("course is not loaded")]
    NotReady,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GenerateClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateClientError {
    #[error("generation request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
}
