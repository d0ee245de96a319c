#![forbid(unsafe_code)]

pub mod completion;
pub mod course;
pub mod error;
pub mod generate_client;
pub mod generation;

pub use completion::{ChatCompletion, ChatMessage, ChatRequest, GeneratorConfig, OpenAiClient};
pub use course::{CourseSource, CourseViewer, DirCourseSource, HttpCourseSource, ViewerState};
pub use error::{
    CompletionError, ConfigError, CourseSourceError, GenerateClientError, GenerateError,
    ViewerError,
};
pub use generate_client::GenerateClient;
pub use generation::GenerationService;
