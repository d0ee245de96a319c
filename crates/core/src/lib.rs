#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod prompt;

pub use catalog::{Topic, TopicCatalog, TopicGroup};
pub use model::{ContentBlock, CoursePlan, CoursePlanDraft, Lesson, LessonDraft, PlanError};
pub use model::{ProgressRecord, completion_percent};
