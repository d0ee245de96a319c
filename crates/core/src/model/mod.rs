mod block;
mod plan;
mod progress;

pub use block::ContentBlock;
pub use plan::{CoursePlan, CoursePlanDraft, Lesson, LessonDraft, PlanError};
pub use progress::{ProgressRecord, completion_percent};
