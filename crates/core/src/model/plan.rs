use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ContentBlock;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("plan does not match the expected structure: {0}")]
    Malformed(String),

    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),

    #[error("plan has no lessons")]
    NoLessons,

    #[error("lesson at position {position} has no step number")]
    MissingStep { position: usize },

    #[error("lesson {step} has an empty title")]
    EmptyLessonTitle { step: u32 },

    #[error("expected step {expected} at position {position}, found {found}")]
    StepOutOfSequence {
        position: usize,
        expected: u32,
        found: u32,
    },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Untrusted plan as received from the model or a static document.
///
/// Every field is optional so that missing data surfaces as a `PlanError`
/// from `validate` rather than as a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoursePlanDraft {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LessonDraft {
    pub step: Option<u32>,
    pub title: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl LessonDraft {
    #[must_use]
    pub fn new(step: u32, title: impl Into<String>, content: Vec<ContentBlock>) -> Self {
        Self {
            step: Some(step),
            title: Some(title.into()),
            content,
        }
    }
}

impl CoursePlanDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        summary: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            slug: Some(slug.into()),
            summary: Some(summary.into()),
            duration: Some(duration.into()),
            lessons: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_lesson(mut self, lesson: LessonDraft) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Decode a draft from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Malformed` when the value is not an object or a
    /// field has the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PlanError> {
        serde_json::from_value(value).map_err(|err| PlanError::Malformed(err.to_string()))
    }

    /// Validate the draft into a `CoursePlan`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError` when a required field is missing or empty, when
    /// there are no lessons, or when steps do not run `1..=n` in order.
    pub fn validate(self) -> Result<CoursePlan, PlanError> {
        let title = required(self.title, "title")?;
        let slug = required(self.slug, "slug")?;
        let summary = required(self.summary, "summary")?;
        let duration = required(self.duration, "duration")?;

        let lessons = self
            .lessons
            .into_iter()
            .enumerate()
            .map(|(position, draft)| {
                let step = draft.step.ok_or(PlanError::MissingStep { position })?;
                let title = draft
                    .title
                    .map(|t| t.trim().to_owned())
                    .filter(|t| !t.is_empty())
                    .ok_or(PlanError::EmptyLessonTitle { step })?;
                Ok(Lesson {
                    step,
                    title,
                    content: draft.content,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        CoursePlan::new(title, slug, summary, duration, lessons)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PlanError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(PlanError::MissingField(field))
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// One numbered unit of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub step: u32,
    pub title: String,
    pub content: Vec<ContentBlock>,
}

impl Lesson {
    /// Blocks that render something, in order.
    pub fn visible_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.content.iter().filter(|block| !block.is_unknown())
    }
}

/// A validated course: required fields present, lessons numbered `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoursePlan {
    title: String,
    slug: String,
    summary: String,
    duration: String,
    lessons: Vec<Lesson>,
}

impl CoursePlan {
    /// Creates a plan from validated parts.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NoLessons` for an empty lesson list and
    /// `PlanError::StepOutOfSequence` when steps are not `1, 2, .., n`.
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        summary: impl Into<String>,
        duration: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Result<Self, PlanError> {
        if lessons.is_empty() {
            return Err(PlanError::NoLessons);
        }
        for (position, (lesson, expected)) in lessons.iter().zip(1_u32..).enumerate() {
            if lesson.step != expected {
                return Err(PlanError::StepOutOfSequence {
                    position,
                    expected,
                    found: lesson.step,
                });
            }
        }

        Ok(Self {
            title: title.into(),
            slug: slug.into(),
            summary: summary.into(),
            duration: duration.into(),
            lessons,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn lesson(&self, step: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.step == step)
    }

    /// Highest step number, which equals the lesson count.
    #[must_use]
    pub fn last_step(&self) -> u32 {
        self.lessons.last().map_or(0, |lesson| lesson.step)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
