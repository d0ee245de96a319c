use std::sync::Arc;

use course_core::{CoursePlan, Lesson, ProgressRecord, completion_percent};
use storage::{KeyValueStore, ProgressStore};
use tracing::{info, warn};

use crate::course::source::CourseSource;
use crate::error::ViewerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Loading,
    Error(String),
    Ready,
}

/// Shows one pre-built course and tracks per-step completion.
///
/// `Loading -> Error | Ready`. Progress is read once when the course becomes
/// ready and rewritten in full after each toggle.
pub struct CourseViewer {
    slug: String,
    progress: ProgressStore,
    state: ViewerState,
    plan: Option<CoursePlan>,
    record: ProgressRecord,
    current_step: u32,
}

impl CourseViewer {
    #[must_use]
    pub fn new(slug: impl Into<String>, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            slug: slug.into(),
            progress: ProgressStore::new(kv),
            state: ViewerState::Loading,
            plan: None,
            record: ProgressRecord::new(),
            current_step: 1,
        }
    }

    /// Fetch the course document and the stored progress.
    ///
    /// Failures are reflected in `state()`; nothing is returned.
    pub async fn load(&mut self, source: &dyn CourseSource) {
        self.state = ViewerState::Loading;

        let plan = match source.fetch(&self.slug).await {
            Ok(plan) => plan,
            Err(err) => {
                warn!(slug = %self.slug, error = %err, "course unavailable");
                self.state = ViewerState::Error(err.to_string());
                return;
            }
        };

        self.record = match self.progress.load(&self.slug).await {
            Ok(record) => record,
            Err(err) => {
                warn!(slug = %self.slug, error = %err, "stored progress unreadable, starting fresh");
                ProgressRecord::new()
            }
        };

        self.current_step = self.record.first_pending(&plan).unwrap_or(1);
        info!(slug = %self.slug, lessons = plan.lesson_count(), "course ready");
        self.plan = Some(plan);
        self.state = ViewerState::Ready;
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    #[must_use]
    pub fn plan(&self) -> Option<&CoursePlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Lesson whose step is focused, falling back to the first lesson.
    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        let plan = self.plan.as_ref()?;
        plan.lesson(self.current_step)
            .or_else(|| plan.lessons().first())
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.plan.as_ref().map_or(0, CoursePlan::lesson_count)
    }

    /// Focus `step`. Not bounds-checked; `current_lesson` falls back.
    pub fn select_step(&mut self, step: u32) {
        self.current_step = step;
    }

    /// Flip the done flag of `step` and persist the whole record.
    ///
    /// The in-memory flag stays flipped even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::NotReady` before a course is loaded, or
    /// `ViewerError::Storage` if the record cannot be written.
    pub async fn toggle_done(&mut self, step: u32) -> Result<bool, ViewerError> {
        if self.state != ViewerState::Ready {
            return Err(ViewerError::NotReady);
        }
        let done = self.record.toggle(step);
        if let Err(err) = self.progress.save(&self.slug, &self.record).await {
            warn!(slug = %self.slug, step, error = %err, "failed to persist progress");
            return Err(err.into());
        }
        Ok(done)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.last_step().is_some_and(|last| self.current_step < last)
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.current_step > 1
    }

    pub fn advance(&mut self) {
        if let Some(last) = self.last_step() {
            self.current_step = self.current_step.saturating_add(1).clamp(1, last);
        }
    }

    pub fn retreat(&mut self) {
        if let Some(last) = self.last_step() {
            self.current_step = self.current_step.saturating_sub(1).clamp(1, last);
        }
    }

    /// Rounded share of the plan's lessons marked done; 0 without a plan.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        match &self.plan {
            Some(plan) => completion_percent(self.record.completed_in(plan), plan.lesson_count()),
            None => 0,
        }
    }

    fn last_step(&self) -> Option<u32> {
        self.plan
            .as_ref()
            .map(CoursePlan::last_step)
            .filter(|last| *last > 0)
    }
}
