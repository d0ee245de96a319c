use services::{CourseViewer, ViewerError, ViewerState};

use crate::views::ViewError;
use crate::vm::block_vm::{BlockVm, map_blocks};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PillState {
    Current,
    Done,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepPillVm {
    pub step: u32,
    pub label: String,
    pub state: PillState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonDetailVm {
    pub step: u32,
    pub heading: String,
    pub done: bool,
    pub blocks: Vec<BlockVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseReadyVm {
    pub title: String,
    pub duration: String,
    pub summary: String,
    pub progress_pct: u8,
    pub progress_label: String,
    pub steps: Vec<StepPillVm>,
    pub lesson: LessonDetailVm,
    pub can_retreat: bool,
    pub can_advance: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseVm {
    Loading,
    Error(String),
    Ready(CourseReadyVm),
}

impl CourseVm {
    #[must_use]
    pub fn from_viewer(viewer: &CourseViewer) -> Self {
        match viewer.state() {
            ViewerState::Loading => Self::Loading,
            ViewerState::Error(message) => Self::Error(message.clone()),
            ViewerState::Ready => match (viewer.plan(), viewer.current_lesson()) {
                (Some(plan), Some(lesson)) => {
                    let progress = viewer.progress();
                    let current = viewer.current_step();
                    let steps = plan
                        .lessons()
                        .iter()
                        .map(|l| StepPillVm {
                            step: l.step,
                            label: format!("Étape {}", l.step),
                            state: if l.step == current {
                                PillState::Current
                            } else if progress.is_done(l.step) {
                                PillState::Done
                            } else {
                                PillState::Pending
                            },
                        })
                        .collect();
                    let pct = viewer.completion_percent();

                    Self::Ready(CourseReadyVm {
                        title: plan.title().to_string(),
                        duration: plan.duration().to_string(),
                        summary: plan.summary().to_string(),
                        progress_pct: pct,
                        progress_label: format!("{pct}% terminé"),
                        steps,
                        lesson: LessonDetailVm {
                            step: lesson.step,
                            heading: format!("Étape {} — {}", lesson.step, lesson.title),
                            done: progress.is_done(lesson.step),
                            blocks: map_blocks(lesson.visible_blocks(), &lesson.title),
                        },
                        can_retreat: viewer.can_retreat(),
                        can_advance: viewer.can_advance(),
                    })
                }
                _ => Self::Error("Parcours introuvable.".to_string()),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseIntent {
    Select(u32),
    ToggleDone,
    Previous,
    Next,
}

/// Apply one user action to the viewer.
///
/// # Errors
///
/// Returns `ViewError::ProgressNotSaved` when a toggle could not be stored,
/// `ViewError::NotReady` when the course is not loaded.
pub async fn apply_intent(viewer: &mut CourseViewer, intent: CourseIntent) -> Result<(), ViewError> {
    match intent {
        CourseIntent::Select(step) => viewer.select_step(step),
        CourseIntent::Previous => viewer.retreat(),
        CourseIntent::Next => viewer.advance(),
        CourseIntent::ToggleDone => {
            let step = viewer
                .current_lesson()
                .map(|lesson| lesson.step)
                .ok_or(ViewError::NotReady)?;
            viewer.toggle_done(step).await.map_err(|err| match err {
                ViewerError::NotReady => ViewError::NotReady,
                _ => ViewError::ProgressNotSaved,
            })?;
        }
    }
    Ok(())
}
