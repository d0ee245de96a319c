mod block_vm;
mod course_vm;
mod generation_vm;
mod selection_vm;

pub use block_vm::{BlockVm, map_blocks};
pub use course_vm::{
    CourseIntent, CourseReadyVm, CourseVm, LessonDetailVm, PillState, StepPillVm, apply_intent,
};
pub use generation_vm::{GeneratedLessonVm, GeneratedPlanVm, GenerationVm, run_generation};
pub use selection_vm::{OptionGroupVm, OptionVm, SelectionError, SelectionVm};
