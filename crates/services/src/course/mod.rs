mod source;
mod viewer;

// Public API of the course viewing subsystem.
pub use crate::error::{CourseSourceError, ViewerError};
pub use source::{CourseSource, DirCourseSource, HttpCourseSource, parse_course_document};
pub use viewer::{CourseViewer, ViewerState};
