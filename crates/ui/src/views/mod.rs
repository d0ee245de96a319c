mod state;
mod text;

pub use state::ViewError;
pub use text::{render_course, render_generation, render_selection};
