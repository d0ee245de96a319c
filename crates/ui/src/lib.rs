#![forbid(unsafe_code)]

pub mod routes;
pub mod views;
pub mod vm;

pub use routes::Route;
pub use views::ViewError;
