//! Presentation: pure rendering of controller state to console text.

pub mod format;
pub mod render;

pub use render::render_screen;
