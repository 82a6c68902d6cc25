//! Text output for a run
//!
//! - `render`: header, per-probe lines and the final summary
//! - `sanitize`: strips the redundant target from OS error text
//! - `theme`: optional ANSI colours

pub mod render;
pub mod sanitize;
pub mod theme;

pub use render::Renderer;
pub use sanitize::strip_target;
