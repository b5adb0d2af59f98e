//! Clock face configuration.
//!
//! - `modes`: Display mode flags owned by the persisted settings
//! - `profile`: Per-display capability descriptor (canvas, cell sizes, color depth)

pub mod modes;
pub mod profile;

pub use modes::{DatePosition, DisplayModeFlags};
pub use profile::{ColorDepth, DisplayProfile, RECT_COLOR, RECT_MONO, ROUND_COLOR};
