//! Core of the KLK clock face.
//!
//! This crate is platform-agnostic and shared between the desktop simulator
//! and any device host:
//!
//! - [`glyphs`]: Atlas grid and semantic glyph tokens
//! - [`decompose`]: Time/date fields to glyph runs
//! - [`layout`]: Row sizing, centering, and stacking
//! - [`particles`]: Fixed-capacity star pool
//! - [`animation`]: Star transition driver and deferred layout refresh
//! - [`surface`]: Glyph slots and star drawing
//! - [`atlas`]: Bitmap glyph atlases
//! - [`face`]: The [`ClockFace`] controller hosts drive
//! - [`settings`]: Persisted settings blob and store abstraction
//! - [`message`]: Remote key/value configuration decoding
//! - [`colors`]: Color constants and theme resolution
//! - [`config`]: Display profiles and mode flags
//! - [`log_buffer`]: Levelled log ring and `log_*!` macros
//! - [`overlay`]: On-screen log overlay
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and never allocates. Unit tests run on the host
//! with `std`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animation;
pub mod atlas;
pub mod colors;
pub mod config;
pub mod decompose;
pub mod face;
pub mod glyphs;
pub mod layout;
pub mod log_buffer;
pub mod message;
pub mod overlay;
pub mod particles;
pub mod settings;
pub mod surface;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub use atlas::{AtlasImage, BitmapAtlas, GlyphAtlas};
pub use config::{DisplayModeFlags, DisplayProfile};
pub use decompose::TimeFields;
pub use face::{ClockFace, RenderCommands};
pub use message::{Message, MessageValue};
pub use settings::{MemoryStore, Settings, SettingsStore};
