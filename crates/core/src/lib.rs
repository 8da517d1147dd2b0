//! Creon theme resolution and presentation engine.
//!
//! Pure, synchronous functions shared by every profile surface: theme
//! normalization, style resolution, tab selection, collection visuals and
//! video link classification. Nothing here performs I/O or keeps state
//! between calls.

pub mod analytics;
pub mod collections;
pub mod content;
pub mod error;
pub mod profile;
pub mod style;
pub mod tabs;
pub mod theme;
pub mod types;
pub mod video;
