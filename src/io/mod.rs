//! Input/output helpers.
//!
//! - estimate report export for external renderers (`export`)

pub mod export;

pub use export::*;
