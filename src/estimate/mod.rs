//! The estimation pipeline.
//!
//! - `volume`: quantity of work per item from road dimensions
//! - `engine`: per-item pricing through the injected model and scalers
//! - `aggregate`: subtotal, tax and the billing round-off

pub mod aggregate;
pub mod engine;
pub mod volume;

pub use aggregate::*;
pub use engine::*;
pub use volume::*;
