//! Mathematical utilities: activation functions for the dense price network.

pub mod activation;

pub use activation::*;
