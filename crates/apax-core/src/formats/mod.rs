//! # Formats Module
//!
//! Serialization formats. File I/O operations are in the app layer.

mod persistence;

pub use persistence::*;
