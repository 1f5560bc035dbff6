//! Core types for food photo analysis

mod error;
mod types;

pub use error::*;
pub use types::*;
