//! Shared data model and world validation for Runewild content.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{Severity, ValidationError, ValidationReport, validate_world};
