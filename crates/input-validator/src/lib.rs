//! Input Bounds Validation
//!
//! Range checking for raw channel statistics before they reach the
//! feature pipeline. Bounds are caller-side policy; the pipeline itself
//! never re-validates.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
