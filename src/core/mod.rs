//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components of the pipeline, including:
//! - Configuration validation
//! - Constants used throughout the pipeline
//! - Error handling
//! - Traits defining the external service boundaries
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

pub use config::{ConfigError, ConfigValidator};
pub use constants::*;
pub use errors::{ClassifyError, ClassifyResult};
pub use traits::{InferenceEngine, TextBlock, TextRecognizer, TextResult};
