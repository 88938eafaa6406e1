//! Utility functions for the classification pipeline.
//!
//! This module provides supporting utilities used throughout the pipeline,
//! including label dictionary loading and logging setup.

pub mod labels;

pub use labels::LabelSet;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
