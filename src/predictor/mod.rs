//! Predictor implementations for classification tasks.
//!
//! This module contains the image classifier, which wires the processing
//! components (tensor encoding, top-k selection) around a caller-supplied
//! inference backend. The predictor module contains both the classifier
//! implementation and its builder.

/// Image classifier pairing encoded tensors with label dictionaries
pub mod image_classifier;

// Re-exports for easier access to predictor types
pub use image_classifier::{ImageClassifier, ImageClassifierBuilder, ImageClassifierConfig};
