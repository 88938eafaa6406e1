//! # labelkit
//!
//! A Rust library for the pure halves of on-device image classification:
//! encoding images into the fixed-layout byte tensors quantized models
//! consume, and selecting the top-k labels from the scores they produce.
//! Inference itself stays behind a trait the caller implements.
//!
//! ## Features
//!
//! - Fixed-layout (NHWC) byte tensor encoding with validated specs
//! - Bounded top-k selection with deterministic ordering and tie-breaks
//! - Line-oriented label dictionaries, index-aligned with model output
//! - Raw capture frame handling (RGB, RGBA, BGRA, grayscale)
//! - Pluggable inference and text-recognition backends
//!
//! ## Components
//!
//! - **TensorEncoder**: Resize an image and emit interleaved RGB bytes
//! - **TopKSelector**: Pair scores with labels and keep the k best
//! - **ImageClassifier**: The encode, infer, select pipeline in one type
//!
//! ## Modules
//!
//! * [`core`] - Core traits, error handling, and configuration validation
//! * [`predictor`] - The image classifier and its builder
//! * [`processors`] - Tensor encoding, capture frames, and top-k selection
//! * [`utils`] - Label dictionaries and logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use labelkit::prelude::*;
//! use image::DynamicImage;
//!
//! // Any backend works; this one returns one fixed score byte per class.
//! struct FixedEngine;
//!
//! impl InferenceEngine for FixedEngine {
//!     fn run(&self, _input: &EncodedTensor) -> ClassifyResult<Vec<u8>> {
//!         Ok(vec![26, 230, 128])
//!     }
//! }
//!
//! # fn main() -> ClassifyResult<()> {
//! let classifier = ImageClassifierBuilder::new()
//!     .top_k(2)
//!     .labels(["cat", "dog", "bird"].into_iter().collect())
//!     .build(FixedEngine)?;
//!
//! let top = classifier.classify(&DynamicImage::new_rgb8(64, 64))?;
//! assert_eq!(top[0].label.as_ref(), "dog");
//! assert_eq!(top.len(), 2);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod predictor;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use labelkit::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - The classifier (`ImageClassifier`, `ImageClassifierBuilder`)
/// - Processing components (`TensorEncoder`, `TensorSpec`, `TopKSelector`)
/// - Results (`LabelScore`, `EncodedTensor`)
/// - Essential error and result types (`ClassifyError`, `ClassifyResult`)
/// - The backend seams (`InferenceEngine`, `TextRecognizer`)
///
/// For configuration and validation types, import directly from the
/// respective modules (e.g., `labelkit::core::config`).
pub mod prelude {
    // Classifier (essential)
    pub use crate::predictor::{ImageClassifier, ImageClassifierBuilder};

    // Processing components
    pub use crate::processors::{
        EncodedTensor, LabelScore, PixelFormat, PixelFrame, TensorEncoder, TensorSpec,
        TopKSelector,
    };

    // Error handling (essential)
    pub use crate::core::{ClassifyError, ClassifyResult};

    // Backend seams
    pub use crate::core::{InferenceEngine, TextRecognizer, TextResult};

    // Label dictionaries
    pub use crate::utils::LabelSet;
}
