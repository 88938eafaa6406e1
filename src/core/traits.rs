//! Core traits for the external service boundaries.
//!
//! This module defines the seams between the pure processing components of
//! the crate and the services that sit outside it: the inference backend
//! that scores an encoded tensor, and the text recognizer that extracts
//! text from an image. The crate ships no implementation of either trait;
//! callers plug in their own backend and the pipeline treats it as opaque.

use crate::core::errors::ClassifyResult;
use crate::processors::EncodedTensor;
use image::DynamicImage;

/// Trait for running inference over an encoded image tensor.
///
/// Implementations receive the tensor exactly as produced by the encoder
/// and return one raw byte score per class, index-aligned with the label
/// dictionary the caller pairs it with. Backend failures should be wrapped
/// with [`ClassifyError::external`](crate::core::errors::ClassifyError::external)
/// so they surface to callers unchanged.
pub trait InferenceEngine: Send + Sync {
    /// Runs inference on the given tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - The encoded tensor to score.
    ///
    /// # Returns
    ///
    /// A Result containing one raw score byte per class, or an error.
    fn run(&self, input: &EncodedTensor) -> ClassifyResult<Vec<u8>>;
}

/// Trait for recognizing text in an image.
///
/// This is an opaque boundary: the crate performs no OCR itself and makes
/// no assumptions about how implementations produce their results. Backend
/// failures should be wrapped with
/// [`ClassifyError::external`](crate::core::errors::ClassifyError::external)
/// so they surface to callers unchanged.
pub trait TextRecognizer: Send + Sync {
    /// Recognizes text in the given image.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to recognize text in.
    ///
    /// # Returns
    ///
    /// A Result containing the recognized text or an error.
    fn recognize(&self, image: &DynamicImage) -> ClassifyResult<TextResult>;
}

/// The result of a text recognition request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TextResult {
    /// The full recognized text.
    pub text: String,
    /// The individual text blocks that make up the result.
    pub blocks: Vec<TextBlock>,
}

/// A single block of recognized text.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TextBlock {
    /// The text of this block.
    pub text: String,
    /// The recognizer's confidence in this block, in [0.0, 1.0].
    pub confidence: f32,
}
