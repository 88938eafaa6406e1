//! Constants used throughout the classification pipeline.
//!
//! This module defines various constants that are used across different
//! components of the pipeline, such as default values for tensor layout,
//! top-k selection, and tensor size limits.

/// The default batch size for encoded tensors.
///
/// This constant defines the number of images encoded together;
/// the pipeline processes a single image per tensor.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// The default input shape for classification.
///
/// This constant defines the default shape (width, height)
/// to which source images are resized before encoding.
pub const DEFAULT_INPUT_SHAPE: (u32, u32) = (224, 224);

/// The default number of color channels per pixel.
///
/// This constant defines how many components (R, G, B) are
/// emitted for each pixel of an encoded tensor.
pub const DEFAULT_CHANNELS: usize = 3;

/// The default value for top-k selection.
///
/// This constant defines the default number of top results
/// to select in classification tasks.
pub const DEFAULT_TOP_K: usize = 3;

/// The scale used to normalize byte-valued confidence scores.
///
/// Raw model outputs delivered as unsigned bytes are divided
/// by this value to map them into the range [0.0, 1.0].
pub const BYTE_SCORE_SCALE: f32 = 255.0;

/// The maximum allowed tensor size in bytes.
///
/// This constant defines the maximum number of bytes
/// allowed in an encoded tensor to prevent memory issues.
pub const MAX_TENSOR_BYTES: usize = 100_000_000;
