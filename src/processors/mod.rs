//! Processing components for image classification.
//!
//! This module provides the two pure processing stages that sit on either
//! side of an inference backend: encoding an image into the fixed-layout
//! byte tensor a model consumes, and selecting the top-k labels from the
//! scores the model produces. It also carries raw capture frames into the
//! pipeline.
//!
//! # Modules
//!
//! * `encode` - Fixed-layout image tensor encoding
//! * `frame` - Raw capture frame handling
//! * `topk` - Top-k classification result selection

pub mod encode;
pub mod frame;
pub mod topk;

pub use encode::{EncodedTensor, TensorEncoder, TensorSpec};
pub use frame::{PixelFormat, PixelFrame};
pub use topk::{LabelScore, TopKSelector, normalize_scores};
