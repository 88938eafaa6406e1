//! Image classifier
//!
//! This module provides the classification pipeline: encode an image into
//! the fixed-layout tensor a model expects, hand the tensor to a
//! caller-supplied inference backend, and pair the returned scores with a
//! label dictionary to select the top-k results.
//!
//! The backend is opaque. The classifier never retries it and surfaces
//! its failures unchanged, so one failed request has no effect on the
//! shared label set or on later calls.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::core::config::{ConfigError, ConfigValidator};
use crate::core::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHANNELS, DEFAULT_INPUT_SHAPE, DEFAULT_TOP_K,
};
use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::core::traits::InferenceEngine;
use crate::processors::{LabelScore, PixelFrame, TensorEncoder, TensorSpec, TopKSelector};
use crate::utils::LabelSet;

/// Configuration for the image classifier
///
/// This struct holds configuration parameters for the image classifier.
/// Unset fields fall back to the defaults of the quantized mobile
/// classifier the pipeline was built around: 224x224 RGB input and the
/// top 3 results.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ImageClassifierConfig {
    /// Name of the model, used in logs
    pub model_name: Option<String>,
    /// Number of top predictions to return for each image
    pub top_k: Option<usize>,
    /// Input shape for the model (width, height)
    pub input_shape: Option<(u32, u32)>,
    /// Color components emitted per pixel
    pub channels: Option<usize>,
    /// Path to the label dictionary file
    pub labels_path: Option<PathBuf>,
}

impl ImageClassifierConfig {
    /// Creates a new image classifier configuration with default settings
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifierConfig` with default settings
    pub fn new() -> Self {
        Self {
            model_name: Some("image_classifier".to_string()),
            top_k: Some(DEFAULT_TOP_K),
            input_shape: Some(DEFAULT_INPUT_SHAPE),
            channels: Some(DEFAULT_CHANNELS),
            labels_path: None,
        }
    }

    /// Validates the image classifier configuration
    ///
    /// Checks that all configuration parameters are valid and within
    /// acceptable ranges.
    ///
    /// # Returns
    ///
    /// Ok if the configuration is valid, or an error if validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

impl ConfigValidator for ImageClassifierConfig {
    /// Validates the image classifier configuration
    ///
    /// This includes validating the top-k value, the input shape, the
    /// channel count, and the label dictionary path if one is set.
    ///
    /// # Returns
    ///
    /// Ok if the configuration is valid, or an error if validation fails
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(top_k) = self.top_k {
            self.validate_positive_usize(top_k, "top_k")?;
        }

        if let Some((width, height)) = self.input_shape {
            self.validate_image_dimensions(width, height, "input_shape")?;
        }

        if let Some(channels) = self.channels {
            self.validate_channels(channels, "channels")?;
        }

        if let Some(path) = &self.labels_path {
            self.validate_label_path(path)?;
        }

        Ok(())
    }

    /// Gets the default image classifier configuration
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifierConfig` with default settings
    fn get_defaults() -> Self {
        Self::new()
    }
}

/// Image classifier
///
/// This struct wires the pure processing components around a
/// caller-supplied inference backend. All methods take `&self`; the
/// classifier holds no per-request state and can be shared across
/// threads.
#[derive(Debug)]
pub struct ImageClassifier<E: InferenceEngine> {
    /// Number of top predictions to return for each image
    top_k: usize,
    /// The tensor layout the model expects
    spec: TensorSpec,
    /// Name of the model being used
    model_name: String,

    /// Encoder producing the model input tensor
    encoder: TensorEncoder,
    /// Selector pairing model scores with labels
    selector: TopKSelector,
    /// Caller-supplied inference backend
    engine: E,
}

impl<E: InferenceEngine> ImageClassifier<E> {
    /// Creates a new image classifier
    ///
    /// Resolves defaults for any unset configuration fields and builds the
    /// processing components around the given backend. The configuration is
    /// expected to have been validated; the tensor layout is checked here
    /// regardless.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the classifier
    /// * `labels` - The label dictionary, index-aligned with the model output
    /// * `engine` - The inference backend to score tensors with
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifier` or an error if the tensor layout
    /// is unusable
    pub fn new(config: ImageClassifierConfig, labels: LabelSet, engine: E) -> ClassifyResult<Self> {
        let (width, height) = config.input_shape.unwrap_or(DEFAULT_INPUT_SHAPE);
        let channels = config.channels.unwrap_or(DEFAULT_CHANNELS);
        let spec = TensorSpec::new(DEFAULT_BATCH_SIZE, width, height, channels)?;
        let model_name = config
            .model_name
            .unwrap_or_else(|| "image_classifier".to_string());

        Ok(Self {
            top_k: config.top_k.unwrap_or(DEFAULT_TOP_K),
            spec,
            model_name,
            encoder: TensorEncoder::new(),
            selector: TopKSelector::new(labels),
            engine,
        })
    }

    /// Returns the tensor layout the classifier encodes into.
    pub fn spec(&self) -> &TensorSpec {
        &self.spec
    }

    /// Returns the number of top predictions returned per image.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Returns the name of the model being used.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the label dictionary the classifier pairs scores with.
    pub fn labels(&self) -> &LabelSet {
        self.selector.labels()
    }

    /// Classifies an image.
    ///
    /// Encodes the image, scores it with the backend, and returns the
    /// top-k labels in descending order of confidence. Backend failures
    /// surface unchanged as
    /// [`ClassifyError::ExternalService`](crate::core::errors::ClassifyError::ExternalService);
    /// a failed request leaves the classifier untouched for later calls.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to classify
    ///
    /// # Returns
    ///
    /// The top-k results in descending order, or an error
    pub fn classify(&self, image: &DynamicImage) -> ClassifyResult<Vec<LabelScore>> {
        let tensor = self.encoder.encode(image, &self.spec)?;
        let scores = self.engine.run(&tensor)?;
        let top = self.selector.select_bytes(&scores, self.top_k)?;

        debug!(
            model = %self.model_name,
            results = top.len(),
            "classified image"
        );

        Ok(top)
    }

    /// Classifies a raw capture frame.
    ///
    /// The frame is converted to an image first; formats that cannot yield
    /// per-pixel RGB components are rejected with
    /// [`ClassifyError::UnsupportedPixelFormat`](crate::core::errors::ClassifyError::UnsupportedPixelFormat).
    ///
    /// # Arguments
    ///
    /// * `frame` - The raw capture frame to classify
    ///
    /// # Returns
    ///
    /// The top-k results in descending order, or an error
    pub fn classify_frame(&self, frame: &PixelFrame) -> ClassifyResult<Vec<LabelScore>> {
        let image = frame.to_image()?;
        self.classify(&image)
    }

    /// Classifies an image loaded from a file path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the image file
    ///
    /// # Returns
    ///
    /// The top-k results in descending order, or an error
    pub fn classify_path(&self, path: &Path) -> ClassifyResult<Vec<LabelScore>> {
        let image = image::open(path)?;
        self.classify(&image)
    }

    /// Classifies an image and renders each result as a `label:score` line.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to classify
    ///
    /// # Returns
    ///
    /// One formatted line per result, best first, or an error
    pub fn classify_formatted(&self, image: &DynamicImage) -> ClassifyResult<Vec<String>> {
        let top = self.classify(image)?;
        Ok(top.iter().map(ToString::to_string).collect())
    }
}

/// Builder for the image classifier
///
/// This struct provides a builder pattern for creating an image classifier
/// with custom configuration options. The inference backend is supplied at
/// build time, after the configuration has been validated.
pub struct ImageClassifierBuilder {
    /// Name of the model, used in logs
    model_name: Option<String>,
    /// Number of top predictions to return for each image
    top_k: Option<usize>,
    /// Input shape for the model (width, height)
    input_shape: Option<(u32, u32)>,
    /// Color components emitted per pixel
    channels: Option<usize>,
    /// Labels provided directly by the caller
    labels: Option<LabelSet>,
    /// Path to load the labels from instead
    labels_path: Option<PathBuf>,
}

impl ImageClassifierBuilder {
    /// Creates a new image classifier builder
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifierBuilder`
    pub fn new() -> Self {
        Self {
            model_name: None,
            top_k: None,
            input_shape: None,
            channels: None,
            labels: None,
            labels_path: None,
        }
    }

    /// Sets the model name for the classifier
    ///
    /// # Arguments
    ///
    /// * `model_name` - Name of the model
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Sets the number of top predictions to return
    ///
    /// # Arguments
    ///
    /// * `top_k` - Number of top predictions to return
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the input shape for the model
    ///
    /// # Arguments
    ///
    /// * `input_shape` - Input shape as (width, height)
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.input_shape = Some(input_shape);
        self
    }

    /// Sets the number of color components emitted per pixel
    ///
    /// # Arguments
    ///
    /// * `channels` - Color components per pixel (1 to 3)
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Sets the label dictionary directly
    ///
    /// # Arguments
    ///
    /// * `labels` - The labels, index-aligned with the model output
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn labels(mut self, labels: LabelSet) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Sets the path to load the label dictionary from
    ///
    /// # Arguments
    ///
    /// * `labels_path` - Path to a file with one label per line
    ///
    /// # Returns
    ///
    /// The updated builder instance
    pub fn labels_path(mut self, labels_path: impl Into<PathBuf>) -> Self {
        self.labels_path = Some(labels_path.into());
        self
    }

    /// Builds the image classifier
    ///
    /// Validates the configuration, resolves the label dictionary, and
    /// wires the classifier around the given backend.
    ///
    /// # Arguments
    ///
    /// * `engine` - The inference backend to score tensors with
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifier` or an error if building fails
    pub fn build<E: InferenceEngine>(self, engine: E) -> ClassifyResult<ImageClassifier<E>> {
        self.build_internal(engine)
    }

    /// Internal method to build the image classifier
    ///
    /// This method handles validation of the configuration and loading of
    /// the label dictionary when only a path was provided.
    fn build_internal<E: InferenceEngine>(self, engine: E) -> ClassifyResult<ImageClassifier<E>> {
        let config = ImageClassifierConfig {
            model_name: self.model_name,
            top_k: self.top_k,
            input_shape: self.input_shape,
            channels: self.channels,
            labels_path: self.labels_path,
        };

        config.validate()?;

        let labels = match (self.labels, &config.labels_path) {
            (Some(labels), _) => labels,
            (None, Some(path)) => LabelSet::from_file(path)?,
            (None, None) => {
                return Err(ClassifyError::config_error(
                    "label set is required: provide labels or labels_path",
                ));
            }
        };

        ImageClassifier::new(config, labels, engine)
    }
}

impl Default for ImageClassifierBuilder {
    /// Creates a new image classifier builder with default settings
    ///
    /// This is equivalent to calling `ImageClassifierBuilder::new()`.
    ///
    /// # Returns
    ///
    /// A new instance of `ImageClassifierBuilder` with default settings
    fn default() -> Self {
        Self::new()
    }
}
