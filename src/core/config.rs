//! Configuration utilities for the classification pipeline.
//!
//! This module provides the error type and validation trait shared by
//! configurable components of the pipeline. Component-specific
//! configuration structures live next to the components they configure
//! and implement [`ConfigValidator`] to check themselves before use.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration validation.
///
/// This enum represents various errors that can occur when validating
/// configuration parameters in the classification pipeline.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a label dictionary path does not exist.
    #[error("label path does not exist: {path}")]
    LabelPathNotFound { path: std::path::PathBuf },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that a resource limit has been exceeded.
    #[error("resource limit exceeded: {message}")]
    ResourceLimitExceeded { message: String },
}

/// A trait for validating configuration parameters.
///
/// This trait provides methods for validating various configuration
/// parameters used in the classification pipeline, such as image
/// dimensions, channel counts, and label dictionary paths.
pub trait ConfigValidator {
    /// Validates the configuration.
    ///
    /// This method should be implemented by types that need to validate their configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    ///
    /// This method should be implemented by types that have default configuration values.
    ///
    /// # Returns
    ///
    /// The default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates a label dictionary path.
    ///
    /// This method checks that the label path exists and is a file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the label dictionary file.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate_label_path(&self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::LabelPathNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_file() {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "Label path must be a file, not a directory: {}",
                    path.display()
                ),
            });
        }

        Ok(())
    }

    /// Validates that a usize value is positive.
    ///
    /// This method checks that the value is greater than 0.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to validate.
    /// * `field_name` - The name of the field being validated.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate_positive_usize(&self, value: usize, field_name: &str) -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!("{} must be greater than 0", field_name),
            });
        }
        Ok(())
    }

    /// Validates image dimensions.
    ///
    /// This method checks that the width and height are greater than 0 and do not exceed
    /// the maximum allowed dimensions.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the image.
    /// * `height` - The height of the image.
    /// * `field_name` - The name of the field being validated.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate_image_dimensions(
        &self,
        width: u32,
        height: u32,
        field_name: &str,
    ) -> Result<(), ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidConfig {
                message: format!(
                    "{} dimensions must be greater than 0, got {}x{}",
                    field_name, width, height
                ),
            });
        }

        const MAX_DIMENSION: u32 = 8192;
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::ResourceLimitExceeded {
                message: format!(
                    "{} dimensions {}x{} exceed maximum allowed size {}x{}",
                    field_name, width, height, MAX_DIMENSION, MAX_DIMENSION
                ),
            });
        }

        Ok(())
    }

    /// Validates a per-pixel channel count.
    ///
    /// This method checks that the channel count is between 1 and 3, the
    /// components that can be taken from an RGB pixel.
    ///
    /// # Arguments
    ///
    /// * `channels` - The channel count to validate.
    /// * `field_name` - The name of the field being validated.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate_channels(&self, channels: usize, field_name: &str) -> Result<(), ConfigError> {
        if channels == 0 || channels > 3 {
            return Err(ConfigError::InvalidConfig {
                message: format!("{} must be between 1 and 3, got {}", field_name, channels),
            });
        }
        Ok(())
    }
}
