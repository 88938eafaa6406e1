//! Error types for the classification pipeline.
//!
//! This module defines the error type shared by every component of the
//! crate, including tensor encoding errors, selection errors, label
//! dictionary errors, and configuration errors. It also provides utility
//! functions for creating these errors with appropriate context.

use thiserror::Error;

/// Enum representing various errors that can occur in the classification pipeline.
///
/// Both processing components fail fast with a specific error rather than
/// returning partial data; failures reported by an external inference or
/// text-recognition service pass through unchanged as
/// [`ClassifyError::ExternalService`].
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// A tensor spec or source image has unusable dimensions.
    #[error("invalid dimensions: {message}")]
    InvalidDimensions {
        /// A message describing the offending dimensions.
        message: String,
    },

    /// A raw frame's pixel format cannot yield per-pixel RGB components.
    #[error("unsupported pixel format: {format}")]
    UnsupportedPixelFormat {
        /// The name of the pixel format that was rejected.
        format: String,
    },

    /// A caller-supplied argument is outside the operation's contract.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// A message describing the invalid argument.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Opaque failure reported by an external inference or recognition service.
    ///
    /// The underlying error is carried unchanged; retry policy, if any,
    /// belongs to the service caller, not to this crate.
    #[error("external service")]
    ExternalService(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Implementation of ClassifyError with utility functions for creating errors.
impl ClassifyError {
    /// Creates a ClassifyError for unusable dimensions.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the offending dimensions.
    ///
    /// # Returns
    ///
    /// A ClassifyError instance.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for a pixel format that cannot yield RGB components.
    ///
    /// # Arguments
    ///
    /// * `format` - The name of the rejected pixel format.
    ///
    /// # Returns
    ///
    /// A ClassifyError instance.
    pub fn unsupported_pixel_format(format: impl Into<String>) -> Self {
        Self::UnsupportedPixelFormat {
            format: format.into(),
        }
    }

    /// Creates a ClassifyError for an argument outside an operation's contract.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the invalid argument.
    ///
    /// # Returns
    ///
    /// A ClassifyError instance.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for configuration errors.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the configuration error.
    ///
    /// # Returns
    ///
    /// A ClassifyError instance.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wraps a failure from an external service without interpreting it.
    ///
    /// # Arguments
    ///
    /// * `error` - The error reported by the external service.
    ///
    /// # Returns
    ///
    /// A ClassifyError instance carrying the service error as its source.
    pub fn external(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::ExternalService(Box::new(error))
    }
}

/// Implementation of From<image::ImageError> for ClassifyError.
///
/// This allows image::ImageError to be automatically converted to ClassifyError.
impl From<image::ImageError> for ClassifyError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

/// Implementation of From<crate::core::config::ConfigError> for ClassifyError.
///
/// This allows crate::core::config::ConfigError to be automatically converted to ClassifyError.
impl From<crate::core::config::ConfigError> for ClassifyError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::Config {
            message: error.to_string(),
        }
    }
}
