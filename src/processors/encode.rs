//! Fixed-layout image tensor encoding.
//!
//! This module converts images into the flat byte tensors consumed by
//! quantized classification models. The layout is fixed: one image per
//! tensor, row-major pixels, with the color components of each pixel
//! interleaved (NHWC). The encoder never mutates its input and produces
//! either a complete buffer or an error.

use image::DynamicImage;
use image::imageops::FilterType;
use ndarray::Array4;

use crate::core::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHANNELS, DEFAULT_INPUT_SHAPE, MAX_TENSOR_BYTES,
};
use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::processors::frame::PixelFrame;

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// The memory layout of an encoded tensor.
///
/// A spec describes the shape a model expects its input in: the batch
/// size (fixed at 1 in this pipeline), the target width and height the
/// source image is resized to, and how many color components are emitted
/// per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorSpec {
    /// Number of images per tensor; the pipeline encodes one image at a time.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Color components emitted per pixel, taken from (R, G, B) in order.
    pub channels: usize,
}

impl TensorSpec {
    /// Creates a new TensorSpec and validates it.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Number of images per tensor (must be 1).
    /// * `width` - Target width in pixels.
    /// * `height` - Target height in pixels.
    /// * `channels` - Color components per pixel (1 to 3).
    ///
    /// # Returns
    ///
    /// A validated TensorSpec, or a ClassifyError if the shape is unusable.
    pub fn new(
        batch_size: usize,
        width: u32,
        height: u32,
        channels: usize,
    ) -> ClassifyResult<Self> {
        let spec = Self {
            batch_size,
            width,
            height,
            channels,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Validates the spec.
    ///
    /// Checks that the batch size is exactly 1, that width, height, and
    /// channels are usable, and that the resulting byte length neither
    /// overflows nor exceeds [`MAX_TENSOR_BYTES`].
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ClassifyError describing the
    /// offending dimension.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.batch_size != 1 {
            return Err(ClassifyError::invalid_dimensions(format!(
                "batch size must be 1, got {}",
                self.batch_size
            )));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ClassifyError::invalid_dimensions(format!(
                "tensor dimensions must be greater than 0, got {}x{}",
                self.width, self.height
            )));
        }

        if self.channels == 0 || self.channels > 3 {
            return Err(ClassifyError::invalid_dimensions(format!(
                "channels must be between 1 and 3, got {}",
                self.channels
            )));
        }

        let byte_len = self
            .batch_size
            .checked_mul(self.width as usize)
            .and_then(|len| len.checked_mul(self.height as usize))
            .and_then(|len| len.checked_mul(self.channels))
            .ok_or_else(|| {
                ClassifyError::invalid_dimensions(format!(
                    "tensor shape ({}, {}, {}, {}) would cause integer overflow",
                    self.batch_size, self.height, self.width, self.channels
                ))
            })?;

        if byte_len > MAX_TENSOR_BYTES {
            return Err(ClassifyError::invalid_dimensions(format!(
                "tensor size {} exceeds maximum allowed size {}",
                byte_len, MAX_TENSOR_BYTES
            )));
        }

        Ok(())
    }

    /// Returns the total number of bytes an encoded tensor of this spec holds.
    ///
    /// Only meaningful for a validated spec; [`TensorSpec::validate`] proves
    /// the product cannot overflow.
    pub fn byte_len(&self) -> usize {
        self.batch_size * self.width as usize * self.height as usize * self.channels
    }
}

impl Default for TensorSpec {
    /// The layout of the default quantized classifier: 1x224x224x3.
    fn default() -> Self {
        let (width, height) = DEFAULT_INPUT_SHAPE;
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            width,
            height,
            channels: DEFAULT_CHANNELS,
        }
    }
}

/// A fixed-layout byte tensor produced by the encoder.
///
/// The bytes are stored batch-major, then row-major per image, with the
/// channel components of each pixel interleaved. The spec the tensor was
/// encoded against travels with the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTensor {
    spec: TensorSpec,
    data: Vec<u8>,
}

impl EncodedTensor {
    /// Returns the spec this tensor was encoded against.
    pub fn spec(&self) -> &TensorSpec {
        &self.spec
    }

    /// Returns the tensor bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the tensor and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes in the tensor.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies the tensor into a shaped `(batch, height, width, channels)` array.
    ///
    /// # Returns
    ///
    /// An `Array4<u8>` view of the tensor for shaped-tensor consumers, or a
    /// ClassifyError if the bytes do not fit the spec's shape.
    pub fn to_array4(&self) -> ClassifyResult<Array4<u8>> {
        let shape = (
            self.spec.batch_size,
            self.spec.height as usize,
            self.spec.width as usize,
            self.spec.channels,
        );
        Array4::from_shape_vec(shape, self.data.clone()).map_err(|e| {
            ClassifyError::invalid_dimensions(format!(
                "tensor bytes do not fit shape {:?}: {}",
                shape, e
            ))
        })
    }
}

/// An encoder producing fixed-layout byte tensors from images.
///
/// The encoder stretches the source image to the spec's exact dimensions
/// (aspect ratio is not preserved) with a smooth filter, then walks the
/// resized RGB pixels in row-major order and emits the first
/// `spec.channels` components of each pixel in R, G, B order.
#[derive(Debug, Clone)]
pub struct TensorEncoder {
    filter: FilterType,
}

impl TensorEncoder {
    /// Creates a new TensorEncoder with the default smooth filter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use image::DynamicImage;
    /// use labelkit::processors::{TensorEncoder, TensorSpec};
    ///
    /// let encoder = TensorEncoder::new();
    /// let spec = TensorSpec::new(1, 4, 4, 3)?;
    /// let tensor = encoder.encode(&DynamicImage::new_rgb8(2, 2), &spec)?;
    /// assert_eq!(tensor.len(), 48);
    /// # Ok::<(), labelkit::core::ClassifyError>(())
    /// ```
    pub fn new() -> Self {
        // Triangle (bilinear) matches smooth bitmap scaling.
        Self::with_filter(FilterType::Triangle)
    }

    /// Creates a new TensorEncoder with a custom resize filter.
    ///
    /// # Arguments
    ///
    /// * `filter` - The filter to resize source images with.
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    /// Encodes an image into a fixed-layout byte tensor.
    ///
    /// # Arguments
    ///
    /// * `image` - The source image. It is read, never mutated.
    /// * `spec` - The layout to encode into.
    ///
    /// # Returns
    ///
    /// An EncodedTensor of exactly `spec.byte_len()` bytes, or a
    /// ClassifyError if the spec or the source dimensions are unusable.
    pub fn encode(&self, image: &DynamicImage, spec: &TensorSpec) -> ClassifyResult<EncodedTensor> {
        spec.validate()?;

        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifyError::invalid_dimensions(format!(
                "source image dimensions must be greater than 0, got {}x{}",
                image.width(),
                image.height()
            )));
        }

        // Already at target size: skip the filter pass entirely.
        let rgb = if image.width() == spec.width && image.height() == spec.height {
            image.to_rgb8()
        } else {
            image
                .resize_exact(spec.width, spec.height, self.filter)
                .to_rgb8()
        };

        let mut data = Vec::with_capacity(spec.byte_len());
        for pixel in rgb.pixels() {
            data.extend_from_slice(&pixel.0[..spec.channels]);
        }

        Ok(EncodedTensor { spec: *spec, data })
    }

    /// Encodes a raw capture frame into a fixed-layout byte tensor.
    ///
    /// The frame is first converted to an RGB image; formats that cannot
    /// yield per-pixel RGB components are rejected with
    /// [`ClassifyError::UnsupportedPixelFormat`].
    ///
    /// # Arguments
    ///
    /// * `frame` - The raw capture frame.
    /// * `spec` - The layout to encode into.
    ///
    /// # Returns
    ///
    /// An EncodedTensor of exactly `spec.byte_len()` bytes, or a ClassifyError.
    pub fn encode_frame(
        &self,
        frame: &PixelFrame,
        spec: &TensorSpec,
    ) -> ClassifyResult<EncodedTensor> {
        let image = frame.to_image()?;
        self.encode(&image, spec)
    }
}

impl Default for TensorEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_encode_length_matches_spec() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 8, 6, 3).unwrap();

        let tensor = encoder.encode(&solid_rgb(32, 24, [1, 2, 3]), &spec).unwrap();
        assert_eq!(tensor.len(), 8 * 6 * 3);
        assert_eq!(tensor.len(), spec.byte_len());
    }

    #[test]
    fn test_encode_upscales_small_bitmap() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 4, 4, 3).unwrap();

        let tensor = encoder.encode(&solid_rgb(2, 2, [5, 6, 7]), &spec).unwrap();
        assert_eq!(tensor.len(), 48);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 4, 4, 3).unwrap();
        let image = solid_rgb(16, 8, [40, 80, 120]);

        let first = encoder.encode(&image, &spec).unwrap();
        let second = encoder.encode(&image, &spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_emits_rgb_order() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 4, 4, 3).unwrap();

        // A constant image survives any resize filter unchanged.
        let tensor = encoder.encode(&solid_rgb(4, 4, [10, 200, 30]), &spec).unwrap();
        for triplet in tensor.as_bytes().chunks(3) {
            assert_eq!(triplet, [10, 200, 30]);
        }
    }

    #[test]
    fn test_encode_row_major_order() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 2, 2, 3).unwrap();

        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([1, 2, 3]));
        image.put_pixel(1, 0, Rgb([4, 5, 6]));
        image.put_pixel(0, 1, Rgb([7, 8, 9]));
        image.put_pixel(1, 1, Rgb([10, 11, 12]));

        let tensor = encoder
            .encode(&DynamicImage::ImageRgb8(image), &spec)
            .unwrap();
        assert_eq!(
            tensor.as_bytes(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_encode_channel_prefix() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 4, 4, 1).unwrap();

        let tensor = encoder.encode(&solid_rgb(4, 4, [10, 200, 30]), &spec).unwrap();
        assert_eq!(tensor.len(), 16);
        assert!(tensor.as_bytes().iter().all(|&byte| byte == 10));
    }

    #[test]
    fn test_encode_drops_alpha() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 2, 2, 3).unwrap();
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 200, 30, 128])));

        let tensor = encoder.encode(&image, &spec).unwrap();
        for triplet in tensor.as_bytes().chunks(3) {
            assert_eq!(triplet, [10, 200, 30]);
        }
    }

    #[test]
    fn test_encode_rejects_zero_source() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 4, 4, 3).unwrap();

        let result = encoder.encode(&DynamicImage::new_rgb8(0, 0), &spec);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn test_spec_rejects_bad_batch() {
        let result = TensorSpec::new(2, 4, 4, 3);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn test_spec_rejects_zero_dimensions() {
        assert!(TensorSpec::new(1, 0, 4, 3).is_err());
        assert!(TensorSpec::new(1, 4, 0, 3).is_err());
    }

    #[test]
    fn test_spec_rejects_bad_channels() {
        assert!(TensorSpec::new(1, 4, 4, 0).is_err());
        assert!(TensorSpec::new(1, 4, 4, 4).is_err());
    }

    #[test]
    fn test_spec_rejects_oversized_tensor() {
        let result = TensorSpec::new(1, 20_000, 20_000, 3);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn test_spec_rejects_overflowing_tensor() {
        let result = TensorSpec::new(1, u32::MAX, u32::MAX, 3);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidDimensions { .. }
        ));
    }

    #[test]
    fn test_spec_default_is_valid() {
        let spec = TensorSpec::default();
        assert!(spec.validate().is_ok());
        assert_eq!(spec.byte_len(), 224 * 224 * 3);
    }

    #[test]
    fn test_spec_deserializes_with_default_batch() {
        let spec: TensorSpec =
            serde_json::from_str(r#"{"width": 224, "height": 224, "channels": 3}"#).unwrap();
        assert_eq!(spec.batch_size, 1);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_to_array4_shape() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 3, 2, 3).unwrap();

        let tensor = encoder.encode(&solid_rgb(3, 2, [7, 8, 9]), &spec).unwrap();
        let array = tensor.to_array4().unwrap();
        assert_eq!(array.dim(), (1, 2, 3, 3));
        assert_eq!(array[[0, 1, 2, 1]], 8);
    }

    #[test]
    fn test_encoded_tensor_accessors() {
        let encoder = TensorEncoder::new();
        let spec = TensorSpec::new(1, 2, 2, 3).unwrap();

        let tensor = encoder.encode(&solid_rgb(2, 2, [1, 2, 3]), &spec).unwrap();
        assert_eq!(tensor.spec(), &spec);
        assert!(!tensor.is_empty());
        assert_eq!(tensor.as_bytes().len(), tensor.len());
        assert_eq!(tensor.into_bytes().len(), 12);
    }
}
