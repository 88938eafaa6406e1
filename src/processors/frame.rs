//! Raw capture frame handling.
//!
//! This module carries pixel buffers as they arrive from capture sources
//! (camera pipelines, screen grabbers) before they become images. A frame
//! knows its pixel format; converting it to an image is where formats
//! that cannot yield per-pixel RGB components are rejected.

use std::fmt;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::core::errors::{ClassifyError, ClassifyResult};

/// The pixel format of a raw capture frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 8-bit RGB, 3 bytes per pixel.
    Rgb8,
    /// Packed 8-bit RGBA, 4 bytes per pixel.
    Rgba8,
    /// Packed 8-bit BGRA, 4 bytes per pixel.
    Bgra8,
    /// Single 8-bit luminance channel, 1 byte per pixel.
    Gray8,
    /// Planar YUV 4:2:0 with interleaved chroma. Not convertible here.
    Nv12,
}

impl PixelFormat {
    /// Returns the bytes per pixel for packed formats, or None for planar ones.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Rgb8 => Some(3),
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => Some(4),
            PixelFormat::Gray8 => Some(1),
            PixelFormat::Nv12 => None,
        }
    }

    /// Returns the buffer length a frame of this format must have.
    ///
    /// Returns None if the computation would overflow.
    fn expected_len(&self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        match self.bytes_per_pixel() {
            Some(bpp) => pixels.checked_mul(bpp),
            None => {
                // NV12: full-resolution Y plane plus a half-resolution
                // interleaved UV plane.
                let chroma_width = width.div_ceil(2) as usize;
                let chroma_height = height.div_ceil(2) as usize;
                let chroma = chroma_width.checked_mul(chroma_height)?.checked_mul(2)?;
                pixels.checked_add(chroma)
            }
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb8 => write!(f, "RGB8"),
            PixelFormat::Rgba8 => write!(f, "RGBA8"),
            PixelFormat::Bgra8 => write!(f, "BGRA8"),
            PixelFormat::Gray8 => write!(f, "GRAY8"),
            PixelFormat::Nv12 => write!(f, "NV12"),
        }
    }
}

/// A raw pixel buffer captured from a camera or screen source.
#[derive(Debug, Clone)]
pub struct PixelFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl PixelFrame {
    /// Creates a new PixelFrame, checking the buffer against its format.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw pixel bytes.
    /// * `width` - Frame width in pixels.
    /// * `height` - Frame height in pixels.
    /// * `format` - The layout of the bytes in `data`.
    ///
    /// # Returns
    ///
    /// A PixelFrame, or a ClassifyError if the buffer length does not
    /// match what the format requires for these dimensions.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> ClassifyResult<Self> {
        let expected = format.expected_len(width, height).ok_or_else(|| {
            ClassifyError::invalid_argument(format!(
                "frame dimensions {}x{} would cause integer overflow",
                width, height
            ))
        })?;

        if data.len() != expected {
            return Err(ClassifyError::invalid_argument(format!(
                "frame buffer length {} does not match {}x{} {}, expected {}",
                data.len(),
                width,
                height,
                format,
                expected
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the frame dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the pixel format of the frame.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the raw pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Converts the frame into an image with per-pixel RGB components.
    ///
    /// Packed formats are decoded in place; BGRA is swizzled to RGB and
    /// grayscale expands to equal R, G, B components downstream. Planar
    /// formats are rejected.
    ///
    /// # Returns
    ///
    /// A DynamicImage, or [`ClassifyError::UnsupportedPixelFormat`] if the
    /// format cannot yield per-pixel RGB components.
    pub fn to_image(&self) -> ClassifyResult<DynamicImage> {
        match self.format {
            PixelFormat::Rgb8 => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| self.buffer_mismatch()),
            PixelFormat::Rgba8 => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(|| self.buffer_mismatch()),
            PixelFormat::Bgra8 => {
                let mut rgb = Vec::with_capacity(self.data.len() / 4 * 3);
                for pixel in self.data.chunks_exact(4) {
                    rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
                }
                RgbImage::from_raw(self.width, self.height, rgb)
                    .map(DynamicImage::ImageRgb8)
                    .ok_or_else(|| self.buffer_mismatch())
            }
            PixelFormat::Gray8 => GrayImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| self.buffer_mismatch()),
            PixelFormat::Nv12 => Err(ClassifyError::unsupported_pixel_format(
                self.format.to_string(),
            )),
        }
    }

    fn buffer_mismatch(&self) -> ClassifyError {
        ClassifyError::invalid_argument(format!(
            "frame buffer does not match {}x{} {}",
            self.width, self.height, self.format
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::{TensorEncoder, TensorSpec};

    #[test]
    fn test_frame_rgb_to_image() {
        let data = vec![
            10, 20, 30, 40, 50, 60, //
            70, 80, 90, 100, 110, 120,
        ];
        let frame = PixelFrame::new(data, 2, 2, PixelFormat::Rgb8).unwrap();
        assert_eq!(frame.dimensions(), (2, 2));
        assert_eq!(frame.format(), PixelFormat::Rgb8);
        assert_eq!(frame.as_bytes().len(), 12);

        let image = frame.to_image().unwrap().to_rgb8();
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(image.get_pixel(1, 1).0, [100, 110, 120]);
    }

    #[test]
    fn test_frame_bgra_swizzles_to_rgb() {
        let data = vec![1, 2, 3, 255, 4, 5, 6, 255];
        let frame = PixelFrame::new(data, 2, 1, PixelFormat::Bgra8).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);

        let image = frame.to_image().unwrap().to_rgb8();
        assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1]);
        assert_eq!(image.get_pixel(1, 0).0, [6, 5, 4]);
    }

    #[test]
    fn test_frame_gray_replicates_channels() {
        let frame = PixelFrame::new(vec![9, 9, 9, 9], 2, 2, PixelFormat::Gray8).unwrap();

        let image = frame.to_image().unwrap().to_rgb8();
        assert_eq!(image.get_pixel(1, 1).0, [9, 9, 9]);
    }

    #[test]
    fn test_frame_nv12_is_unsupported() {
        // 2x2 NV12: 4 luma bytes plus one interleaved UV pair.
        let frame = PixelFrame::new(vec![0; 6], 2, 2, PixelFormat::Nv12).unwrap();

        let err = frame.to_image().unwrap_err();
        match err {
            ClassifyError::UnsupportedPixelFormat { format } => assert_eq!(format, "NV12"),
            other => panic!("Expected UnsupportedPixelFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_rejects_short_buffer() {
        let result = PixelFrame::new(vec![0; 11], 2, 2, PixelFormat::Rgb8);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_frame_encodes_through_encoder() {
        let frame = PixelFrame::new(vec![128; 2 * 2 * 4], 2, 2, PixelFormat::Rgba8).unwrap();
        let spec = TensorSpec::new(1, 4, 4, 3).unwrap();

        let tensor = TensorEncoder::new().encode_frame(&frame, &spec).unwrap();
        assert_eq!(tensor.len(), 48);
        assert!(tensor.as_bytes().iter().all(|&byte| byte == 128));
    }
}
