use std::fmt;

use image::RgbImage;

use crate::shared::error::PipelineError;
use crate::shared::frame::chroma_extent;

/// Semi-planar layouts a [`PackedBuffer`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Full-resolution Y plane followed by interleaved V/U pairs.
    Nv21,
}

impl PixelFormat {
    pub fn fourcc(&self) -> &'static str {
        match self {
            PixelFormat::Nv21 => "NV21",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fourcc())
    }
}

/// A contiguous semi-planar 4:2:0 image produced from a planar frame.
///
/// The strides of the source planes are retained for consumers that want
/// them; the packed data itself has no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    source_strides: [usize; 3],
    format: PixelFormat,
}

impl PackedBuffer {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        source_strides: [usize; 3],
        format: PixelFormat,
    ) -> Result<Self, PipelineError> {
        let expected = packed_len(width, height);
        if data.len() != expected {
            return Err(PipelineError::InvalidFrameGeometry(format!(
                "packed {width}x{height} buffer must hold {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            source_strides,
            format,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Strides of the original Y, U and V planes.
    pub fn source_strides(&self) -> [usize; 3] {
        self.source_strides
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Converts to 8-bit RGB with full-range JFIF coefficients, the color
    /// space JPEG encoders expect.
    pub fn to_rgb(&self) -> RgbImage {
        let w = self.width as usize;
        let h = self.height as usize;
        let chroma_row = chroma_extent(self.width) * 2;
        let (luma, chroma) = self.data.split_at(w * h);

        let mut pixels = Vec::with_capacity(w * h * 3);
        for row in 0..h {
            let pairs = &chroma[(row / 2) * chroma_row..][..chroma_row];
            for col in 0..w {
                let y = luma[row * w + col] as f32;
                let (v, u) = match self.format {
                    PixelFormat::Nv21 => (pairs[(col / 2) * 2], pairs[(col / 2) * 2 + 1]),
                };
                pixels.extend_from_slice(&ycbcr_to_rgb(y, u as f32 - 128.0, v as f32 - 128.0));
            }
        }

        RgbImage::from_raw(self.width, self.height, pixels)
            .expect("RGB pixel count must match dimensions")
    }
}

/// Exact packed size for a `width` x `height` 4:2:0 image.
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) + 2 * chroma_extent(width) * chroma_extent(height)
}

fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> [u8; 3] {
    let r = y + 1.402 * cr;
    let g = y - 0.344_136 * cb - 0.714_136 * cr;
    let b = y + 1.772 * cb;
    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
