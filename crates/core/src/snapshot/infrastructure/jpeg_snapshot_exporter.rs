use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};

use crate::shared::constants::JPEG_QUALITY;
use crate::shared::error::PipelineError;
use crate::shared::frame::PlanarFrame;
use crate::shared::rotation::Rotation;
use crate::snapshot::domain::snapshot_exporter::SnapshotExporter;
use crate::video::domain::pixel_converter::PixelConverter;

/// Exports frames as JPEG using the `image` crate.
///
/// The frame is encoded over its full rectangle first. A rotated frame is
/// then decoded from those bytes, turned clockwise by its declared rotation
/// and encoded again; the unrotated intermediate is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegSnapshotExporter {
    converter: PixelConverter,
}

impl JpegSnapshotExporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotExporter for JpegSnapshotExporter {
    fn export(&self, frame: &PlanarFrame) -> Result<Vec<u8>, PipelineError> {
        let rotation = Rotation::from_degrees(frame.rotation_degrees())?;
        let packed = self.converter.convert(frame)?;
        let upright = encode_jpeg(&packed.to_rgb())?;

        if rotation == Rotation::Deg0 {
            return Ok(upright);
        }

        let decoded = image::load_from_memory_with_format(&upright, ImageFormat::Jpeg)?;
        encode_jpeg(&rotate(decoded, rotation).to_rgb8())
    }
}

fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::Deg0 => image,
        Rotation::Deg90 => image.rotate90(),
        Rotation::Deg180 => image.rotate180(),
        Rotation::Deg270 => image.rotate270(),
    }
}

fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let mut bytes = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(image)?;
    Ok(bytes.into_inner())
}
