//! Planar I420 → semi-planar NV21 repacking.
//!
//! Luma rows are copied verbatim; chroma is interleaved V-first. The U and V
//! planes are walked with their own strides since sources are free to pad
//! them differently.

use crate::shared::error::PipelineError;
use crate::shared::frame::{PlanarFrame, Plane};
use crate::shared::packed_buffer::{packed_len, PackedBuffer, PixelFormat};

#[derive(Debug, Clone, Copy, Default)]
pub struct PixelConverter;

impl PixelConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, frame: &PlanarFrame) -> Result<PackedBuffer, PipelineError> {
        validate(frame)?;

        let w = frame.width() as usize;
        let h = frame.height() as usize;
        let cw = frame.chroma_width();
        let ch = frame.chroma_height();

        let mut out = Vec::with_capacity(packed_len(frame.width(), frame.height()));

        let y = frame.y();
        for row in 0..h {
            out.extend_from_slice(&y.data()[row * y.stride()..][..w]);
        }

        let (u, v) = (frame.u(), frame.v());
        for row in 0..ch {
            let u_row = &u.data()[row * u.stride()..][..cw];
            let v_row = &v.data()[row * v.stride()..][..cw];
            for (&vs, &us) in v_row.iter().zip(u_row) {
                out.push(vs);
                out.push(us);
            }
        }

        PackedBuffer::new(
            out,
            frame.width(),
            frame.height(),
            [y.stride(), u.stride(), v.stride()],
            PixelFormat::Nv21,
        )
    }
}

fn validate(frame: &PlanarFrame) -> Result<(), PipelineError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(PipelineError::InvalidFrameGeometry(format!(
            "frame dimensions must be positive, got {}x{}",
            frame.width(),
            frame.height()
        )));
    }
    check_plane("Y", frame.y(), frame.width() as usize, frame.height() as usize)?;
    check_plane("U", frame.u(), frame.chroma_width(), frame.chroma_height())?;
    check_plane("V", frame.v(), frame.chroma_width(), frame.chroma_height())
}

fn check_plane(name: &str, plane: &Plane, row_width: usize, rows: usize) -> Result<(), PipelineError> {
    if plane.stride() < row_width {
        return Err(PipelineError::InvalidFrameGeometry(format!(
            "{name} stride {} is shorter than row width {row_width}",
            plane.stride()
        )));
    }
    let Some(required) = plane.stride().checked_mul(rows) else {
        return Err(PipelineError::InvalidFrameGeometry(format!(
            "{name} stride {} over {rows} rows overflows the address space",
            plane.stride()
        )));
    };
    if plane.data().len() < required {
        return Err(PipelineError::InvalidFrameGeometry(format!(
            "{name} plane holds {} bytes, needs {required} ({} x {rows})",
            plane.data().len(),
            plane.stride()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Builds a frame whose planes are padded to the given strides. Luma
    /// samples are `row * 16 + col`, U samples `100 + i`, V samples `200 + i`,
    /// and padding bytes are 0xEE so leaks show up.
    fn padded_frame(width: u32, height: u32, strides: [usize; 3]) -> PlanarFrame {
        let (w, h) = (width as usize, height as usize);
        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));

        let mut y = vec![0xEE; strides[0] * h];
        for row in 0..h {
            for col in 0..w {
                y[row * strides[0] + col] = (row * 16 + col) as u8;
            }
        }
        let chroma = |stride: usize, base: u8| {
            let mut plane = vec![0xEE; stride * ch];
            for row in 0..ch {
                for col in 0..cw {
                    plane[row * stride + col] = base.wrapping_add((row * cw + col) as u8);
                }
            }
            plane
        };

        PlanarFrame::new(
            width,
            height,
            Plane::new(y, strides[0]),
            Plane::new(chroma(strides[1], 100), strides[1]),
            Plane::new(chroma(strides[2], 200), strides[2]),
            0,
        )
    }

    #[rstest]
    #[case::even(4, 4)]
    #[case::odd_width(5, 4)]
    #[case::odd_height(4, 5)]
    #[case::odd_both(7, 3)]
    #[case::single_pixel(1, 1)]
    #[case::hd(1280, 720)]
    fn test_output_length_is_exact(#[case] width: u32, #[case] height: u32) {
        let cw = (width as usize).div_ceil(2);
        let frame = padded_frame(width, height, [width as usize + 3, cw + 1, cw + 5]);

        let packed = PixelConverter::new().convert(&frame).unwrap();

        let ch = (height as usize).div_ceil(2);
        let expected = (width * height) as usize + 2 * cw * ch;
        assert_eq!(packed.data().len(), expected);
        assert_eq!(packed.width(), width);
        assert_eq!(packed.height(), height);
    }

    #[test]
    fn test_luma_rows_skip_padding() {
        let frame = padded_frame(3, 2, [8, 2, 2]);
        let packed = PixelConverter::new().convert(&frame).unwrap();
        assert_eq!(&packed.data()[..6], &[0, 1, 2, 16, 17, 18]);
    }

    #[test]
    fn test_chroma_is_interleaved_v_first() {
        let frame = padded_frame(4, 2, [4, 2, 2]);
        let packed = PixelConverter::new().convert(&frame).unwrap();
        assert_eq!(&packed.data()[8..], &[200, 100, 201, 101]);
        assert_eq!(packed.format(), PixelFormat::Nv21);
    }

    #[test]
    fn test_chroma_strides_are_independent() {
        // U padded by 1, V padded by 4; an odd 5x3 frame has 3x2 chroma.
        let frame = padded_frame(5, 3, [5, 4, 7]);
        let packed = PixelConverter::new().convert(&frame).unwrap();
        assert_eq!(
            &packed.data()[15..],
            &[200, 100, 201, 101, 202, 102, 203, 103, 204, 104, 205, 105]
        );
        assert!(!packed.data().contains(&0xEE));
    }

    #[test]
    fn test_source_strides_retained() {
        let frame = padded_frame(4, 4, [6, 3, 4]);
        let packed = PixelConverter::new().convert(&frame).unwrap();
        assert_eq!(packed.source_strides(), [6, 3, 4]);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let converter = PixelConverter::new();
        let a = converter.convert(&padded_frame(6, 5, [8, 4, 3])).unwrap();
        let b = converter.convert(&padded_frame(6, 5, [8, 4, 3])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let frame = PlanarFrame::new(
            0,
            4,
            Plane::default(),
            Plane::default(),
            Plane::default(),
            0,
        );
        let err = PixelConverter::new().convert(&frame).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFrameGeometry(_)));
    }

    #[test]
    fn test_short_luma_stride_rejected() {
        let frame = PlanarFrame::new(
            4,
            2,
            Plane::new(vec![0; 8], 3),
            Plane::new(vec![0; 2], 2),
            Plane::new(vec![0; 2], 2),
            0,
        );
        let err = PixelConverter::new().convert(&frame).unwrap_err();
        assert!(err.to_string().contains("Y stride 3"));
    }

    #[test]
    fn test_truncated_chroma_plane_rejected() {
        let frame = PlanarFrame::new(
            4,
            4,
            Plane::new(vec![0; 16], 4),
            Plane::new(vec![0; 4], 2),
            Plane::new(vec![0; 3], 2),
            0,
        );
        let err = PixelConverter::new().convert(&frame).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFrameGeometry(_)));
        assert!(err.to_string().contains("V plane holds 3 bytes"));
    }

    #[rstest]
    #[case::luma_overflows([usize::MAX / 2 + 1, 2, 2])]
    #[case::luma_huge([usize::MAX / 8, 2, 2])]
    #[case::chroma_overflows([4, usize::MAX / 2 + 1, 2])]
    #[case::chroma_huge([4, 2, usize::MAX / 4])]
    fn test_huge_stride_rejected(#[case] strides: [usize; 3]) {
        let frame = PlanarFrame::new(
            4,
            4,
            Plane::new(vec![0; 16], strides[0]),
            Plane::new(vec![0; 4], strides[1]),
            Plane::new(vec![0; 4], strides[2]),
            0,
        );
        let err = PixelConverter::new().convert(&frame).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFrameGeometry(_)));
    }
}
