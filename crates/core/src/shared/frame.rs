use std::fmt;

use crate::shared::error::PipelineError;

/// One plane of a planar image: raw bytes plus the row pitch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self { data, stride }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// The three planes of an I420 frame, handed back to the source on release.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FramePlanes {
    pub y: Plane,
    pub u: Plane,
    pub v: Plane,
}

/// Called once with the plane storage when a frame is released, so the
/// source can pool and reuse it.
pub type ReleaseHook = Box<dyn FnOnce(FramePlanes) + Send>;

/// A planar YUV 4:2:0 frame as delivered by the video track.
///
/// The rotation is kept exactly as the source declared it; validating it is
/// the consumer's job. Dropping the frame releases it back to its source.
pub struct PlanarFrame {
    width: u32,
    height: u32,
    planes: FramePlanes,
    rotation: i32,
    release: Option<ReleaseHook>,
}

impl PlanarFrame {
    pub fn new(width: u32, height: u32, y: Plane, u: Plane, v: Plane, rotation: i32) -> Self {
        Self {
            width,
            height,
            planes: FramePlanes { y, u, v },
            rotation,
            release: None,
        }
    }

    /// Splits a tightly packed I420 buffer (Y, then U, then V, no row
    /// padding) into a frame.
    pub fn from_i420(
        data: &[u8],
        width: u32,
        height: u32,
        rotation: i32,
    ) -> Result<Self, PipelineError> {
        let (w, h) = (width as usize, height as usize);
        let (cw, ch) = (chroma_extent(width), chroma_extent(height));
        let luma_len = w * h;
        let chroma_len = cw * ch;
        let expected = luma_len + 2 * chroma_len;
        if data.len() < expected {
            return Err(PipelineError::InvalidFrameGeometry(format!(
                "I420 buffer for {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }

        let (y, rest) = data.split_at(luma_len);
        let (u, rest) = rest.split_at(chroma_len);
        let v = &rest[..chroma_len];
        Ok(Self::new(
            width,
            height,
            Plane::new(y.to_vec(), w),
            Plane::new(u.to_vec(), cw),
            Plane::new(v.to_vec(), cw),
            rotation,
        ))
    }

    pub fn with_release(mut self, hook: ReleaseHook) -> Self {
        self.release = Some(hook);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn y(&self) -> &Plane {
        &self.planes.y
    }

    pub fn u(&self) -> &Plane {
        &self.planes.u
    }

    pub fn v(&self) -> &Plane {
        &self.planes.v
    }

    /// Rotation in clockwise degrees, as declared by the source.
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation
    }

    pub fn chroma_width(&self) -> usize {
        chroma_extent(self.width)
    }

    pub fn chroma_height(&self) -> usize {
        chroma_extent(self.height)
    }

    /// A copy of the pixels and metadata without the release hook, for
    /// handing one source frame to several consumers.
    pub fn duplicate(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            planes: self.planes.clone(),
            rotation: self.rotation,
            release: None,
        }
    }

    /// Returns the frame to its source. Equivalent to dropping it.
    pub fn release(self) {}
}

impl Drop for PlanarFrame {
    fn drop(&mut self) {
        if let Some(hook) = self.release.take() {
            hook(std::mem::take(&mut self.planes));
        }
    }
}

impl fmt::Debug for PlanarFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanarFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("strides", &[self.y().stride(), self.u().stride(), self.v().stride()])
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}

/// 4:2:0 subsampled extent: odd sizes round up.
pub fn chroma_extent(luma: u32) -> usize {
    (luma as usize).div_ceil(2)
}
