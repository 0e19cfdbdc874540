use std::fmt;

use crate::shared::packed_buffer::{PackedBuffer, PixelFormat};
use crate::shared::rotation::Rotation;

/// One face reported by a detector, with optional eye classification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetectedFace {
    /// Probability in `[0, 1]`; `None` when the detector could not classify.
    pub left_eye_open_probability: Option<f32>,
    pub right_eye_open_probability: Option<f32>,
}

impl DetectedFace {
    pub fn new(left: Option<f32>, right: Option<f32>) -> Self {
        Self {
            left_eye_open_probability: left,
            right_eye_open_probability: right,
        }
    }
}

/// Everything a detector needs to analyze one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRequest {
    pub buffer: PackedBuffer,
    pub width: u32,
    pub height: u32,
    /// Passed through unmodified from the rotation normalizer.
    pub orientation: Rotation,
    pub format: PixelFormat,
}

impl DetectionRequest {
    pub fn new(buffer: PackedBuffer, orientation: Rotation) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            format: buffer.format(),
            buffer,
            orientation,
        }
    }
}

/// Raw result of one detection: the faces found, or the detector's error
/// message.
pub type DetectionResult = Result<Vec<DetectedFace>, String>;

type Callback = Box<dyn FnOnce(DetectionResult) + Send>;

/// Single-use completion handle for one submitted request.
///
/// `resolve` consumes the responder, so a request can complete at most once.
/// A responder dropped without resolving completes with a failure, so it
/// also completes at least once.
pub struct DetectionResponder {
    callback: Option<Callback>,
}

impl DetectionResponder {
    pub fn new(callback: impl FnOnce(DetectionResult) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn resolve(mut self, result: DetectionResult) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl Drop for DetectionResponder {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(Err("detector dropped the request without resolving it".into()));
        }
    }
}

impl fmt::Debug for DetectionResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionResponder")
            .field("resolved", &self.callback.is_none())
            .finish()
    }
}

/// Asynchronous face detection.
///
/// `submit` must not block on the detection itself: it hands the request off
/// and returns. The responder is resolved later, from any thread.
pub trait FaceDetector: Send + Sync {
    fn submit(&self, request: DetectionRequest, responder: DetectionResponder);
}
