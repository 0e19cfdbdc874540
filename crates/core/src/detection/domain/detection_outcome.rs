use crate::detection::domain::face_detector::{DetectedFace, DetectionResult};

/// A detection result classified by face count.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    NoFace,
    MultipleFaces(usize),
    Face {
        left_eye_open_probability: Option<f32>,
        right_eye_open_probability: Option<f32>,
    },
    DetectorFailure(String),
}

impl DetectionOutcome {
    pub fn from_faces(faces: &[DetectedFace]) -> Self {
        match faces {
            [] => DetectionOutcome::NoFace,
            [face] => DetectionOutcome::Face {
                left_eye_open_probability: face.left_eye_open_probability,
                right_eye_open_probability: face.right_eye_open_probability,
            },
            many => DetectionOutcome::MultipleFaces(many.len()),
        }
    }
}

impl From<DetectionResult> for DetectionOutcome {
    fn from(result: DetectionResult) -> Self {
        match result {
            Ok(faces) => DetectionOutcome::from_faces(&faces),
            Err(message) => DetectionOutcome::DetectorFailure(message),
        }
    }
}
