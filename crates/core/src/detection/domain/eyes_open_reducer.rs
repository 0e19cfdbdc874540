use crate::detection::domain::detection_outcome::DetectionOutcome;
use crate::shared::constants::EYE_OPEN_THRESHOLD;
use crate::shared::error::PipelineError;

/// Reduces one detection outcome to the event a listener receives.
///
/// Each eye is compared against [`EYE_OPEN_THRESHOLD`] independently with a
/// strict greater-than; the scores are never averaged.
pub fn reduce(outcome: DetectionOutcome) -> Result<bool, PipelineError> {
    match outcome {
        DetectionOutcome::Face {
            left_eye_open_probability: Some(left),
            right_eye_open_probability: Some(right),
        } => Ok(left > EYE_OPEN_THRESHOLD && right > EYE_OPEN_THRESHOLD),
        DetectionOutcome::Face { .. } => Err(PipelineError::MissingLandmarkData),
        DetectionOutcome::NoFace => Err(PipelineError::FaceCountMismatch { count: 0 }),
        DetectionOutcome::MultipleFaces(count) => Err(PipelineError::FaceCountMismatch { count }),
        DetectionOutcome::DetectorFailure(message) => Err(PipelineError::DetectorError(message)),
    }
}
