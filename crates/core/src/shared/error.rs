use std::fmt;

use thiserror::Error;

/// Every failure a frame can produce on its way through a stream.
///
/// None of these are fatal: the stream reports the error for the offending
/// frame (or detection cycle) and keeps accepting frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid frame geometry: {0}")]
    InvalidFrameGeometry(String),
    #[error("invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation(i32),
    #[error("i/o failure: {0}")]
    IoFailure(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("left or right eye open probability is missing")]
    MissingLandmarkData,
    #[error("expected exactly one face on frame, found {count}")]
    FaceCountMismatch { count: usize },
    #[error("face detector failed: {0}")]
    DetectorError(String),
}

/// Stable, listener-facing classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFrameGeometry,
    InvalidRotation,
    IoFailure,
    InvalidArgument,
    MissingLandmarkData,
    FaceCountMismatch,
    DetectorError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidFrameGeometry => "InvalidFrameGeometry",
            ErrorKind::InvalidRotation => "InvalidRotation",
            ErrorKind::IoFailure => "IOFailure",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::MissingLandmarkData => "MissingLandmarkData",
            ErrorKind::FaceCountMismatch => "FaceCountMismatch",
            ErrorKind::DetectorError => "DetectorError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidFrameGeometry(_) => ErrorKind::InvalidFrameGeometry,
            PipelineError::InvalidRotation(_) => ErrorKind::InvalidRotation,
            PipelineError::IoFailure(_) => ErrorKind::IoFailure,
            PipelineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PipelineError::MissingLandmarkData => ErrorKind::MissingLandmarkData,
            PipelineError::FaceCountMismatch { .. } => ErrorKind::FaceCountMismatch,
            PipelineError::DetectorError(_) => ErrorKind::DetectorError,
        }
    }

    /// Extra payload for the listener, when the error carries one.
    pub fn details(&self) -> Option<String> {
        match self {
            PipelineError::InvalidRotation(degrees) => Some(degrees.to_string()),
            PipelineError::FaceCountMismatch { count } => Some(count.to_string()),
            PipelineError::DetectorError(message) => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => PipelineError::IoFailure(io.to_string()),
            other => PipelineError::InvalidArgument(other.to_string()),
        }
    }
}
