use crate::shared::error::PipelineError;
use crate::shared::frame::PlanarFrame;

/// Turns one frame into a standalone encoded image, upright relative to the
/// frame's declared rotation.
pub trait SnapshotExporter: Send + Sync {
    fn export(&self, frame: &PlanarFrame) -> Result<Vec<u8>, PipelineError>;
}
