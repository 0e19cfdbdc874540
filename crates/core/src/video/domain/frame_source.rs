use std::sync::Arc;

use crate::shared::frame::PlanarFrame;

/// Receives frames pushed by a [`FrameSource`].
///
/// Called on whatever thread the source delivers on; implementations must
/// return quickly and must not block on downstream work.
pub trait FrameConsumer: Send + Sync {
    fn on_frame(&self, frame: PlanarFrame);
}

/// Identifies one attachment so it can be detached later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkHandle(pub u64);

/// A live video track that pushes frames to attached consumers.
///
/// No frame is delivered to a consumer after its `detach` returns.
pub trait FrameSource: Send + Sync {
    fn attach(&self, consumer: Arc<dyn FrameConsumer>) -> SinkHandle;
    fn detach(&self, handle: SinkHandle);
}
