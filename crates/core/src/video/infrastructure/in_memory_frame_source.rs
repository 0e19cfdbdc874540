use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::shared::frame::PlanarFrame;
use crate::video::domain::frame_source::{FrameConsumer, FrameSource, SinkHandle};

/// Frame source fed by the caller: each pushed frame is delivered
/// synchronously, on the pushing thread, to every attached consumer in
/// attach order.
///
/// All but the last consumer get an unhooked copy; the last one gets the
/// original, so the release hook runs once. Delivery holds a read lock, so
/// `detach` waits for an in-progress delivery and consumers must not detach
/// from inside `on_frame`.
#[derive(Default)]
pub struct InMemoryFrameSource {
    consumers: RwLock<Vec<(SinkHandle, Arc<dyn FrameConsumer>)>>,
    next_id: AtomicU64,
}

impl InMemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a frame. Returns `false` (and releases the frame) when no
    /// consumer is attached.
    pub fn push(&self, frame: PlanarFrame) -> bool {
        let consumers = self
            .consumers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(((_, last), rest)) = consumers.split_last() else {
            return false;
        };
        for (_, consumer) in rest {
            consumer.on_frame(frame.duplicate());
        }
        last.on_frame(frame);
        true
    }

    pub fn attached_count(&self) -> usize {
        self.consumers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl FrameSource for InMemoryFrameSource {
    fn attach(&self, consumer: Arc<dyn FrameConsumer>) -> SinkHandle {
        let handle = SinkHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.consumers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((handle, consumer));
        handle
    }

    fn detach(&self, handle: SinkHandle) {
        self.consumers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .retain(|(h, _)| *h != handle);
    }
}
