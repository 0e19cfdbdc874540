use std::sync::Arc;

use crate::pipeline::event_sink::{EventProducer, EventSink, ListenerSlot};
use crate::pipeline::eyes_open_gate::EyesOpenGate;
use crate::shared::frame::PlanarFrame;
use crate::video::domain::frame_source::{FrameConsumer, FrameSource, SinkHandle};

/// Eyes-open event channel over a video track.
///
/// `start` attaches the gate to the track; `stop` detaches it. A detection
/// still running at `stop` completes and resets the gate, but its event is
/// dropped.
pub struct EyesOpenStream {
    source: Arc<dyn FrameSource>,
    consumer: Arc<GateConsumer>,
    handle: Option<SinkHandle>,
}

struct GateConsumer {
    gate: EyesOpenGate,
    listener: Arc<ListenerSlot<bool>>,
}

impl FrameConsumer for GateConsumer {
    fn on_frame(&self, frame: PlanarFrame) {
        let listener = Arc::clone(&self.listener);
        self.gate.offer(frame, move |event| {
            if let Err(e) = &event {
                log::warn!("Eyes-open detection failed: {e}");
            }
            listener.emit(event);
        });
    }
}

impl EyesOpenStream {
    pub fn new(source: Arc<dyn FrameSource>, gate: EyesOpenGate) -> Self {
        Self {
            source,
            consumer: Arc::new(GateConsumer {
                gate,
                listener: Arc::new(ListenerSlot::new()),
            }),
            handle: None,
        }
    }

    pub fn gate(&self) -> &EyesOpenGate {
        &self.consumer.gate
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }
}

impl EventProducer<bool> for EyesOpenStream {
    fn start(&mut self, listener: Arc<dyn EventSink<bool>>) {
        log::debug!("Eyes-open stream started");
        self.consumer.listener.set(Some(listener));
        if self.handle.is_none() {
            self.handle = Some(self.source.attach(self.consumer.clone()));
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("Eyes-open stream stopped");
            self.source.detach(handle);
        }
        self.consumer.listener.set(None);
    }
}

impl Drop for EyesOpenStream {
    fn drop(&mut self) {
        self.stop();
    }
}
