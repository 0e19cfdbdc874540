use std::sync::Arc;

use crate::pipeline::event_sink::{EventProducer, EventSink, ListenerSlot};
use crate::pipeline::single_flight::SingleFlight;
use crate::shared::frame::PlanarFrame;
use crate::shared::settings::SnapshotAdmission;
use crate::snapshot::domain::snapshot_exporter::SnapshotExporter;
use crate::video::domain::frame_source::{FrameConsumer, FrameSource, SinkHandle};

/// JPEG snapshot event channel over a video track.
///
/// Exports run synchronously on the delivering thread. With
/// [`SnapshotAdmission::All`] every delivered frame yields one event; with
/// [`SnapshotAdmission::SingleFlight`] frames that arrive while another
/// export is running are dropped.
pub struct SnapshotStream {
    source: Arc<dyn FrameSource>,
    consumer: Arc<ExportConsumer>,
    handle: Option<SinkHandle>,
}

struct ExportConsumer {
    exporter: Box<dyn SnapshotExporter>,
    admission: SnapshotAdmission,
    flight: SingleFlight,
    listener: ListenerSlot<Vec<u8>>,
}

impl ExportConsumer {
    fn export(&self, frame: PlanarFrame) {
        let event = self.exporter.export(&frame);
        frame.release();
        if let Err(e) = &event {
            log::warn!("Snapshot export failed: {e}");
        }
        self.listener.emit(event);
    }
}

impl FrameConsumer for ExportConsumer {
    fn on_frame(&self, frame: PlanarFrame) {
        match self.admission {
            SnapshotAdmission::All => self.export(frame),
            SnapshotAdmission::SingleFlight => match self.flight.try_acquire() {
                Some(_guard) => self.export(frame),
                None => log::trace!("Snapshot export in progress, dropping frame"),
            },
        }
    }
}

impl SnapshotStream {
    pub fn new(
        source: Arc<dyn FrameSource>,
        exporter: Box<dyn SnapshotExporter>,
        admission: SnapshotAdmission,
    ) -> Self {
        Self {
            source,
            consumer: Arc::new(ExportConsumer {
                exporter,
                admission,
                flight: SingleFlight::new(),
                listener: ListenerSlot::new(),
            }),
            handle: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }
}

impl EventProducer<Vec<u8>> for SnapshotStream {
    fn start(&mut self, listener: Arc<dyn EventSink<Vec<u8>>>) {
        log::debug!("Snapshot stream started");
        self.consumer.listener.set(Some(listener));
        if self.handle.is_none() {
            self.handle = Some(self.source.attach(self.consumer.clone()));
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("Snapshot stream stopped");
            self.source.detach(handle);
        }
        self.consumer.listener.set(None);
    }
}

impl Drop for SnapshotStream {
    fn drop(&mut self) {
        self.stop();
    }
}
