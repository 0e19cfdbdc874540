use std::sync::{Arc, RwLock};

use crate::shared::error::PipelineError;

/// One listener-facing event: a value, or an error with kind and details.
pub type StreamEvent<T> = Result<T, PipelineError>;

/// Listener side of an event channel.
pub trait EventSink<T>: Send + Sync {
    fn emit(&self, event: StreamEvent<T>);
}

impl<T: Send> EventSink<T> for crossbeam_channel::Sender<StreamEvent<T>> {
    fn emit(&self, event: StreamEvent<T>) {
        if self.send(event).is_err() {
            log::debug!("Event listener hung up, dropping event");
        }
    }
}

/// A stream that delivers events to one listener between `start` and `stop`.
pub trait EventProducer<T> {
    /// Attaches to the frame source and routes events to `listener`.
    /// Starting an already started stream replaces the listener.
    fn start(&mut self, listener: Arc<dyn EventSink<T>>);

    /// Detaches from the frame source. Events still in flight are dropped.
    fn stop(&mut self);
}

/// The listener a stream currently emits to, shared with in-flight work.
pub(crate) struct ListenerSlot<T> {
    listener: RwLock<Option<Arc<dyn EventSink<T>>>>,
}

impl<T> ListenerSlot<T> {
    pub(crate) fn new() -> Self {
        Self {
            listener: RwLock::new(None),
        }
    }

    pub(crate) fn set(&self, listener: Option<Arc<dyn EventSink<T>>>) {
        *self
            .listener
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = listener;
    }

    /// Emits to the current listener; without one the event is dropped.
    pub(crate) fn emit(&self, event: StreamEvent<T>) {
        let listener = self
            .listener
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        match listener {
            Some(listener) => listener.emit(event),
            None => log::debug!("No listener attached, dropping event"),
        }
    }
}
