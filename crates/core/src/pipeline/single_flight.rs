use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Admission control allowing at most one operation in flight.
///
/// `try_acquire` is a compare-and-set on the busy flag, so two threads can
/// never both be admitted. The returned guard clears the flag when dropped,
/// which ties release to whatever owns the in-flight work.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<FlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of admission. Dropping it returns the gate to idle.
#[derive(Debug)]
pub struct FlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
