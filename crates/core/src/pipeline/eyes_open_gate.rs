use std::sync::Arc;

use crate::detection::domain::detection_outcome::DetectionOutcome;
use crate::detection::domain::eyes_open_reducer::reduce;
use crate::detection::domain::face_detector::{DetectionRequest, DetectionResponder, FaceDetector};
use crate::orientation::domain::rotation_normalizer::RotationNormalizer;
use crate::pipeline::event_sink::StreamEvent;
use crate::pipeline::single_flight::SingleFlight;
use crate::shared::frame::PlanarFrame;
use crate::video::domain::pixel_converter::PixelConverter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Busy,
}

/// What the gate did with an offered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The frame started a detection cycle.
    Admitted,
    /// A cycle was already running; the frame was released unseen.
    Dropped,
}

/// Single-flight eyes-open classifier for one stream.
///
/// `Idle → Busy` on an admitted frame, `Busy → Idle` after the cycle's one
/// event has been emitted. Frames offered while busy are dropped without an
/// event. The gate never times out a detection: a detector that never
/// resolves keeps the gate busy.
pub struct EyesOpenGate {
    flight: SingleFlight,
    converter: PixelConverter,
    normalizer: RotationNormalizer,
    detector: Arc<dyn FaceDetector>,
}

impl EyesOpenGate {
    pub fn new(normalizer: RotationNormalizer, detector: Arc<dyn FaceDetector>) -> Self {
        Self {
            flight: SingleFlight::new(),
            converter: PixelConverter::new(),
            normalizer,
            detector,
        }
    }

    pub fn state(&self) -> GateState {
        if self.flight.is_busy() {
            GateState::Busy
        } else {
            GateState::Idle
        }
    }

    /// Offers a frame. Returns immediately; `on_event` is called exactly once
    /// for an admitted frame, possibly on another thread, and the gate is
    /// idle again once it returns.
    pub fn offer<F>(&self, frame: PlanarFrame, on_event: F) -> Admission
    where
        F: FnOnce(StreamEvent<bool>) + Send + 'static,
    {
        let Some(guard) = self.flight.try_acquire() else {
            log::trace!("Detection in flight, dropping frame");
            return Admission::Dropped;
        };

        let prepared = self.converter.convert(&frame).and_then(|buffer| {
            let orientation = self.normalizer.normalize(frame.rotation_degrees())?;
            Ok(DetectionRequest::new(buffer, orientation))
        });
        frame.release();

        let request = match prepared {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Frame rejected before detection: {e}");
                on_event(Err(e));
                drop(guard);
                return Admission::Admitted;
            }
        };

        log::trace!(
            "Submitting {}x{} {} buffer, orientation {}",
            request.width,
            request.height,
            request.format,
            request.orientation.degrees()
        );
        let responder = DetectionResponder::new(move |result| {
            let event = reduce(DetectionOutcome::from(result));
            on_event(event);
            drop(guard);
        });
        self.detector.submit(request, responder);
        Admission::Admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::{DetectedFace, DetectionResult};
    use crate::orientation::domain::environment_probe::FixedEnvironment;
    use crate::shared::error::PipelineError;
    use crate::shared::rotation::Rotation;
    use crossbeam_channel::{Receiver, Sender};
    use std::sync::Mutex;

    /// Parks every submission so the test decides when and how it resolves.
    #[derive(Default)]
    struct ParkedDetector {
        pending: Mutex<Vec<(DetectionRequest, DetectionResponder)>>,
    }

    impl ParkedDetector {
        fn pending_count(&self) -> usize {
            self.pending.lock().unwrap().len()
        }

        fn resolve_next(&self, result: DetectionResult) {
            let (_, responder) = self.pending.lock().unwrap().remove(0);
            responder.resolve(result);
        }

        fn last_orientation(&self) -> Rotation {
            self.pending.lock().unwrap().last().unwrap().0.orientation
        }
    }

    impl FaceDetector for ParkedDetector {
        fn submit(&self, request: DetectionRequest, responder: DetectionResponder) {
            self.pending.lock().unwrap().push((request, responder));
        }
    }

    fn gate(emulated: bool) -> (EyesOpenGate, Arc<ParkedDetector>) {
        let detector = Arc::new(ParkedDetector::default());
        let normalizer = RotationNormalizer::new(&FixedEnvironment(emulated));
        (EyesOpenGate::new(normalizer, detector.clone()), detector)
    }

    fn frame(rotation: i32) -> PlanarFrame {
        PlanarFrame::from_i420(&[128u8; 24], 4, 4, rotation).unwrap()
    }

    fn events() -> (Sender<StreamEvent<bool>>, Receiver<StreamEvent<bool>>) {
        crossbeam_channel::unbounded()
    }

    fn forward(tx: &Sender<StreamEvent<bool>>) -> impl FnOnce(StreamEvent<bool>) + Send + 'static {
        let tx = tx.clone();
        move |event| tx.send(event).unwrap()
    }

    fn one_face(left: f32, right: f32) -> DetectionResult {
        Ok(vec![DetectedFace::new(Some(left), Some(right))])
    }

    #[test]
    fn test_starts_idle() {
        let (gate, _) = gate(false);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_admitted_frame_makes_gate_busy_until_resolved() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();

        assert_eq!(gate.offer(frame(0), forward(&tx)), Admission::Admitted);
        assert_eq!(gate.state(), GateState::Busy);
        assert!(rx.try_recv().is_err());

        detector.resolve_next(one_face(0.9, 0.9));

        assert_eq!(rx.try_recv().unwrap(), Ok(true));
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_frame_while_busy_is_dropped_silently() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();

        gate.offer(frame(0), forward(&tx));
        assert_eq!(gate.offer(frame(0), forward(&tx)), Admission::Dropped);
        assert_eq!(detector.pending_count(), 1);

        detector.resolve_next(one_face(0.61, 0.61));

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Ok(true)]);
    }

    #[test]
    fn test_each_event_reopens_gate_for_exactly_one_frame() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();
        let outcomes = [
            one_face(0.61, 0.61),
            one_face(0.59, 0.9),
            Ok(vec![]),
            Err("model unavailable".to_string()),
            Ok(vec![DetectedFace::new(Some(0.61), None)]),
        ];

        for result in outcomes {
            assert_eq!(gate.offer(frame(0), forward(&tx)), Admission::Admitted);
            assert_eq!(gate.offer(frame(0), forward(&tx)), Admission::Dropped);
            detector.resolve_next(result);
            assert_eq!(gate.state(), GateState::Idle);
        }

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                Ok(true),
                Ok(false),
                Err(PipelineError::FaceCountMismatch { count: 0 }),
                Err(PipelineError::DetectorError("model unavailable".into())),
                Err(PipelineError::MissingLandmarkData),
            ]
        );
    }

    #[test]
    fn test_multiple_faces_reported_with_count() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();

        gate.offer(frame(0), forward(&tx));
        detector.resolve_next(Ok(vec![DetectedFace::default(); 2]));

        assert_eq!(
            rx.try_recv().unwrap(),
            Err(PipelineError::FaceCountMismatch { count: 2 })
        );
    }

    #[test]
    fn test_dropped_responder_still_emits_and_reopens() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();

        gate.offer(frame(0), forward(&tx));
        drop(detector.pending.lock().unwrap().remove(0));

        let event = rx.try_recv().unwrap();
        assert!(matches!(event, Err(PipelineError::DetectorError(_))));
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_emulated_orientation_is_corrected() {
        let (tx, _rx) = events();
        let (gate, detector) = gate(true);

        gate.offer(frame(90), forward(&tx));

        assert_eq!(detector.last_orientation(), Rotation::Deg0);
    }

    #[test]
    fn test_physical_orientation_passes_through() {
        let (tx, _rx) = events();
        let (gate, detector) = gate(false);

        gate.offer(frame(270), forward(&tx));

        assert_eq!(detector.last_orientation(), Rotation::Deg270);
    }

    #[test]
    fn test_invalid_rotation_emits_error_and_stays_idle() {
        let (gate, detector) = gate(true);
        let (tx, rx) = events();

        assert_eq!(gate.offer(frame(45), forward(&tx)), Admission::Admitted);

        assert_eq!(rx.try_recv().unwrap(), Err(PipelineError::InvalidRotation(45)));
        assert_eq!(detector.pending_count(), 0);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_bad_geometry_emits_error_and_stays_idle() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();
        let broken = PlanarFrame::new(
            4,
            4,
            crate::shared::frame::Plane::new(vec![0; 3], 4),
            crate::shared::frame::Plane::new(vec![0; 4], 2),
            crate::shared::frame::Plane::new(vec![0; 4], 2),
            0,
        );

        gate.offer(broken, forward(&tx));

        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(PipelineError::InvalidFrameGeometry(_))
        ));
        assert_eq!(detector.pending_count(), 0);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_frames_are_released_whether_admitted_or_dropped() {
        let (tx, _rx) = events();
        let (gate, _detector) = gate(false);
        let released = Arc::new(Mutex::new(0usize));

        for _ in 0..3 {
            let counter = Arc::clone(&released);
            let tracked = frame(0).with_release(Box::new(move |_| *counter.lock().unwrap() += 1));
            gate.offer(tracked, forward(&tx));
        }

        assert_eq!(*released.lock().unwrap(), 3);
    }

    #[test]
    fn test_resolution_on_other_thread() {
        let (gate, detector) = gate(false);
        let (tx, rx) = events();

        gate.offer(frame(0), forward(&tx));
        let worker = std::thread::spawn(move || detector.resolve_next(one_face(0.8, 0.2)));
        worker.join().unwrap();

        assert_eq!(rx.recv().unwrap(), Ok(false));
        assert_eq!(gate.state(), GateState::Idle);
    }
}
