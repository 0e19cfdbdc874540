use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use crate::detection::domain::face_detector::{
    DetectedFace, DetectionRequest, DetectionResponder, FaceDetector,
};

/// A blocking face model: analyzes one request on the calling thread.
///
/// Implementations may keep state between calls, hence `&mut self`.
pub trait FaceClassifier: Send {
    fn classify(
        &mut self,
        request: &DetectionRequest,
    ) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}

type Job = (DetectionRequest, DetectionResponder);

/// Runs a blocking [`FaceClassifier`] on a dedicated worker thread, turning
/// it into an asynchronous [`FaceDetector`].
///
/// `submit` only enqueues. The worker resolves each responder in submission
/// order. Dropping the detector closes the queue and joins the worker after
/// it drains.
pub struct ThreadedFaceDetector {
    job_tx: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedFaceDetector {
    pub fn new(classifier: Box<dyn FaceClassifier>) -> Self {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();
        let worker = spawn_worker(classifier, job_rx);
        Self {
            job_tx: Some(job_tx),
            worker: Some(worker),
        }
    }
}

fn spawn_worker(
    mut classifier: Box<dyn FaceClassifier>,
    job_rx: crossbeam_channel::Receiver<Job>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (request, responder) in job_rx {
            let result = classifier.classify(&request).map_err(|e| e.to_string());
            responder.resolve(result);
        }
    })
}

impl FaceDetector for ThreadedFaceDetector {
    fn submit(&self, request: DetectionRequest, responder: DetectionResponder) {
        let Some(job_tx) = &self.job_tx else {
            responder.resolve(Err("detector is shut down".into()));
            return;
        };
        if let Err(crossbeam_channel::SendError((_, responder))) = job_tx.send((request, responder))
        {
            responder.resolve(Err("detector worker is not running".into()));
        }
    }
}

impl Drop for ThreadedFaceDetector {
    fn drop(&mut self) {
        drop(self.job_tx.take());
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("Face detector worker panicked");
            }
        }
    }
}
