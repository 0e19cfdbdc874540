pub mod detection_outcome;
pub mod eyes_open_reducer;
pub mod face_detector;
