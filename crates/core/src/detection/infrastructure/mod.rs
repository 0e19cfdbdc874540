pub mod threaded_face_detector;
