pub mod event_sink;
pub mod eyes_open_gate;
pub mod eyes_open_stream;
pub mod single_flight;
pub mod snapshot_stream;
