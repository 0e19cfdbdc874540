pub mod constants;
pub mod error;
pub mod frame;
pub mod packed_buffer;
pub mod rotation;
pub mod settings;
