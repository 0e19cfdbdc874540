pub mod frame_source;
pub mod pixel_converter;
