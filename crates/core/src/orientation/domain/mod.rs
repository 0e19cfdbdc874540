pub mod environment_probe;
pub mod rotation_normalizer;
