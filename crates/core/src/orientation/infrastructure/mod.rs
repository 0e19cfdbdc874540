pub mod build_properties;
pub mod probe_factory;
