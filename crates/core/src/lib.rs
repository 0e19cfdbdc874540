pub mod detection;
pub mod orientation;
pub mod pipeline;
pub mod shared;
pub mod snapshot;
pub mod video;
