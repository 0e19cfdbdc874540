pub mod in_memory_frame_source;
