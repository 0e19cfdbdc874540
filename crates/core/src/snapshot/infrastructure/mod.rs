pub mod jpeg_snapshot_exporter;
