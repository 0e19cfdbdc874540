pub mod snapshot_exporter;
