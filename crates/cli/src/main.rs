use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use framegate_core::pipeline::event_sink::{EventProducer, StreamEvent};
use framegate_core::pipeline::snapshot_stream::SnapshotStream;
use framegate_core::shared::frame::PlanarFrame;
use framegate_core::shared::rotation::Rotation;
use framegate_core::shared::settings::{PipelineSettings, SnapshotAdmission};
use framegate_core::snapshot::infrastructure::jpeg_snapshot_exporter::JpegSnapshotExporter;
use framegate_core::video::infrastructure::in_memory_frame_source::InMemoryFrameSource;

/// Export raw I420 frames as rotation-corrected JPEG snapshots.
#[derive(Parser)]
#[command(name = "framegate")]
struct Cli {
    /// Input file holding one tightly packed I420 frame (Y, U, V planes).
    input: PathBuf,

    /// Output JPEG file.
    output: PathBuf,

    /// Frame width in pixels.
    #[arg(long)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long)]
    height: u32,

    /// Clockwise rotation declared for the frame: 0, 90, 180 or 270.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    rotation: i32,

    /// Settings file (defaults to the per-user config location).
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = match &cli.settings {
        Some(path) => PipelineSettings::load_from(path)?,
        None => PipelineSettings::load(),
    };

    let data = std::fs::read(&cli.input)?;
    let frame = PlanarFrame::from_i420(&data, cli.width, cli.height, cli.rotation)?;
    let jpeg = export_snapshot(frame, settings.snapshot_admission)?;

    write_output(&cli.output, &jpeg)?;
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn export_snapshot(
    frame: PlanarFrame,
    admission: SnapshotAdmission,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let source = Arc::new(InMemoryFrameSource::new());
    let mut stream = SnapshotStream::new(
        source.clone(),
        Box::new(JpegSnapshotExporter::new()),
        admission,
    );
    let (tx, rx) = crossbeam_channel::unbounded::<StreamEvent<Vec<u8>>>();
    stream.start(Arc::new(tx));

    if !source.push(frame) {
        return Err("Snapshot stream is not attached to the frame source".into());
    }
    stream.stop();

    let jpeg = rx.recv()?.map_err(|e| {
        log::debug!("Snapshot failed with kind {}", e.kind());
        e
    })?;
    Ok(jpeg)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.width == 0 || cli.height == 0 {
        return Err(format!(
            "Frame dimensions must be positive, got {}x{}",
            cli.width, cli.height
        )
        .into());
    }
    if Rotation::from_degrees(cli.rotation).is_err() {
        return Err(format!(
            "Rotation must be one of 0, 90, 180, 270, got {}",
            cli.rotation
        )
        .into());
    }
    Ok(())
}
