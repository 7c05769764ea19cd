//! PitchView CLI
//!
//! Plot the mean pitch trajectories of one pitcher.

use anyhow::Result;
use clap::Parser;
use pitchview_cli::{config, exporter, ExportFormat, Overrides, RerunLogger, RunSummary};
use pitchview_core::{PitchViewer, Presentation};
use pitchview_env::{global, JsonFileStore, PitchStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Per-pitch-type trajectory viewer
#[derive(Parser, Debug)]
#[command(name = "pitchview")]
#[command(about = "Plot the average trajectory of each pitch type a pitcher throws", long_about = None)]
struct Args {
    /// Player name, "First Last"
    #[arg(required = true)]
    player: Vec<String>,

    /// JSON export of the pitching table
    #[arg(short, long)]
    store: PathBuf,

    /// JSON config overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Season shown in the title
    #[arg(long)]
    season: Option<i32>,

    /// Write the figure to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format of --output
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Html)]
    format: ExportFormat,

    /// Show the scene in a spawned Rerun viewer
    #[arg(long)]
    rerun: bool,

    /// Save a Rerun recording instead of spawning a viewer
    #[arg(long)]
    rrd: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON summary on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging; stdout stays free for --json
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match run(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one request. `Ok(false)` means the adapter presented an error.
async fn run(args: &Args) -> Result<bool> {
    let player = args.player.join(" ");
    let config = config::load(
        args.config.as_deref(),
        &Overrides {
            season: args.season,
        },
    )?;

    let store: Arc<dyn PitchStore> = Arc::new(JsonFileStore::new(&args.store));
    let store = global::install(store)?;

    if !args.json {
        info!("PitchView v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let viewer = PitchViewer::new(store, config);
    let presentation = viewer.present(&player).await;

    let mut written = None;
    match &presentation {
        Presentation::Scene(scene) => {
            if let Some(path) = &args.output {
                exporter::write_to_file(scene, args.format, path)?;
                info!("Wrote {:?} figure to {}", args.format, path.display());
                written = Some(path.display().to_string());
            }

            if args.rerun || args.rrd.is_some() {
                let logger = RerunLogger::new("pitchview", args.rrd.as_deref());
                if logger.is_enabled() {
                    logger.log_scene(scene)?;
                }
            }

            if !args.json {
                info!("✓ {}: {} pitch types", scene.layout.title.text, scene.pitches.len());
                for pitch in &scene.pitches {
                    info!("  - {} ({} pitches)", pitch.pitch_type, pitch.pitch_count);
                }
            }
        }
        Presentation::Error(message) => {
            eprintln!("{}", message);
        }
    }

    if args.json {
        let summary = RunSummary::new(&player, &presentation).with_output(written);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(presentation.scene().is_some())
}
