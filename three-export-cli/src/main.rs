use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use three_export_core::{
    catalog, run_export, AnimationMode, Codec, CompressionRegistry, ExportRequest, ExportSettings,
    GeometryType, LogLevel, SettingsStore,
};

mod exporter;

use exporter::ManifestExporter;

/// Command-line host for the three export pipeline
#[derive(Parser)]
#[command(
    name = "three-export",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export scenes and geometry to three.js-style JSON",
    arg_required_else_help = true
)]
struct Cli {
    /// Directory holding the settings cache (defaults to the system temp
    /// directory)
    #[arg(long, global = true)]
    settings_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an export action
    Export(ExportArgs),

    /// Inspect or reset the saved export settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// List the compression codecs available in this build
    Codecs,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the restored settings record as JSON
    Show,
    /// Delete the settings cache so the next export starts from defaults
    Reset,
    /// Print the settings cache location
    Path,
}

#[derive(Args)]
struct ExportArgs {
    /// Source scene file; the default destination replaces its extension
    /// with the export extension
    source: PathBuf,

    /// Artifact path (must carry the export extension)
    #[arg(short, long)]
    output: Option<String>,

    /// Compression codec for the artifact
    #[arg(long)]
    compression: Option<Codec>,

    /// Vertex scale factor
    #[arg(long)]
    scale: Option<f64>,

    /// Floating point precision
    #[arg(long)]
    precision: Option<u32>,

    /// Animation frame step
    #[arg(long)]
    frame_step: Option<u32>,

    /// Maximum bone influences per vertex
    #[arg(long)]
    influences: Option<u32>,

    /// Geometry type (global, geometry, buffer_geometry)
    #[arg(long)]
    geometry_type: Option<GeometryType>,

    /// Skeletal animation mode (off, pose, rest)
    #[arg(long)]
    animation: Option<AnimationMode>,

    /// Logging verbosity (debug, info, warning, error, critical)
    #[arg(long)]
    logging: Option<LogLevel>,

    /// Export the whole scene; `false` exports only the active geometry
    #[arg(long)]
    scene: Option<bool>,

    /// Include default scene lights
    #[arg(long)]
    lights: Option<bool>,

    /// Include default scene cameras
    #[arg(long)]
    cameras: Option<bool>,

    /// Export morph target animation
    #[arg(long)]
    morph_targets: Option<bool>,

    /// Indent the JSON output; `false` writes compact JSON
    #[arg(long)]
    indent: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match &cli.settings_dir {
        Some(dir) => SettingsStore::new(dir),
        None => SettingsStore::in_temp_dir(),
    };

    match cli.command {
        Commands::Export(args) => export(&store, args),
        Commands::Settings { action } => settings(&store, action),
        Commands::Codecs => codecs(),
    }
}

fn export(store: &SettingsStore, args: ExportArgs) -> Result<()> {
    // The subscriber must exist before the restore so the store's debug
    // messages are not lost.
    init_tracing(startup_log_level(args.logging));

    let mut settings = store
        .load()
        .context("failed to restore saved export settings")?;

    apply_overrides(&mut settings, &args)?;

    let registry = CompressionRegistry::probe();
    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| default_destination(&args.source));

    let request = ExportRequest {
        destination: Some(destination),
        settings,
    };
    let artifact = run_export(&ManifestExporter, store, &registry, &request)?;

    println!("{} {}", "Exported".green().bold(), artifact);
    Ok(())
}

/// Apply the current command-line choices over the restored record.
/// Bounded values go through the checked setters so out-of-range flags are
/// rejected instead of clamped. Toggles take an explicit value, so every
/// persisted choice can be set in both directions on a later run.
fn apply_overrides(settings: &mut ExportSettings, args: &ExportArgs) -> Result<()> {
    if let Some(scale) = args.scale {
        settings.set_scale(scale)?;
    }
    if let Some(precision) = args.precision {
        settings.set_precision(precision)?;
    }
    if let Some(step) = args.frame_step {
        settings.set_frame_step(step)?;
    }
    if let Some(influences) = args.influences {
        settings.set_influences_per_vertex(influences)?;
    }
    if let Some(codec) = args.compression {
        settings.compression = codec;
    }
    if let Some(geometry_type) = args.geometry_type {
        settings.geometry_type = geometry_type;
    }
    if let Some(animation) = args.animation {
        settings.animation = animation;
    }
    if let Some(logging) = args.logging {
        settings.logging = logging;
    }
    if let Some(scene) = args.scene {
        settings.scene = scene;
    }
    if let Some(lights) = args.lights {
        settings.lights = lights;
    }
    if let Some(cameras) = args.cameras {
        settings.cameras = cameras;
    }
    if let Some(morph_targets) = args.morph_targets {
        settings.morph_targets = morph_targets;
    }
    if let Some(indent) = args.indent {
        settings.indent = indent;
    }
    Ok(())
}

fn settings(store: &SettingsStore, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = store
                .load()
                .context("failed to restore saved export settings")?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Reset => {
            match std::fs::remove_file(store.path()) {
                Ok(()) => println!("{} {}", "Removed".green().bold(), store.path().display()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    println!("No settings cache to remove");
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to remove {}", store.path().display()));
                }
            }
        }
        SettingsAction::Path => println!("{}", store.path().display()),
    }
    Ok(())
}

fn codecs() -> Result<()> {
    let registry = CompressionRegistry::probe();
    println!("Available compression codecs:");
    for codec in registry.available() {
        println!("  {}", codec);
    }
    // The enumeration shown to hosts always matches the catalog domain.
    let known = catalog::COMPRESSION_TAGS.len();
    if registry.available().len() < known {
        println!(
            "({} codec(s) require optional support not compiled into this build)",
            known - registry.available().len()
        );
    }
    Ok(())
}

/// Derive the default artifact path from the source scene file by swapping
/// its extension for the export extension.
fn default_destination(source: &Path) -> String {
    source.with_extension("json").to_string_lossy().into_owned()
}

/// Subscriber level for this run. An explicit override wins; otherwise
/// start at the most verbose level, the way the original host logger was
/// configured before the settings were restored.
fn startup_log_level(override_level: Option<LogLevel>) -> LogLevel {
    override_level.unwrap_or_default()
}

fn init_tracing(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level.tracing_level())
        .with_target(false)
        .try_init();
}
