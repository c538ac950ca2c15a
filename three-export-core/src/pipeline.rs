//! Glue between the host, the settings store, and the exporter.
//!
//! One user-triggered export action runs synchronously through
//! [`run_export`]: validate the request, persist the chosen settings,
//! derive the artifact path for the selected codec, then hand off to the
//! exporter. Settings are saved before the exporter runs, so a failed
//! export still leaves the updated settings on disk.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::codec::{Codec, CompressionRegistry};
use crate::path;
use crate::settings::ExportSettings;
use crate::store::{SettingsError, SettingsStore};

/// The serialization collaborator. Implementations perform the actual
/// scene/geometry encoding; their failures are surfaced unchanged.
pub trait Exporter {
    fn export_scene(&self, path: &Path, settings: &ExportSettings) -> anyhow::Result<()>;
    fn export_geometry(&self, path: &Path, settings: &ExportSettings) -> anyhow::Result<()>;
}

/// One export action: where to write, and the finished settings record
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Requested artifact path, carrying the export extension. `None` when
    /// the host never chose a destination.
    pub destination: Option<String>,
    pub settings: ExportSettings,
}

/// Errors that can abort an export action
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no destination path was chosen for the export")]
    MissingDestination,

    #[error("compression codec `{0}` is not available in this build")]
    UnavailableCodec(Codec),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("exporter failed: {0}")]
    Exporter(#[source] anyhow::Error),
}

/// Run one export action and return the final artifact path.
///
/// The request is rejected before any I/O when no destination was chosen,
/// and before save/resolve when the selected codec is not in the registry.
/// A failed save does not run the exporter; a failed exporter does not roll
/// back the saved settings.
pub fn run_export(
    exporter: &dyn Exporter,
    store: &SettingsStore,
    registry: &CompressionRegistry,
    request: &ExportRequest,
) -> Result<String, ExportError> {
    let destination = request
        .destination
        .as_deref()
        .filter(|dest| !dest.is_empty())
        .ok_or(ExportError::MissingDestination)?;

    let codec = request.settings.compression;
    if !registry.is_available(codec) {
        return Err(ExportError::UnavailableCodec(codec));
    }

    store.save(&request.settings)?;

    let final_path = path::resolve(destination, codec);
    info!("exporting to {}", final_path);

    let artifact = Path::new(&final_path);
    let result = if request.settings.scene {
        exporter.export_scene(artifact, &request.settings)
    } else {
        exporter.export_geometry(artifact, &request.settings)
    };
    result.map_err(ExportError::Exporter)?;

    Ok(final_path)
}
