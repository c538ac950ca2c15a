//! Stand-in for the real scene/geometry serializer.
//!
//! The actual encoders live outside this workspace; until they are wired
//! in, the manifest exporter writes the finished settings record to the
//! artifact path so the full pipeline (restore, override, persist, codec
//! and path selection) can be exercised end to end.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use three_export_core::{Codec, Exporter, ExportSettings};

pub struct ManifestExporter;

impl ManifestExporter {
    fn write(&self, path: &Path, settings: &ExportSettings, kind: &str) -> Result<()> {
        let manifest = serde_json::json!({
            "metadata": {
                "type": kind,
                "generator": "three-export",
                "version": three_export_core::VERSION,
            },
            "settings": settings,
        });

        let bytes = match settings.compression {
            #[cfg(feature = "msgpack")]
            Codec::Msgpack => three_export_core::codec::pack(&manifest)?,
            #[cfg(not(feature = "msgpack"))]
            Codec::Msgpack => {
                anyhow::bail!("msgpack codec selected but support is not compiled in")
            }
            Codec::None => {
                if settings.indent {
                    serde_json::to_vec_pretty(&manifest)?
                } else {
                    serde_json::to_vec(&manifest)?
                }
            }
        };

        fs::write(path, bytes)
            .with_context(|| format!("failed to write artifact {}", path.display()))
    }
}

impl Exporter for ManifestExporter {
    fn export_scene(&self, path: &Path, settings: &ExportSettings) -> Result<()> {
        self.write(path, settings, "scene")
    }

    fn export_geometry(&self, path: &Path, settings: &ExportSettings) -> Result<()> {
        self.write(path, settings, "geometry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scene_manifest_is_indented_json_by_default() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("model.json");

        ManifestExporter
            .export_scene(&artifact, &ExportSettings::default())
            .unwrap();

        let text = fs::read_to_string(&artifact).unwrap();
        assert!(text.contains('\n'), "indented output expected");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["metadata"]["type"], "scene");
        assert_eq!(value["settings"]["vertices"], true);
    }

    #[test]
    fn compact_output_when_indent_is_off() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("mesh.json");

        let mut settings = ExportSettings::default();
        settings.indent = false;
        ManifestExporter
            .export_geometry(&artifact, &settings)
            .unwrap();

        let text = fs::read_to_string(&artifact).unwrap();
        assert!(!text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["metadata"]["type"], "geometry");
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn msgpack_codec_writes_messagepack() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("model.pack");

        let mut settings = ExportSettings::default();
        settings.compression = Codec::Msgpack;
        ManifestExporter.export_scene(&artifact, &settings).unwrap();

        let bytes = fs::read(&artifact).unwrap();
        assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
        assert!(!bytes.is_empty());
    }
}
