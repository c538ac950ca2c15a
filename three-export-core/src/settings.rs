//! The export settings record and its enumeration types.
//!
//! `ExportSettings` is the Configuration Record handed to the exporter: one
//! field per catalog key, serialized as a flat JSON object under the exact
//! key spellings the settings file has always used. Missing fields fall back
//! per key to the catalog default and unrecognized fields are dropped, so a
//! settings file written before the option set grew still restores cleanly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, DomainError, OptionValue};
use crate::codec::Codec;

/// How mesh data is grouped in the exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    Global,
    #[default]
    Geometry,
    BufferGeometry,
}

impl GeometryType {
    pub fn tag(&self) -> &'static str {
        match self {
            GeometryType::Global => "global",
            GeometryType::Geometry => "geometry",
            GeometryType::BufferGeometry => "buffer_geometry",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GeometryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(GeometryType::Global),
            "geometry" => Ok(GeometryType::Geometry),
            "buffer_geometry" => Ok(GeometryType::BufferGeometry),
            other => Err(DomainError::UnknownTag {
                key: catalog::GEOMETRY_TYPE.to_owned(),
                value: other.to_owned(),
            }),
        }
    }
}

/// Logging verbosity stored with the export settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// The `tracing` level this verbosity maps to. `critical` has no direct
    /// equivalent and collapses into `ERROR`.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            other => Err(DomainError::UnknownTag {
                key: catalog::LOGGING.to_owned(),
                value: other.to_owned(),
            }),
        }
    }
}

/// Skeletal animation export mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Off,
    Pose,
    Rest,
}

impl AnimationMode {
    pub fn tag(&self) -> &'static str {
        match self {
            AnimationMode::Off => "off",
            AnimationMode::Pose => "pose",
            AnimationMode::Rest => "rest",
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AnimationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(AnimationMode::Off),
            "pose" => Ok(AnimationMode::Pose),
            "rest" => Ok(AnimationMode::Rest),
            other => Err(DomainError::UnknownTag {
                key: catalog::ANIMATION.to_owned(),
                value: other.to_owned(),
            }),
        }
    }
}

/// The complete set of export option values for one export action.
///
/// Created fresh per export (seeded from `SettingsStore::load`), mutated
/// only by the user's current choices, and handed read-only to the exporter.
/// Bounded numeric fields go through the checked setters; direct field
/// access is for reads and for the unbounded toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    // Geometry
    pub vertices: bool,
    pub faces: bool,
    pub normals: bool,
    pub skinning: bool,
    pub bones: bool,
    pub influences_per_vertex: u32,
    pub geometry_type: GeometryType,

    // Materials
    pub materials: bool,
    pub uv_coords: bool,
    pub face_materials: bool,
    pub maps: bool,
    pub colors: bool,
    pub mix_colors: bool,

    // Scene / output
    pub scale: f64,
    pub enable_precision: bool,
    pub precision: u32,
    pub logging: LogLevel,
    pub compression: Codec,
    pub indent: bool,
    pub copy_textures: bool,

    // Scene content
    pub scene: bool,
    pub embed_animation: bool,
    pub lights: bool,
    pub cameras: bool,

    // Animation
    pub morph_targets: bool,
    pub animation: AnimationMode,
    pub frame_step: u32,
    pub frame_index_as_time: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            vertices: true,
            faces: true,
            normals: true,
            skinning: true,
            bones: true,
            influences_per_vertex: 2,
            geometry_type: GeometryType::default(),
            materials: true,
            uv_coords: true,
            face_materials: false,
            maps: false,
            colors: false,
            mix_colors: false,
            scale: 1.0,
            enable_precision: true,
            precision: 6,
            logging: LogLevel::default(),
            compression: Codec::default(),
            indent: true,
            copy_textures: true,
            scene: true,
            embed_animation: true,
            lights: false,
            cameras: false,
            morph_targets: false,
            animation: AnimationMode::default(),
            frame_step: 1,
            frame_index_as_time: false,
        }
    }
}

impl ExportSettings {
    /// Set the vertex scale factor, rejecting values outside the catalog
    /// bounds.
    pub fn set_scale(&mut self, value: f64) -> Result<(), DomainError> {
        catalog::check(catalog::SCALE, OptionValue::Float(value))?;
        self.scale = value;
        Ok(())
    }

    /// Set the floating point precision, rejecting values outside the
    /// catalog bounds.
    pub fn set_precision(&mut self, value: u32) -> Result<(), DomainError> {
        catalog::check(catalog::PRECISION, OptionValue::Int(value as i64))?;
        self.precision = value;
        Ok(())
    }

    /// Set the animation frame step, rejecting values outside the catalog
    /// bounds.
    pub fn set_frame_step(&mut self, value: u32) -> Result<(), DomainError> {
        catalog::check(catalog::FRAME_STEP, OptionValue::Int(value as i64))?;
        self.frame_step = value;
        Ok(())
    }

    /// Set the maximum number of bone influences per vertex, rejecting
    /// values outside the catalog bounds.
    pub fn set_influences_per_vertex(&mut self, value: u32) -> Result<(), DomainError> {
        catalog::check(
            catalog::INFLUENCES_PER_VERTEX,
            OptionValue::Int(value as i64),
        )?;
        self.influences_per_vertex = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn default_json() -> serde_json::Map<String, serde_json::Value> {
        let value = serde_json::to_value(ExportSettings::default()).unwrap();
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("settings did not serialize to an object: {}", other),
        }
    }

    #[test]
    fn serialized_keys_match_the_catalog_exactly() {
        let map = default_json();
        for key in catalog::keys() {
            assert!(map.contains_key(key), "missing serialized key `{}`", key);
        }
        assert_eq!(map.len(), catalog::CATALOG.len());
    }

    #[test]
    fn serialized_defaults_match_catalog_defaults() {
        let map = default_json();
        for entry in catalog::CATALOG {
            let found = &map[entry.key];
            match &entry.default {
                catalog::OptionValue::Bool(b) => assert_eq!(found, &serde_json::json!(b)),
                catalog::OptionValue::Int(i) => assert_eq!(found, &serde_json::json!(i)),
                catalog::OptionValue::Float(f) => assert_eq!(found, &serde_json::json!(f)),
                catalog::OptionValue::Tag(t) => assert_eq!(found, &serde_json::json!(t)),
            }
        }
    }

    #[test]
    fn missing_keys_fall_back_per_key() {
        // A partial record, as left behind by an older build with fewer
        // options.
        let partial = r#"{"vertices": false, "scale": 2.5}"#;
        let settings: ExportSettings = serde_json::from_str(partial).unwrap();
        assert!(!settings.vertices);
        assert_eq!(settings.scale, 2.5);

        let defaults = ExportSettings::default();
        assert_eq!(settings.faces, defaults.faces);
        assert_eq!(settings.precision, defaults.precision);
        assert_eq!(settings.compression, defaults.compression);
        assert_eq!(settings.animation, defaults.animation);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let stale = r#"{"vertices": false, "blendingType": "additive"}"#;
        let settings: ExportSettings = serde_json::from_str(stale).unwrap();
        assert!(!settings.vertices);

        let round_tripped = serde_json::to_value(&settings).unwrap();
        assert!(round_tripped.get("blendingType").is_none());
    }

    #[test]
    fn enum_tags_serialize_as_their_literal_spellings() {
        let mut settings = ExportSettings::default();
        settings.geometry_type = GeometryType::BufferGeometry;
        settings.logging = LogLevel::Warning;
        settings.animation = AnimationMode::Rest;

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["geometryType"], "buffer_geometry");
        assert_eq!(value["logging"], "warning");
        assert_eq!(value["animation"], "rest");
        assert_eq!(value["compression"], "none");
    }

    #[test]
    fn scale_setter_rejects_out_of_range() {
        let mut settings = ExportSettings::default();
        assert!(settings.set_scale(0.0).is_err());
        assert_eq!(settings.scale, 1.0);
        settings.set_scale(10.0).unwrap();
        assert_eq!(settings.scale, 10.0);
    }

    #[test]
    fn precision_setter_rejects_out_of_range() {
        let mut settings = ExportSettings::default();
        assert!(settings.set_precision(20).is_err());
        assert_eq!(settings.precision, 6);
        settings.set_precision(0).unwrap();
        settings.set_precision(16).unwrap();
    }

    #[test]
    fn frame_step_and_influences_setters_enforce_bounds() {
        let mut settings = ExportSettings::default();
        assert!(settings.set_frame_step(0).is_err());
        assert!(settings.set_frame_step(1001).is_err());
        settings.set_frame_step(24).unwrap();

        assert!(settings.set_influences_per_vertex(0).is_err());
        assert!(settings.set_influences_per_vertex(5).is_err());
        settings.set_influences_per_vertex(4).unwrap();
    }

    #[test]
    fn tags_parse_back_from_their_spellings() {
        assert_eq!(
            "buffer_geometry".parse::<GeometryType>().unwrap(),
            GeometryType::BufferGeometry
        );
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("pose".parse::<AnimationMode>().unwrap(), AnimationMode::Pose);
        assert!("nurbs".parse::<GeometryType>().is_err());
    }
}
