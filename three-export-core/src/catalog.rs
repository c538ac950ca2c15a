//! Static schema of every recognized export option.
//!
//! Each option the settings store ever writes has exactly one entry here:
//! its persisted key, its value domain, and its default. The catalog is
//! immutable after process start; hosts enumerate it to build their UI and
//! validate assignments against it instead of hanging ad-hoc properties off
//! host objects.

use thiserror::Error;

// Persisted key spellings. These are the literal field names of the
// settings file, so they must never change once shipped.
pub const VERTICES: &str = "vertices";
pub const FACES: &str = "faces";
pub const NORMALS: &str = "normals";
pub const SKINNING: &str = "skinning";
pub const BONES: &str = "bones";
pub const INFLUENCES_PER_VERTEX: &str = "influencesPerVertex";
pub const GEOMETRY_TYPE: &str = "geometryType";
pub const MATERIALS: &str = "materials";
pub const UV_COORDS: &str = "uvCoords";
pub const FACE_MATERIALS: &str = "faceMaterials";
pub const MAPS: &str = "maps";
pub const COLORS: &str = "colors";
pub const MIX_COLORS: &str = "mixColors";
pub const SCALE: &str = "scale";
pub const ENABLE_PRECISION: &str = "enablePrecision";
pub const PRECISION: &str = "precision";
pub const LOGGING: &str = "logging";
pub const COMPRESSION: &str = "compression";
pub const INDENT: &str = "indent";
pub const COPY_TEXTURES: &str = "copyTextures";
pub const SCENE: &str = "scene";
pub const EMBED_ANIMATION: &str = "embedAnimation";
pub const LIGHTS: &str = "lights";
pub const CAMERAS: &str = "cameras";
pub const MORPH_TARGETS: &str = "morphTargets";
pub const ANIMATION: &str = "animation";
pub const FRAME_STEP: &str = "frameStep";
pub const FRAME_INDEX_AS_TIME: &str = "frameIndexAsTime";

/// Enumeration tags for the geometry type option
pub const GEOMETRY_TYPE_TAGS: &[&str] = &["global", "geometry", "buffer_geometry"];
/// Enumeration tags for the logging verbosity option
pub const LOGGING_TAGS: &[&str] = &["debug", "info", "warning", "error", "critical"];
/// Enumeration tags for the skeletal animation option
pub const ANIMATION_TAGS: &[&str] = &["off", "pose", "rest"];
/// Enumeration tags for the compression option
pub const COMPRESSION_TAGS: &[&str] = &["none", "msgpack"];

/// Value domain of a single option
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Plain on/off toggle
    Bool,
    /// Integer with inclusive bounds
    Int { min: i64, max: i64 },
    /// Float with inclusive bounds
    Float { min: f64, max: f64 },
    /// Closed set of string tags
    Enum(&'static [&'static str]),
}

/// A loosely typed option value, used for schema lookups and validation
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Tag(&'static str),
}

/// Errors raised when a value falls outside its declared domain
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("value {value} for option `{key}` is outside [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("`{value}` is not a recognized tag for option `{key}`")]
    UnknownTag { key: String, value: String },

    #[error("option `{key}` was given a value of the wrong type")]
    TypeMismatch { key: String },

    #[error("`{key}` is not a recognized export option")]
    UnknownKey { key: String },
}

impl Domain {
    /// Check a value against this domain. Out-of-range values are rejected,
    /// never clamped.
    pub fn check(&self, key: &str, value: &OptionValue) -> Result<(), DomainError> {
        match (self, value) {
            (Domain::Bool, OptionValue::Bool(_)) => Ok(()),
            (Domain::Int { min, max }, OptionValue::Int(v)) => {
                if v < min || v > max {
                    Err(DomainError::OutOfRange {
                        key: key.to_owned(),
                        value: *v as f64,
                        min: *min as f64,
                        max: *max as f64,
                    })
                } else {
                    Ok(())
                }
            }
            (Domain::Float { min, max }, OptionValue::Float(v)) => {
                if v < min || v > max {
                    Err(DomainError::OutOfRange {
                        key: key.to_owned(),
                        value: *v,
                        min: *min,
                        max: *max,
                    })
                } else {
                    Ok(())
                }
            }
            (Domain::Enum(tags), OptionValue::Tag(tag)) => {
                if tags.contains(tag) {
                    Ok(())
                } else {
                    Err(DomainError::UnknownTag {
                        key: key.to_owned(),
                        value: (*tag).to_owned(),
                    })
                }
            }
            _ => Err(DomainError::TypeMismatch {
                key: key.to_owned(),
            }),
        }
    }
}

/// One catalog entry: persisted key, value domain, default value
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub domain: Domain,
    pub default: OptionValue,
}

/// The full option schema, one entry per persisted key.
///
/// Every key `SettingsStore` writes must appear here, otherwise
/// restore-with-fallback is undefined for that key. The serialization
/// tests in the `settings` module keep this table and `ExportSettings`
/// in lockstep.
pub const CATALOG: &[OptionSpec] = &[
    // Geometry
    OptionSpec {
        key: VERTICES,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: FACES,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: NORMALS,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: SKINNING,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: BONES,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: INFLUENCES_PER_VERTEX,
        domain: Domain::Int { min: 1, max: 4 },
        default: OptionValue::Int(2),
    },
    OptionSpec {
        key: GEOMETRY_TYPE,
        domain: Domain::Enum(GEOMETRY_TYPE_TAGS),
        default: OptionValue::Tag("geometry"),
    },
    // Materials
    OptionSpec {
        key: MATERIALS,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: UV_COORDS,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: FACE_MATERIALS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    OptionSpec {
        key: MAPS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    OptionSpec {
        key: COLORS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    OptionSpec {
        key: MIX_COLORS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    // Scene / output
    OptionSpec {
        key: SCALE,
        domain: Domain::Float {
            min: 0.01,
            max: 1000.0,
        },
        default: OptionValue::Float(1.0),
    },
    OptionSpec {
        key: ENABLE_PRECISION,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: PRECISION,
        domain: Domain::Int { min: 0, max: 16 },
        default: OptionValue::Int(6),
    },
    OptionSpec {
        key: LOGGING,
        domain: Domain::Enum(LOGGING_TAGS),
        default: OptionValue::Tag("debug"),
    },
    OptionSpec {
        key: COMPRESSION,
        domain: Domain::Enum(COMPRESSION_TAGS),
        default: OptionValue::Tag("none"),
    },
    OptionSpec {
        key: INDENT,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: COPY_TEXTURES,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    // Scene content
    OptionSpec {
        key: SCENE,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: EMBED_ANIMATION,
        domain: Domain::Bool,
        default: OptionValue::Bool(true),
    },
    OptionSpec {
        key: LIGHTS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    OptionSpec {
        key: CAMERAS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    // Animation
    OptionSpec {
        key: MORPH_TARGETS,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
    OptionSpec {
        key: ANIMATION,
        domain: Domain::Enum(ANIMATION_TAGS),
        default: OptionValue::Tag("off"),
    },
    OptionSpec {
        key: FRAME_STEP,
        domain: Domain::Int { min: 1, max: 1000 },
        default: OptionValue::Int(1),
    },
    OptionSpec {
        key: FRAME_INDEX_AS_TIME,
        domain: Domain::Bool,
        default: OptionValue::Bool(false),
    },
];

/// The complete default record, one default value per recognized key
pub fn defaults() -> crate::settings::ExportSettings {
    crate::settings::ExportSettings::default()
}

/// Look up the full schema entry for a key
pub fn spec(key: &str) -> Option<&'static OptionSpec> {
    CATALOG.iter().find(|entry| entry.key == key)
}

/// Look up the value domain for a key
pub fn domain(key: &str) -> Option<&'static Domain> {
    spec(key).map(|entry| &entry.domain)
}

/// Iterate over every recognized option key, in catalog order
pub fn keys() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.key)
}

/// Validate a value against the declared domain of `key`
pub fn check(key: &str, value: OptionValue) -> Result<(), DomainError> {
    match spec(key) {
        Some(entry) => entry.domain.check(key, &value),
        None => Err(DomainError::UnknownKey {
            key: key.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_exactly_one_entry() {
        for key in keys() {
            let count = CATALOG.iter().filter(|entry| entry.key == key).count();
            assert_eq!(count, 1, "duplicate catalog entry for `{}`", key);
        }
    }

    #[test]
    fn defaults_lie_inside_their_domains() {
        for entry in CATALOG {
            entry
                .domain
                .check(entry.key, &entry.default)
                .unwrap_or_else(|err| panic!("default for `{}` rejected: {}", entry.key, err));
        }
    }

    #[test]
    fn int_bounds_reject_out_of_range() {
        let err = check(PRECISION, OptionValue::Int(20)).unwrap_err();
        assert!(matches!(err, DomainError::OutOfRange { .. }));
        assert!(check(PRECISION, OptionValue::Int(0)).is_ok());
        assert!(check(PRECISION, OptionValue::Int(16)).is_ok());
    }

    #[test]
    fn float_bounds_reject_out_of_range() {
        let err = check(SCALE, OptionValue::Float(0.0)).unwrap_err();
        assert!(matches!(err, DomainError::OutOfRange { .. }));
        assert!(check(SCALE, OptionValue::Float(0.01)).is_ok());
        assert!(check(SCALE, OptionValue::Float(1000.0)).is_ok());
    }

    #[test]
    fn enum_domain_rejects_unknown_tag() {
        let err = check(GEOMETRY_TYPE, OptionValue::Tag("nurbs")).unwrap_err();
        assert!(matches!(err, DomainError::UnknownTag { .. }));
        assert!(check(GEOMETRY_TYPE, OptionValue::Tag("buffer_geometry")).is_ok());
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let err = check(VERTICES, OptionValue::Int(1)).unwrap_err();
        assert!(matches!(err, DomainError::TypeMismatch { .. }));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = check("blendingType", OptionValue::Bool(true)).unwrap_err();
        assert!(matches!(err, DomainError::UnknownKey { .. }));
    }
}
