//! # three-export-core
//!
//! Export-configuration subsystem for a three.js-style 3D scene exporter:
//! the full set of export options, persistence of the user's last-used
//! choices, runtime detection of optional compression codecs, and
//! derivation of the final artifact path.
//!
//! The actual scene/geometry serialization stays behind the
//! [`pipeline::Exporter`] trait; this crate only prepares and persists the
//! settings record it consumes.
//!
//! ## Quick start
//!
//! ```no_run
//! use three_export_core::{
//!     codec::CompressionRegistry,
//!     pipeline::{run_export, ExportRequest},
//!     store::SettingsStore,
//! };
//! # use three_export_core::pipeline::Exporter;
//! # fn exporter() -> Box<dyn Exporter> { unimplemented!() }
//!
//! let store = SettingsStore::in_temp_dir();
//! let registry = CompressionRegistry::probe();
//!
//! // Seed the record from the last-used settings, apply the user's
//! // current choices, then run the action.
//! let mut settings = store.load()?;
//! settings.set_scale(10.0)?;
//!
//! let request = ExportRequest {
//!     destination: Some("model.json".to_owned()),
//!     settings,
//! };
//! let artifact = run_export(&*exporter(), &store, &registry, &request)?;
//! println!("wrote {artifact}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod codec;
pub mod path;
pub mod pipeline;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use catalog::{Domain, DomainError, OptionSpec, OptionValue};
pub use codec::{Codec, CompressionRegistry};
pub use pipeline::{run_export, ExportError, ExportRequest, Exporter};
pub use settings::{AnimationMode, ExportSettings, GeometryType, LogLevel};
pub use store::{SettingsError, SettingsStore, SETTINGS_FILE_EXPORT};

/// Version information for the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
