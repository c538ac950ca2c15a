//! Compression codec tags and the runtime capability registry.
//!
//! The uncompressed codec is always usable. MessagePack is usable only when
//! the crate was built with the `msgpack` feature, which pulls in the
//! support library. The registry is probed once at startup and injected
//! into callers, so tests can substitute a fixed codec set instead of
//! depending on how the binary was built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, DomainError};

/// Output compression scheme applied to the exported artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    None,
    Msgpack,
}

impl Codec {
    pub fn tag(&self) -> &'static str {
        match self {
            Codec::None => "none",
            Codec::Msgpack => "msgpack",
        }
    }

    /// The artifact suffix this codec substitutes for the extension body
    /// (the dot of the requested path is kept), or `None` when the
    /// requested path is kept unchanged.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Codec::None => None,
            Codec::Msgpack => Some("pack"),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Codec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Codec::None),
            "msgpack" => Ok(Codec::Msgpack),
            other => Err(DomainError::UnknownTag {
                key: catalog::COMPRESSION.to_owned(),
                value: other.to_owned(),
            }),
        }
    }
}

/// The set of codecs usable in this process.
///
/// Probed once per process start; the set never changes within a run, even
/// if the environment does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionRegistry {
    available: Vec<Codec>,
}

impl CompressionRegistry {
    /// Probe the build for optional codec support. A missing support
    /// library is the normal case, not an error.
    pub fn probe() -> Self {
        let mut available = vec![Codec::None];
        if cfg!(feature = "msgpack") {
            available.push(Codec::Msgpack);
        }
        debug!(codecs = ?available, "probed compression support");
        Self { available }
    }

    /// Build a registry with a fixed codec set. The uncompressed codec is
    /// always included and always listed first.
    pub fn with_codecs(codecs: impl IntoIterator<Item = Codec>) -> Self {
        let mut available = vec![Codec::None];
        for codec in codecs {
            if !available.contains(&codec) {
                available.push(codec);
            }
        }
        Self { available }
    }

    /// The usable codecs, uncompressed first
    pub fn available(&self) -> &[Codec] {
        &self.available
    }

    pub fn is_available(&self, codec: Codec) -> bool {
        self.available.contains(&codec)
    }
}

impl Default for CompressionRegistry {
    fn default() -> Self {
        Self::probe()
    }
}

/// Encode a record as MessagePack with string field names, for artifact
/// writers that honor the msgpack codec.
#[cfg(feature = "msgpack")]
pub fn pack<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_is_always_first() {
        let registry = CompressionRegistry::probe();
        assert_eq!(registry.available()[0], Codec::None);

        let fixed = CompressionRegistry::with_codecs([Codec::Msgpack]);
        assert_eq!(fixed.available(), &[Codec::None, Codec::Msgpack]);
    }

    #[cfg(not(feature = "msgpack"))]
    #[test]
    fn probe_without_support_library_yields_only_uncompressed() {
        let registry = CompressionRegistry::probe();
        assert_eq!(registry.available(), &[Codec::None]);
        assert!(!registry.is_available(Codec::Msgpack));
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn probe_with_support_library_yields_msgpack() {
        let registry = CompressionRegistry::probe();
        assert_eq!(registry.available(), &[Codec::None, Codec::Msgpack]);
    }

    #[test]
    fn with_codecs_deduplicates() {
        let registry = CompressionRegistry::with_codecs([Codec::None, Codec::Msgpack, Codec::Msgpack]);
        assert_eq!(registry.available(), &[Codec::None, Codec::Msgpack]);
    }

    #[test]
    fn suffixes() {
        assert_eq!(Codec::None.suffix(), None);
        assert_eq!(Codec::Msgpack.suffix(), Some("pack"));
    }

    #[test]
    fn tags_round_trip_through_from_str() {
        assert_eq!("none".parse::<Codec>().unwrap(), Codec::None);
        assert_eq!("msgpack".parse::<Codec>().unwrap(), Codec::Msgpack);
        assert!("gzip".parse::<Codec>().is_err());
    }
}
