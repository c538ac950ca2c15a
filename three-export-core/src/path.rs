//! Derivation of the final artifact path from the requested path and the
//! selected codec.

use crate::codec::Codec;

/// The exporter's declared file extension
pub const EXTENSION: &str = ".json";

/// Derive the final artifact path for the selected codec.
///
/// With the uncompressed codec the requested path is returned unchanged.
/// Otherwise the last four characters, assumed to be the export extension,
/// are replaced by the codec suffix:
///
/// ```
/// use three_export_core::{codec::Codec, path::resolve};
///
/// assert_eq!(resolve("model.json", Codec::None), "model.json");
/// assert_eq!(resolve("model.json", Codec::Msgpack), "model.pack");
/// ```
///
/// This is a pure string transform. The caller guarantees that `requested`
/// already ends in `.json` (or another extension whose body is four ASCII
/// characters); nothing here verifies that the removed characters actually
/// match the declared export extension.
pub fn resolve(requested: &str, codec: Codec) -> String {
    match codec.suffix() {
        None => requested.to_owned(),
        Some(suffix) => {
            // Strip the extension body but keep its dot, then substitute
            // the codec suffix.
            let stem = requested.len().saturating_sub(EXTENSION.len() - 1);
            format!("{}{}", &requested[..stem], suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_keeps_the_requested_path() {
        assert_eq!(resolve("model.json", Codec::None), "model.json");
        assert_eq!(resolve("scenes/level1.json", Codec::None), "scenes/level1.json");
    }

    #[test]
    fn msgpack_replaces_the_extension() {
        assert_eq!(resolve("model.json", Codec::Msgpack), "model.pack");
        assert_eq!(resolve("scenes/level1.json", Codec::Msgpack), "scenes/level1.pack");
    }
}
