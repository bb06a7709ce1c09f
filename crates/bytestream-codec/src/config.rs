use std::path::Path;

use bytestream_types::LongWidth;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Highest zlib compression level.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Construction-time settings shared by [`ByteCursor`](crate::ByteCursor) and
/// [`ByteSink`](crate::ByteSink).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Wire width of `long` / `unsigned long` fields.
    pub long_width: LongWidth,
    /// zlib level used by compressed-string writes (0 = store, 9 = best).
    pub compression_level: u32,
    /// Largest declared decompressed length a cursor will inflate.
    pub max_decompressed_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            long_width: LongWidth::Bits64,
            compression_level: 6,
            max_decompressed_len: 64 * 1024 * 1024,
        }
    }
}

impl CodecConfig {
    /// Configuration for peers that use 4-byte longs.
    pub fn narrow() -> Self {
        Self {
            long_width: LongWidth::Bits32,
            ..Default::default()
        }
    }

    pub fn with_long_width(mut self, long_width: LongWidth) -> Self {
        self.long_width = long_width;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn validate(&self) -> CodecResult<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(CodecError::InvalidArgument(format!(
                "compression level {} (max {MAX_COMPRESSION_LEVEL})",
                self.compression_level
            )));
        }
        if self.max_decompressed_len > i32::MAX as usize {
            return Err(CodecError::InvalidArgument(format!(
                "max decompressed length {} exceeds the 32-bit length field",
                self.max_decompressed_len
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> CodecResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| CodecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> CodecResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> CodecResult<String> {
        toml::to_string(self).map_err(|e| CodecError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CodecConfig::default();
        assert_eq!(c.long_width, LongWidth::Bits64);
        assert_eq!(c.compression_level, 6);
        assert_eq!(c.max_decompressed_len, 64 * 1024 * 1024);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn narrow_config() {
        let c = CodecConfig::narrow();
        assert_eq!(c.long_width, LongWidth::Bits32);
        assert_eq!(c.compression_level, 6);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c = CodecConfig::from_toml_str("long_width = \"bits32\"\n").unwrap();
        assert_eq!(c.long_width, LongWidth::Bits32);
        assert_eq!(c.compression_level, 6);
    }

    #[test]
    fn toml_roundtrip() {
        let c = CodecConfig::narrow().with_compression_level(9);
        let text = c.to_toml_string().unwrap();
        assert_eq!(CodecConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn rejects_bad_level() {
        let err = CodecConfig::from_toml_str("compression_level = 12\n").unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = CodecConfig::from_toml_str("long_width = \"bits16\"\n").unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.toml");
        std::fs::write(&path, "compression_level = 1\nmax_decompressed_len = 1024\n").unwrap();
        let c = CodecConfig::load(&path).unwrap();
        assert_eq!(c.compression_level, 1);
        assert_eq!(c.max_decompressed_len, 1024);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CodecConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }
}
