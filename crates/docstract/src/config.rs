//! Configuration for the extraction service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// OCR configuration
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

impl ExtractorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Policy for PDF pages that already carry machine-encoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrPolicy {
    /// Rasterize and OCR every page regardless of embedded text
    Always,
    /// Use embedded text where present, OCR only pages without it
    WhenTextMissing,
}

impl Default for OcrPolicy {
    fn default() -> Self {
        OcrPolicy::WhenTextMissing
    }
}

/// OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code
    pub language: String,
    /// Rasterization resolution in DPI
    pub dpi: u32,
    /// Embedded-text handling for PDF pages
    #[serde(default)]
    pub policy: OcrPolicy,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: 300,
            policy: OcrPolicy::default(),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database holding saved extractions
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let database_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docstract")
            .join("documents.db");

        Self { database_path }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Include derived fields (emails, phones) in exported JSON documents
    pub include_derived_fields: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_derived_fields: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.policy, OcrPolicy::WhenTextMissing);
        assert!(!config.export.include_derived_fields);
    }

    #[test]
    fn test_parse_partial_toml() {
        let raw = r#"
            [ocr]
            language = "deu"
            dpi = 150
            policy = "always"
        "#;
        let config: ExtractorConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.policy, OcrPolicy::Always);
        // Untouched sections fall back to defaults
        assert_eq!(config.server.port, 8080);
    }
}
