//! Configuration for text detection

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for OCR and text removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path to the Tesseract executable
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,

    /// Languages used when a request does not name any
    #[serde(default = "default_languages")]
    pub default_languages: String,

    /// Number of detector handles kept alive (1 = single shared handle)
    #[serde(default = "default_max_cached_detectors")]
    pub max_cached_detectors: usize,

    /// Tesseract page segmentation mode
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: u8,

    /// Inpainting radius used when a request does not name one
    #[serde(default = "default_inpaint_radius")]
    pub default_inpaint_radius: u32,
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from("tesseract")
}

fn default_languages() -> String {
    "en".to_string()
}

const fn default_max_cached_detectors() -> usize {
    1
}

const fn default_page_segmentation_mode() -> u8 {
    3 // fully automatic page segmentation
}

const fn default_inpaint_radius() -> u32 {
    3
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            default_languages: default_languages(),
            max_cached_detectors: default_max_cached_detectors(),
            page_segmentation_mode: default_page_segmentation_mode(),
            default_inpaint_radius: default_inpaint_radius(),
        }
    }
}

impl OcrConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cached_detectors == 0 {
            return Err("max_cached_detectors must be at least 1".to_string());
        }

        if self.page_segmentation_mode > 13 {
            return Err(format!(
                "page_segmentation_mode must be between 0 and 13, got {}",
                self.page_segmentation_mode
            ));
        }

        if self.default_languages.trim().is_empty() {
            return Err("default_languages must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = OcrConfig::default();
        assert_eq!(config.tesseract_path, PathBuf::from("tesseract"));
        assert_eq!(config.default_languages, "en");
        assert_eq!(config.max_cached_detectors, 1);
        assert_eq!(config.page_segmentation_mode, 3);
        assert_eq!(config.default_inpaint_radius, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_capacity() {
        let config = OcrConfig {
            max_cached_detectors: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_psm() {
        let config = OcrConfig {
            page_segmentation_mode: 14,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_languages() {
        let config = OcrConfig {
            default_languages: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_toml() {
        let toml = r#"
            tesseract_path = "/usr/local/bin/tesseract"
            default_languages = "en,ar"
            max_cached_detectors = 4
            page_segmentation_mode = 11
        "#;

        let config: OcrConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.tesseract_path, PathBuf::from("/usr/local/bin/tesseract"));
        assert_eq!(config.default_languages, "en,ar");
        assert_eq!(config.max_cached_detectors, 4);
        assert_eq!(config.page_segmentation_mode, 11);
        assert_eq!(config.default_inpaint_radius, 3);
    }
}
