//! Naming configuration types.

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for name validation and default item names.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct NamingConfig {
    /// Stem used when creating a file without an explicit name.
    #[builder(default = "CompactString::const_new(\"New file\")")]
    #[serde(default = "default_file_stem")]
    pub default_file_stem: CompactString,

    /// Extension (without the dot) for default-created files.
    #[builder(default = "CompactString::const_new(\"txt\")")]
    #[serde(default = "default_file_extension")]
    pub default_file_extension: CompactString,

    /// Name used when creating a folder without an explicit name.
    #[builder(default = "CompactString::const_new(\"New folder\")")]
    #[serde(default = "default_folder_name")]
    pub default_folder_name: CompactString,

    /// Maximum accepted name length, in bytes.
    #[builder(default = "255")]
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_file_stem() -> CompactString {
    CompactString::const_new("New file")
}

fn default_file_extension() -> CompactString {
    CompactString::const_new("txt")
}

fn default_folder_name() -> CompactString {
    CompactString::const_new("New folder")
}

fn default_max_name_len() -> usize {
    255
}

impl NamingConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref stem) = self.default_file_stem {
            if stem.trim().is_empty() {
                return Err("Default file stem cannot be empty".to_string());
            }
        }
        if let Some(ref name) = self.default_folder_name {
            if name.trim().is_empty() {
                return Err("Default folder name cannot be empty".to_string());
            }
        }
        if let Some(ref ext) = self.default_file_extension {
            if ext.starts_with('.') {
                return Err("Default extension must not include the dot".to_string());
            }
        }
        if let Some(max) = self.max_name_len {
            if max == 0 {
                return Err("Maximum name length must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl NamingConfig {
    /// Create a new naming config builder.
    pub fn builder() -> NamingConfigBuilder {
        NamingConfigBuilder::default()
    }

    /// Default name for a new file, extension included.
    pub fn default_file_name(&self) -> CompactString {
        if self.default_file_extension.is_empty() {
            self.default_file_stem.clone()
        } else {
            compact_str::format_compact!(
                "{}.{}",
                self.default_file_stem,
                self.default_file_extension
            )
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            default_file_stem: default_file_stem(),
            default_file_extension: default_file_extension(),
            default_folder_name: default_folder_name(),
            max_name_len: default_max_name_len(),
        }
    }
}
