//! # Declaration Loading
//!
//! Reads `ModelConfig` documents from YAML or JSON. The format is chosen by
//! file extension (`.yaml`/`.yml` is YAML, anything else JSON), matching how
//! the rest of the toolchain treats descriptor files.
//!
//! Every type, field and enum value loaded from a file that does not carry
//! an explicit `location` is stamped with one naming the file and the JSON
//! pointer of the declaration, so diagnostics can point back at it.

use std::path::Path;

use thiserror::Error;
use tgm_core::SourceLocation;

use crate::config::{ModelConfig, TypeConfig};

/// Source name used for documents parsed from strings.
pub const INLINE_SOURCE: &str = "<inline>";

/// Error loading a declaration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read '{origin}': {source}")]
    Io {
        /// Path of the file.
        origin: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not match the declaration shape.
    #[error("invalid YAML in '{origin}': {source}")]
    Yaml {
        /// Path or source name of the document.
        origin: String,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },

    /// The document is not valid JSON or does not match the declaration shape.
    #[error("invalid JSON in '{origin}': {source}")]
    Json {
        /// Path or source name of the document.
        origin: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

impl ModelConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        parse_yaml(content, INLINE_SOURCE)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        parse_json(content, INLINE_SOURCE)
    }

    /// Load a declaration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Yaml` / `ConfigError::Json` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            origin: origin.clone(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let mut config = match ext {
            "yaml" | "yml" => parse_yaml(&content, &origin)?,
            _ => parse_json(&content, &origin)?,
        };
        config.stamp_locations(&origin);

        tracing::debug!(
            path = %origin,
            types = config.types.len(),
            profiles = config.permission_profiles.len(),
            "loaded model declarations"
        );
        Ok(config)
    }

    /// Load and merge several files in order.
    pub fn load_all<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Self, ConfigError> {
        let configs = paths
            .into_iter()
            .map(|p| Self::load(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::merge_all(configs))
    }

    /// Fill in missing locations with `source` and the declaration's JSON pointer.
    pub fn stamp_locations(&mut self, source: &str) {
        for (type_index, ty) in self.types.iter_mut().enumerate() {
            let type_pointer = format!("/types/{type_index}");
            if let Some(object) = ty.as_object_mut() {
                for (field_index, field) in object.fields.iter_mut().enumerate() {
                    field.location.get_or_insert_with(|| {
                        SourceLocation::new(source)
                            .with_pointer(format!("{type_pointer}/fields/{field_index}"))
                    });
                }
            }
            if let TypeConfig::Enum(e) = ty {
                for (value_index, value) in e.values.iter_mut().enumerate() {
                    value.location.get_or_insert_with(|| {
                        SourceLocation::new(source)
                            .with_pointer(format!("{type_pointer}/values/{value_index}"))
                    });
                }
            }
            ty.location_mut()
                .get_or_insert_with(|| SourceLocation::new(source).with_pointer(type_pointer));
        }

        for (name, profile) in self.permission_profiles.iter_mut() {
            profile.location.get_or_insert_with(|| {
                SourceLocation::new(source)
                    .with_pointer(format!("/permissionProfiles/{}", escape_pointer_token(name)))
            });
        }

        for (index, bundle) in self.localizations.iter_mut().enumerate() {
            bundle.location.get_or_insert_with(|| {
                SourceLocation::new(source).with_pointer(format!("/localizations/{index}"))
            });
        }
    }
}

/// Escape one JSON pointer reference token (RFC 6901).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn parse_yaml(content: &str, origin: &str) -> Result<ModelConfig, ConfigError> {
    // An empty YAML document is an empty model, not an error.
    if content.trim().is_empty() {
        return Ok(ModelConfig::default());
    }
    serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
        origin: origin.to_string(),
        source,
    })
}

fn parse_json(content: &str, origin: &str) -> Result<ModelConfig, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::Json {
        origin: origin.to_string(),
        source,
    })
}
