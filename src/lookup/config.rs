//! Lookup table configuration parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::lookup::ds::error::LookupError;

lazy_static! {
    /// Root templates bound as instances in the global scope when registered.
    static ref DEFAULT_WELL_KNOWN_GLOBALS: Vec<(&'static str, &'static str)> =
        vec![("Document", "document"), ("Window", "window")];
}

pub const DEFAULT_TEMP_TYPE_PREFIX: &str = "__object";

/// A template class whose instance is bound in the global scope.
#[derive(Debug, Clone, PartialEq)]
pub struct WellKnownGlobal {
    /// Name of the registered template class (e.g. `Document`).
    pub template: String,
    /// Variable name of the instance (e.g. `document`).
    pub instance: String,
}

/// Complete lookup table configuration.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Instances seeded into the global scope, in binding order.
    pub well_known_globals: Vec<WellKnownGlobal>,
    /// Prefix of generated temporary type names.
    pub temp_type_prefix: String,
    /// Drop temporary classes when a lookup pass is prepared.
    pub clear_temp_on_prepare: bool,
}

impl LookupConfig {
    pub fn new() -> Self {
        LookupConfig {
            well_known_globals: DEFAULT_WELL_KNOWN_GLOBALS
                .iter()
                .map(|(template, instance)| WellKnownGlobal {
                    template: template.to_string(),
                    instance: instance.to_string(),
                })
                .collect(),
            temp_type_prefix: DEFAULT_TEMP_TYPE_PREFIX.to_string(),
            clear_temp_on_prepare: false,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [globals]
    /// "Document" = "document"
    /// "Window" = "window"
    ///
    /// [lookup]
    /// temp_type_prefix = "__object"
    /// clear_temp_on_prepare = false
    /// ```
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LookupError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. A `[globals]` section replaces
    /// the default well-known globals; unknown sections are ignored.
    pub fn parse(content: &str) -> Result<Self, LookupError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| LookupError::ConfigError(format!("failed to parse config TOML: {}", e)))?;

        let mut config = LookupConfig::new();

        if let Some(globals) = file.globals {
            config.well_known_globals.clear();
            for (template, instance) in globals {
                let instance = match instance {
                    toml::Value::String(instance) => instance,
                    other => {
                        return Err(LookupError::ConfigError(format!(
                            "globals.{}: expected a string, found {}",
                            template,
                            other.type_str()
                        )))
                    }
                };
                if template.is_empty() || instance.is_empty() {
                    return Err(LookupError::ConfigError(format!(
                        "globals: template and instance names must not be empty (`{}` = `{}`)",
                        template, instance
                    )));
                }
                config
                    .well_known_globals
                    .push(WellKnownGlobal { template, instance });
            }
        }

        if file.lookup.temp_type_prefix.is_empty() {
            return Err(LookupError::ConfigError(
                "lookup.temp_type_prefix must not be empty".to_string(),
            ));
        }
        config.temp_type_prefix = file.lookup.temp_type_prefix;
        config.clear_temp_on_prepare = file.lookup.clear_temp_on_prepare;

        Ok(config)
    }
}

/// On-disk layout of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    /// Template to instance name, kept in file order.
    globals: Option<toml::Table>,
    lookup: LookupSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LookupSection {
    temp_type_prefix: String,
    clear_temp_on_prepare: bool,
}

impl Default for LookupSection {
    fn default() -> Self {
        LookupSection {
            temp_type_prefix: DEFAULT_TEMP_TYPE_PREFIX.to_string(),
            clear_temp_on_prepare: false,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::new()
    }
}
