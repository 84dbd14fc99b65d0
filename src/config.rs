//! Extraction configuration parsed from the command-line option string.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error raised while building a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    #[error("Option '{key}' expects a boolean, got '{value}'")]
    InvalidBoolean { key: String, value: String },

    #[error("Cannot read license file '{path}': {source}")]
    LicenseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An option accepted in the option string
#[derive(Debug, Clone, Copy)]
pub struct OptionInfo {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

const OPTIONS: &[OptionInfo] = &[
    OptionInfo {
        key: "show_config",
        default: "false",
        description: "Prints the configuration",
    },
    OptionInfo {
        key: "license_file",
        default: "",
        description: "Name of the kernel license file",
    },
    OptionInfo {
        key: "license_key",
        default: "",
        description: "Kernel unlock key",
    },
    OptionInfo {
        key: "acis_warnings",
        default: "false",
        description: "Enable kernel warnings",
    },
    OptionInfo {
        key: "warnings",
        default: "false",
        description: "Enable application warnings",
    },
    OptionInfo {
        key: "normalize",
        default: "true",
        description: "Normalize knot vectors and rescale trim curves",
    },
    OptionInfo {
        key: "trims",
        default: "true",
        description: "Extract trim curves",
    },
    OptionInfo {
        key: "sense",
        default: "true",
        description: "Extract surface and trim curve sense data",
    },
    OptionInfo {
        key: "transform",
        default: "false",
        description: "Apply transforms",
    },
    OptionInfo {
        key: "bspline",
        default: "true",
        description: "Convert the underlying geometry to B-Spline",
    },
];

/// Immutable configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub show_config: bool,
    pub license_file: String,
    pub license_key: String,
    /// Log kernel diagnostics (non-critical errors and warnings)
    pub acis_warnings: bool,
    /// Log skipped faces
    pub warnings: bool,
    /// Rescale knot vectors and trim curve control points onto the unit interval
    pub normalize: bool,
    pub trims: bool,
    /// Emit `sense` for surfaces and trim curves
    pub sense: bool,
    /// Apply the body transform to extracted geometry instead of removing it
    pub transform: bool,
    /// Convert face and edge geometry to splines before extraction
    pub bspline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_config: false,
            license_file: String::new(),
            license_key: String::new(),
            acis_warnings: false,
            warnings: false,
            normalize: true,
            trims: true,
            sense: true,
            transform: false,
            bspline: true,
        }
    }
}

impl Config {
    /// Every accepted option with its default value and description
    pub fn options() -> &'static [OptionInfo] {
        OPTIONS
    }

    /// Parse an option string of `key=value` directives separated by `;`
    /// Directives without `=` are ignored.
    ///
    /// # Example
    /// ```
    /// use splinex::prelude::Config;
    /// let config = Config::parse("normalize=false;trims=0;warnings=TRUE").unwrap();
    /// assert!(!config.normalize);
    /// assert!(!config.trims);
    /// assert!(config.warnings);
    /// ```
    pub fn parse(options: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for directive in options.split(';') {
            if let Some((key, value)) = directive.split_once('=') {
                config.set(key.trim(), value.trim())?;
            }
        }
        Ok(config)
    }

    /// Update a single option
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let flag = match key {
            "license_file" => {
                self.license_file = value.to_string();
                return Ok(());
            }
            "license_key" => {
                self.license_key = value.to_string();
                return Ok(());
            }
            "show_config" => &mut self.show_config,
            "acis_warnings" => &mut self.acis_warnings,
            "warnings" => &mut self.warnings,
            "normalize" => &mut self.normalize,
            "trims" => &mut self.trims,
            "sense" => &mut self.sense,
            "transform" => &mut self.transform,
            "bspline" => &mut self.bspline,
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        };
        *flag = parse_bool(value).ok_or_else(|| ConfigError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(())
    }

    /// The kernel unlock key
    /// Read from `license_file` when set, otherwise `license_key`.
    /// Returns `None` when neither is configured.
    pub fn license(&self) -> Result<Option<String>, ConfigError> {
        let key = if self.license_file.is_empty() {
            self.license_key.clone()
        } else {
            read_license_file(Path::new(&self.license_file))?
        };
        Ok((!key.is_empty()).then_some(key))
    }

    /// Current value of an option, formatted the way it is parsed
    pub fn value(&self, key: &str) -> Option<String> {
        let flag = match key {
            "license_file" => return Some(self.license_file.clone()),
            "license_key" => return Some(self.license_key.clone()),
            "show_config" => self.show_config,
            "acis_warnings" => self.acis_warnings,
            "warnings" => self.warnings,
            "normalize" => self.normalize,
            "trims" => self.trims,
            "sense" => self.sense,
            "transform" => self.transform,
            "bspline" => self.bspline,
            _ => return None,
        };
        Some(flag.to_string())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for option in OPTIONS {
            let value = self.value(option.key).unwrap_or_default();
            writeln!(f, "  - {}: {}", option.key, value)?;
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// License files are often pasted from C sources, strip the quoting
fn read_license_file(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::LicenseFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\r' | '\t' | '"' | ';'))
        .collect())
}
