//! Run configuration loaded from an optional TOML file.
//!
//! Every key has a default, so an empty file (or no file at all) describes a
//! complete run.  The binary layers its command line flags on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::emit::Backend;
use crate::error::ConfigError;

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Resume source document.
    pub input: PathBuf,
    /// Directory both PDFs are written to.
    pub output_dir: PathBuf,
    /// File name of the full resume.
    pub full_name: String,
    /// File name of the short resume.
    pub short_name: String,
    /// Number of leading roles kept in the short resume.
    pub short_roles: usize,
    /// Keep the previous output under a dated name instead of overwriting it.
    pub rotate: bool,
    /// Emitter backend.
    pub backend: Backend,
    /// Font directory for the embedded backend.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/resume.yaml"),
            output_dir: PathBuf::from("output"),
            full_name: "resume.pdf".to_owned(),
            short_name: "resume-short.pdf".to_owned(),
            short_roles: 7,
            rotate: false,
            backend: Backend::default(),
            fonts_dir: None,
        }
    }
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_roles == 0 {
            return Err(ConfigError::Invalid(
                "short_roles must be at least 1".to_owned(),
            ));
        }
        for (key, name) in [("full_name", &self.full_name), ("short_name", &self.short_name)] {
            if !is_plain_file_name(name) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a plain file name, got '{name}'"
                )));
            }
        }
        if self.full_name == self.short_name {
            return Err(ConfigError::Invalid(
                "full_name and short_name must differ".to_owned(),
            ));
        }
        Ok(())
    }

    /// Destination of the full resume.
    pub fn full_path(&self) -> PathBuf {
        self.output_dir.join(&self.full_name)
    }

    /// Destination of the short resume.
    pub fn short_path(&self) -> PathBuf {
        self.output_dir.join(&self.short_name)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.trim().is_empty()
        && path.file_name().map(|file| file == path.as_os_str()).unwrap_or(false)
}
