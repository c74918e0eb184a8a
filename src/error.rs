//! Error types shared across the crate.
//!
//! Each stage of the pipeline fails with its own type so callers can tell a
//! missing input apart from a schema problem or an output failure.  All of
//! them are terminal for a run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single schema problem, addressed by a dotted field path such as `roles[2].start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field.
    pub field: String,
    /// Constraint that was not met.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every schema violation found in a structurally valid document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the violations in document order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns whether any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schema violation", self.violations.len())?;
        if self.violations.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(": ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Failures while reading and validating the resume source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("resume source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read resume source {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed resume source {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("invalid resume data: {0}")]
    Invalid(ValidationError),
}

impl From<ValidationError> for LoadError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

/// Failures while turning a laid-out document into bytes on disk.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("font setup failed: {0}")]
    Font(#[from] genpdf::error::Error),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move finished document into place at {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while loading the optional configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for a generation run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
