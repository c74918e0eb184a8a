//! Turning laid-out documents into PDF files.
//!
//! Emitters only translate [`DrawOp`](crate::layout::DrawOp)s; wrapping and
//! pagination have already happened in [`crate::layout`].  Files are written
//! through a temporary file in the destination directory and renamed into
//! place, so a failed run never leaves a truncated PDF behind.

mod builtin;
mod embedded;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::error::EmitError;
use crate::layout::Document;

pub use builtin::BuiltinEmitter;
pub use embedded::EmbeddedEmitter;

/// Serializes a laid-out [`Document`] to PDF bytes.
pub trait Emitter {
    /// Encodes every page of `document`.
    fn emit(&self, document: &Document) -> Result<Vec<u8>, EmitError>;
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn emit(&self, document: &Document) -> Result<Vec<u8>, EmitError> {
        (**self).emit(document)
    }
}

/// Which emitter to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Base-14 Helvetica through printpdf; needs no font files.
    #[default]
    Builtin,
    /// TrueType fonts embedded through genpdf.
    Embedded,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Builtin => "builtin",
            Backend::Embedded => "embedded",
        })
    }
}

/// Creates the emitter for `backend`.
///
/// `fonts_dir` is only consulted by the embedded backend.
pub fn emitter_for(
    backend: Backend,
    title: &str,
    fonts_dir: Option<&Path>,
) -> Result<Box<dyn Emitter>, EmitError> {
    Ok(match backend {
        Backend::Builtin => Box::new(BuiltinEmitter::new(title)),
        Backend::Embedded => Box::new(EmbeddedEmitter::load(title, fonts_dir)?),
    })
}

/// Writes `bytes` to `path` atomically, creating the parent directory.
///
/// With `rotate`, an existing file at `path` is first renamed to
/// `{stem}-{YYYY-MM-DD}.{ext}` (see [`rotated_path`]).  Returns the path written.
pub fn write_document(path: &Path, bytes: &[u8], rotate: bool) -> Result<PathBuf, EmitError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&directory).map_err(|err| EmitError::io(&directory, err))?;

    if rotate && path.exists() {
        let today = chrono::Local::now().date_naive();
        let rotated = rotated_path(path, today);
        fs::rename(path, &rotated).map_err(|err| EmitError::io(path, err))?;
        info!("kept previous {} as {}", path.display(), rotated.display());
    }

    let mut temp =
        NamedTempFile::new_in(&directory).map_err(|err| EmitError::io(&directory, err))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|err| EmitError::io(temp.path(), err))?;
    temp.persist(path).map_err(|source| EmitError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}

/// First free name of the form `{stem}-{date}.{ext}`, then `{stem}-{date}-1.{ext}`, ...
pub fn rotated_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_owned());
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pdf".to_owned());
    let date = date.format("%Y-%m-%d");

    let mut candidate = path.with_file_name(format!("{stem}-{date}.{extension}"));
    let mut suffix = 1;
    while candidate.exists() {
        candidate = path.with_file_name(format!("{stem}-{date}-{suffix}.{extension}"));
        suffix += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn rotated_names_count_up_on_same_day_collisions() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("resume.pdf");

        let first = rotated_path(&target, date());
        assert_eq!(first, dir.path().join("resume-2024-03-09.pdf"));

        fs::write(&first, b"old").unwrap();
        let second = rotated_path(&target, date());
        assert_eq!(second, dir.path().join("resume-2024-03-09-1.pdf"));

        fs::write(&second, b"older").unwrap();
        assert_eq!(
            rotated_path(&target, date()),
            dir.path().join("resume-2024-03-09-2.pdf")
        );
    }

    #[test]
    fn write_creates_directories_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out/nested/resume.pdf");

        write_document(&target, b"first", false).unwrap();
        write_document(&target, b"second", false).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"second");
        let entries = fs::read_dir(target.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1, "no temporary files are left behind");
    }

    #[test]
    fn write_with_rotation_keeps_previous_version() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("resume.pdf");

        write_document(&target, b"v1", true).unwrap();
        write_document(&target, b"v2", true).unwrap();
        write_document(&target, b"v3", true).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"v3");
        let mut kept: Vec<Vec<u8>> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path != &target)
            .map(|path| fs::read(path).unwrap())
            .collect();
        kept.sort();
        assert_eq!(kept, vec![b"v1".to_vec(), b"v2".to_vec()]);
    }

    #[test]
    fn backend_names_match_configuration_spelling() {
        assert_eq!(Backend::Builtin.to_string(), "builtin");
        assert_eq!(Backend::Embedded.to_string(), "embedded");
    }
}
