//! Locating the TrueType family used by the embedded backend.
//!
//! Directories are searched in order: an explicit directory from the caller,
//! `RESUME_FONTS_DIR`, `assets/fonts` next to the executable and finally
//! `assets/fonts` in the crate root.  When none of them holds a complete
//! family the Windows Arial family is tried before giving up.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the font family, used as the file name prefix.
pub const FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable naming a directory that holds the font files.
pub const FONTS_DIR_ENV: &str = "RESUME_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const WINDOWS_FALLBACK_FAMILY_NAME: &str = "Arial";

/// Regular, bold, italic, bold italic.
const WINDOWS_FONT_FILES: [(&str, &str); 4] = [
    ("arial.ttf", "regular"),
    ("arialbd.ttf", "bold"),
    ("ariali.ttf", "italic"),
    ("arialbi.ttf", "bold italic"),
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

/// Directories searched for the font family, in priority order.
pub fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = explicit {
        candidates.push(dir.to_path_buf());
    }

    if let Some(dir) = env_path(FONTS_DIR_ENV) {
        push_unique(&mut candidates, dir);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate);
        if missing.is_empty() {
            debug!("using fonts from {}", candidate.display());
            return Ok(candidate);
        }

        let names = missing
            .iter()
            .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
            .collect::<Vec<_>>()
            .join(", ");
        attempts.push(format!("{} (missing {})", candidate.display(), names));
    }

    Err(Error::new(
        format!(
            "no complete {} family found; checked {}. Pass --fonts-dir or set {}",
            FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_family(directory: &Path) -> Result<FontFamily<FontData>, Error> {
    fonts::from_files(directory, FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "failed to load font family '{}' from {}: {}",
                FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path("RESUME_WINDOWS_FONTS_DIR") {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_windows_font(directory: &Path, (file, variant): (&str, &str)) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "failed to load fallback {} font at {}: {}",
                variant,
                path.display(),
                err
            ),
            io::Error::new(kind, err.to_string()),
        )
    })
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    let [regular, bold, italic, bold_italic] = WINDOWS_FONT_FILES;
    Ok(FontFamily {
        regular: load_windows_font(&directory, regular)?,
        bold: load_windows_font(&directory, bold)?,
        italic: load_windows_font(&directory, italic)?,
        bold_italic: load_windows_font(&directory, bold_italic)?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the LiberationSans family, falling back to Windows Arial when it cannot be found.
pub fn default_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let err = match resolve_font_directory(explicit).and_then(|dir| load_family(&dir)) {
        Ok(family) => return Ok(family),
        Err(err) if fonts_missing(&err) => err,
        Err(err) => return Err(err),
    };

    match windows_fallback_font_family() {
        Ok(fallback) => {
            warn!(
                "{} fonts unavailable ({}); falling back to the Windows '{}' family",
                FONT_FAMILY_NAME, err, WINDOWS_FALLBACK_FAMILY_NAME
            );
            Ok(fallback)
        }
        Err(fallback_err) => {
            warn!("Windows font fallback failed: {}", fallback_err);
            Err(err)
        }
    }
}

/// Returns whether a complete font family can be found without the Windows fallback.
pub fn fonts_available(explicit: Option<&Path>) -> bool {
    resolve_font_directory(explicit).is_ok()
}
