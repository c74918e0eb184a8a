//! End-to-end generation of the full and short resumes.

use std::path::PathBuf;

use log::{debug, info};

use crate::config::Config;
use crate::emit::{emitter_for, write_document, Emitter};
use crate::error::Error;
use crate::layout::{Document, LayoutEngine};
use crate::model::Resume;
use crate::sanitize::sanitize;
use crate::schema::load_resume;

/// Both laid-out variants of one resume.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Every role.
    pub full: Document,
    /// The leading roles only.
    pub short: Document,
}

/// Lays out the full and the short variant of an already sanitized resume.
pub fn render_variants(resume: &Resume, short_roles: usize) -> Rendered {
    let engine = LayoutEngine::standard();
    Rendered {
        full: engine.render(resume, None),
        short: engine.render(resume, Some(short_roles)),
    }
}

fn document_title(resume: &Resume) -> String {
    let name = resume.header().name().trim();
    if name.is_empty() {
        "Resume".to_owned()
    } else {
        name.to_owned()
    }
}

/// Runs a whole generation and returns the written paths, full resume first.
///
/// Nothing is written unless the source validates and both documents encode.
pub fn generate(config: &Config) -> Result<Vec<PathBuf>, Error> {
    config.validate()?;

    let resume = sanitize(&load_resume(&config.input)?);
    info!(
        "loaded {} role(s) from {}",
        resume.roles().len(),
        config.input.display()
    );

    let rendered = render_variants(&resume, config.short_roles);
    debug!(
        "full resume spans {} page(s), short resume {} page(s)",
        rendered.full.page_count(),
        rendered.short.page_count()
    );

    debug!("encoding with the {} backend", config.backend);
    let emitter = emitter_for(
        config.backend,
        &document_title(&resume),
        config.fonts_dir.as_deref(),
    )?;
    let full = emitter.emit(&rendered.full)?;
    let short = emitter.emit(&rendered.short)?;

    Ok(vec![
        write_document(&config.full_path(), &full, config.rotate)?,
        write_document(&config.short_path(), &short, config.rotate)?,
    ])
}
