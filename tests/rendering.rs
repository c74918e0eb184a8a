use std::fs;
use std::path::Path;

use resume_pdf::emit::{BuiltinEmitter, EmbeddedEmitter, Emitter};
use resume_pdf::fonts;
use resume_pdf::layout::{render_document, Document};
use resume_pdf::sanitize::sanitize;
use resume_pdf::{generate, Config, Header, Resume, Role, YearMonth};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

fn month(s: &str) -> YearMonth {
    s.parse().expect("valid month")
}

fn sample_resume(roles: usize) -> Resume {
    let roles: Vec<Role> = (0..roles)
        .map(|i| {
            let done = (0..5)
                .map(|b| {
                    format!(
                        "- Shipped milestone {b} of programme {i} \u{2014} owned planning, \
                         delivery and the post\u{2019}launch review with partner teams"
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            Role::new(format!("Engineer {i}"), format!("Company {i}"), month("2012-03"))
                .with_end(month("2014-11"))
                .with_location("Remote")
                .with_done(done)
                .with_stack("Rust, PostgreSQL")
        })
        .collect();
    sanitize(&Resume::new(
        Header::new("Jane Doe", "Staff Engineer", "jane@x.com", "555-0100"),
        roles,
    ))
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("emitted PDF parses")
        .get_pages()
        .len()
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if !data[index..].starts_with(tag) {
                index += 1;
                continue;
            }
            let mut cursor = index + tag.len();
            while cursor < data.len() && data[cursor] != terminator {
                if terminator == b')'
                    || !matches!(data[cursor], b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t')
                {
                    data[cursor] = b'0';
                }
                cursor += 1;
            }
            index = cursor;
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while let Some(start_pos) = data[offset..]
            .windows(start.len())
            .position(|window| window == start)
        {
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    for tag in ["/CreationDate(", "/ModDate(", "/Producer("] {
        scrub_segment(&mut normalized, tag.as_bytes(), b')');
    }
    scrub_segment(&mut normalized, b"/ID[", b']');
    for element in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ] {
        let start = format!("<{element}>");
        let end = format!("</{element}>");
        scrub_xml(&mut normalized, start.as_bytes(), end.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

fn emit_builtin(document: &Document) -> Vec<u8> {
    BuiltinEmitter::new("Jane Doe")
        .emit(document)
        .expect("builtin emitter")
}

#[test]
fn emitted_page_count_matches_layout() {
    for roles in [0, 1, 4, 12] {
        let document = render_document(&sample_resume(roles), None);
        let bytes = emit_builtin(&document);
        assert_eq!(
            page_count(&bytes),
            document.page_count(),
            "{roles} role(s)"
        );
    }
}

#[test]
fn short_variant_is_capped() {
    let resume = sample_resume(12);
    let full = render_document(&resume, None);
    let short = render_document(&resume, Some(7));
    assert_eq!(full.role_count(), 12);
    assert_eq!(short.role_count(), 7);
    assert!(page_count(&emit_builtin(&short)) <= page_count(&emit_builtin(&full)));
}

#[test]
fn rendering_is_deterministic() {
    let document = render_document(&sample_resume(5), None);
    let bytes_a = emit_builtin(&document);
    let bytes_b = emit_builtin(&document);

    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "normalized PDF hashes should match"
    );
}

#[test]
fn sanitized_text_reaches_the_page() {
    let document = render_document(&sample_resume(1), None);
    let text = document.page_text(1).join("\n");
    assert!(!text.contains('\u{2014}'));
    assert!(!text.contains('\u{2019}'));
    assert!(text.contains("post'launch"));
}

#[test]
fn embedded_backend_matches_layout() {
    if !fonts::fonts_available(None) {
        eprintln!(
            "Skipping embedded_backend_matches_layout: fonts missing. Set {} or copy assets/fonts next to the binary.",
            fonts::FONTS_DIR_ENV
        );
        return;
    }

    let document = render_document(&sample_resume(12), None);
    let bytes = EmbeddedEmitter::load("Jane Doe", None)
        .expect("fonts load")
        .emit(&document)
        .expect("embedded emitter");
    assert_eq!(page_count(&bytes), document.page_count());
}

fn write_source(dir: &Path, roles: usize) -> std::path::PathBuf {
    let mut text = String::from(
        "header:\n  name: Jane Doe\n  title: Engineer\n  email: jane@x.com\n  phone: 555-0100\nroles:\n",
    );
    for i in 0..roles {
        text.push_str(&format!(
            "  - role: Engineer {i}\n    company: Acme\n    start: \"2015-01\"\n    location: Remote\n    employment: contract\n    is_hybrid: true\n    done: \"- Did thing {i}\"\n"
        ));
    }
    let path = dir.join("resume.yaml");
    fs::write(&path, text).expect("write source");
    path
}

#[test]
fn generate_writes_full_then_short() {
    let dir = TempDir::new().expect("temp dir");
    let config = Config {
        input: write_source(dir.path(), 9),
        output_dir: dir.path().join("out"),
        ..Config::default()
    };

    let written = generate(&config).expect("generation succeeds");
    assert_eq!(written, vec![config.full_path(), config.short_path()]);
    for path in &written {
        let bytes = fs::read(path).expect("read output");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(page_count(&bytes) >= 1);
    }
}

#[test]
fn generate_writes_nothing_for_invalid_input() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("resume.yaml");
    fs::write(&input, "header: {}\nroles: []\n").expect("write source");
    let config = Config {
        input,
        output_dir: dir.path().join("out"),
        ..Config::default()
    };

    let err = generate(&config).expect_err("invalid source");
    assert!(matches!(
        err,
        resume_pdf::Error::Load(resume_pdf::LoadError::Invalid(_))
    ));
    assert!(!config.output_dir.exists());
}
