//! End-to-end tests for the `resume` binary.

use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

fn resume_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("resume"));
    cmd.current_dir(dir)
        .env_remove("RESUME_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn role(index: usize) -> String {
    format!(
        r#"  - role: Engineer {index}
    company: Company {index}
    start: "20{year:02}-01"
    end: "20{year:02}-12"
    location: Remote
    employment: permanent
    done: |
      - Delivered project {index}
    stack: Rust
"#,
        year = 10 + index
    )
}

fn write_resume(dir: &Path, roles: usize) {
    let mut text = String::from(
        "header:\n  name: Jane Doe\n  title: Engineer\n  email: jane@x.com\n  phone: 555-0100\nroles:\n",
    );
    for index in 0..roles {
        text.push_str(&role(index));
    }
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(dir.join("data/resume.yaml"), text).unwrap();
}

fn page_count(path: &Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

#[test]
fn generates_full_and_short_resumes_with_defaults() {
    let dir = TempDir::new().unwrap();
    write_resume(dir.path(), 9);

    resume_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF generated:").count(2))
        .stdout(predicate::str::contains("resume-short.pdf"));

    let full = dir.path().join("output/resume.pdf");
    let short = dir.path().join("output/resume-short.pdf");
    assert!(page_count(&full) >= 1);
    assert!(page_count(&short) >= 1);
    assert!(fs::metadata(&full).unwrap().len() > fs::metadata(&short).unwrap().len());
}

#[test]
fn flags_override_the_configuration_file() {
    let dir = TempDir::new().unwrap();
    write_resume(dir.path(), 3);
    fs::write(
        dir.path().join("resume.toml"),
        "output_dir = \"dist\"\nshort_name = \"cv-short.pdf\"\nshort_roles = 2\n",
    )
    .unwrap();

    resume_cmd(dir.path())
        .args(["--config", "resume.toml", "--output-dir", "public"])
        .assert()
        .success();

    assert!(dir.path().join("public/resume.pdf").is_file());
    assert!(dir.path().join("public/cv-short.pdf").is_file());
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn invalid_resume_reports_violations_and_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bad.yaml"),
        "header:\n  name: Jane\n  title: Eng\n  email: j@x.com\n  phone: 1\nroles:\n  - role: Eng\n    company: Acme\n    start: \"2020-13\"\n    location: x\n    employment: freelance\n",
    )
    .unwrap();

    let output = resume_cmd(dir.path())
        .args(["--input", "bad.yaml"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap_or_default();
    assert!(first.starts_with("Error: invalid resume data"), "{stderr}");
    assert!(first.contains("roles[0].start"), "{stderr}");
    assert!(first.contains("roles[0].employment"), "{stderr}");
    assert!(!stderr.contains("caused by:"), "{stderr}");

    assert!(!dir.path().join("output").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();

    resume_cmd(dir.path())
        .args(["--input", "nowhere.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resume source not found"));
}

#[test]
fn zero_short_roles_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_resume(dir.path(), 1);

    resume_cmd(dir.path())
        .args(["--short-roles", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("short_roles must be at least 1"));
}

#[test]
fn rotate_keeps_the_previous_output() {
    let dir = TempDir::new().unwrap();
    write_resume(dir.path(), 2);

    resume_cmd(dir.path()).assert().success();
    resume_cmd(dir.path()).arg("--rotate").assert().success();

    let names: Vec<String> = fs::read_dir(dir.path().join("output"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 4, "{names:?}");
    assert!(names.iter().any(|name| name.starts_with("resume-short-20")));
}
