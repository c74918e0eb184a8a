//! Loading and validating the YAML resume source.
//!
//! Loading happens in two stages.  The source must first be a non-empty YAML
//! mapping; anything else is a [`LoadError::Malformed`] input.  The mapping is
//! then walked field by field and every schema violation is collected into a
//! single [`ValidationError`] instead of stopping at the first one.

use std::fs;
use std::path::Path;

use log::debug;
use serde_yaml::Value;

use crate::error::{LoadError, ValidationError, Violation};
use crate::model::{EmploymentKind, Header, Resume, Role, YearMonth};

/// Reads, parses and validates the resume at `path`.
pub fn load_resume(path: impl AsRef<Path>) -> Result<Resume, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse_source(path, &text)?;
    let resume = validate(&value)?;
    debug!(
        "loaded resume from {} with {} roles",
        path.display(),
        resume.roles().len()
    );
    Ok(resume)
}

/// Parses `text` and checks that it is a non-empty mapping.
///
/// `path` is only used to label the error.
pub fn parse_source(path: &Path, text: &str) -> Result<Value, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let value: Value = serde_yaml::from_str(text).map_err(|err| malformed(err.to_string()))?;
    match &value {
        Value::Mapping(mapping) if !mapping.is_empty() => Ok(value),
        Value::Mapping(_) | Value::Null => Err(malformed(
            "document is empty; expected a mapping with resume data".to_owned(),
        )),
        other => Err(malformed(format!(
            "expected a mapping at the top level, found {}",
            kind_of(other)
        ))),
    }
}

/// Validates a parsed document and builds the [`Resume`] it describes.
pub fn validate(value: &Value) -> Result<Resume, ValidationError> {
    let mut checker = Checker::default();

    let header = match value.get("header") {
        None | Some(Value::Null) => {
            checker.report("header", "is required");
            None
        }
        Some(header) if header.is_mapping() => checker.header(header),
        Some(other) => {
            checker.report("header", format!("must be a mapping, found {}", kind_of(other)));
            None
        }
    };

    let mut roles = Vec::new();
    match value.get("roles") {
        None | Some(Value::Null) => checker.report("roles", "is required"),
        Some(Value::Sequence(items)) => {
            for (index, item) in items.iter().enumerate() {
                if let Some(role) = checker.role(index, item) {
                    roles.push(role);
                }
            }
        }
        Some(other) => checker.report(
            "roles",
            format!("must be a sequence, found {}", kind_of(other)),
        ),
    }

    match (header, checker.violations.is_empty()) {
        (Some(header), true) => Ok(Resume::new(header, roles)),
        _ => Err(ValidationError::new(checker.violations)),
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn report(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    fn header(&mut self, value: &Value) -> Option<Header> {
        let before = self.violations.len();
        let name = self.required_text(value, "header", "name");
        let email = self.required_text(value, "header", "email");
        let phone = self.required_text(value, "header", "phone");
        let title = self.required_text(value, "header", "title");
        let location = self
            .optional_text(value, "header", "location")
            .filter(|location| !location.trim().is_empty());

        if self.violations.len() > before {
            return None;
        }
        Some(Header::new(name?, title?, email?, phone?).with_location(location))
    }

    fn role(&mut self, index: usize, value: &Value) -> Option<Role> {
        let prefix = format!("roles[{index}]");
        if !value.is_mapping() {
            self.report(
                prefix,
                format!("must be a mapping, found {}", kind_of(value)),
            );
            return None;
        }

        let before = self.violations.len();
        let title = self.required_text(value, &prefix, "role");
        let company = self.required_text(value, &prefix, "company");
        let location = self.present_text(value, &prefix, "location");
        let employment = self.employment(value, &prefix);
        let start = self.month(value, &prefix, "start", true);
        let end = self.month(value, &prefix, "end", false);
        let is_hybrid = self.flag(value, &prefix, "is_hybrid");
        let done = self.optional_text(value, &prefix, "done").unwrap_or_default();
        let stack = self.optional_text(value, &prefix, "stack").unwrap_or_default();

        if let (Some(Some(start)), Some(Some(end))) = (start, end) {
            if end < start {
                self.report(
                    format!("{prefix}.end"),
                    format!("{end} is earlier than start {start}"),
                );
            }
        }

        if self.violations.len() > before {
            return None;
        }
        Some(
            Role::new(title?, company?, start.flatten()?)
                .with_location(location?)
                .with_employment(employment?)
                .with_hybrid(is_hybrid?)
                .with_end(end.flatten())
                .with_done(done)
                .with_stack(stack),
        )
    }

    /// Text that must be present and non-blank.
    fn required_text(&mut self, parent: &Value, prefix: &str, key: &str) -> Option<String> {
        let text = self.present_text(parent, prefix, key)?;
        if text.trim().is_empty() {
            self.report(format!("{prefix}.{key}"), "must not be empty");
            return None;
        }
        Some(text)
    }

    /// Text that must be present but may be empty.
    fn present_text(&mut self, parent: &Value, prefix: &str, key: &str) -> Option<String> {
        match parent.get(key) {
            None | Some(Value::Null) => {
                self.report(format!("{prefix}.{key}"), "is required");
                None
            }
            Some(value) => self.scalar(value, prefix, key),
        }
    }

    /// Free text where a missing or null value means empty.
    fn optional_text(&mut self, parent: &Value, prefix: &str, key: &str) -> Option<String> {
        match parent.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => self.scalar(value, prefix, key),
        }
    }

    fn scalar(&mut self, value: &Value, prefix: &str, key: &str) -> Option<String> {
        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            other => {
                self.report(
                    format!("{prefix}.{key}"),
                    format!("must be text, found {}", kind_of(other)),
                );
                None
            }
        }
    }

    fn employment(&mut self, parent: &Value, prefix: &str) -> Option<EmploymentKind> {
        let raw = self.present_text(parent, prefix, "employment")?;
        match raw.trim().parse() {
            Ok(kind) => Some(kind),
            Err(message) => {
                self.report(format!("{prefix}.employment"), message);
                None
            }
        }
    }

    /// Returns `Some(None)` for an absent optional month and `None` on a violation.
    fn month(
        &mut self,
        parent: &Value,
        prefix: &str,
        key: &str,
        required: bool,
    ) -> Option<Option<YearMonth>> {
        let raw = if required {
            self.present_text(parent, prefix, key)?
        } else {
            match self.optional_text(parent, prefix, key) {
                Some(raw) if !raw.is_empty() => raw,
                Some(_) => return Some(None),
                None if matches!(parent.get(key), None | Some(Value::Null)) => return Some(None),
                None => return None,
            }
        };

        match raw.parse::<YearMonth>() {
            Ok(month) => Some(Some(month)),
            Err(err) => {
                self.report(format!("{prefix}.{key}"), err.to_string());
                None
            }
        }
    }

    fn flag(&mut self, parent: &Value, prefix: &str, key: &str) -> Option<bool> {
        match parent.get(key) {
            None | Some(Value::Null) => Some(false),
            Some(Value::Bool(flag)) => Some(*flag),
            Some(other) => {
                self.report(
                    format!("{prefix}.{key}"),
                    format!("must be a boolean, found {}", kind_of(other)),
                );
                None
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
