//! Data structures describing the content of a resume.
//!
//! A [`Resume`] is built once per run by [`crate::schema`], cleaned up by
//! [`crate::sanitize`] and then only read.  The types expose accessors and
//! `with_*` builders so tests and callers can assemble resumes without going
//! through YAML.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

static MONTH_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Pattern every `start`/`end` value must match: a zero-padded calendar month.
pub(crate) fn month_pattern() -> &'static Regex {
    MONTH_PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])$").expect("month pattern is a valid regex")
    })
}

/// A calendar month written as `YYYY-MM` in the source data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Creates a month value, returning `None` when `month` is outside `1..=12`.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Returns the four digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month number, `1` for January.
    pub fn month(&self) -> u8 {
        self.month
    }
}

/// Error returned when a string is not a `YYYY-MM` month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseYearMonthError {
    input: String,
}

impl fmt::Display for ParseYearMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a YYYY-MM month", self.input)
    }
}

impl std::error::Error for ParseYearMonthError {}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseYearMonthError {
            input: s.to_owned(),
        };
        if !month_pattern().is_match(s) {
            return Err(err());
        }
        let year = s[..4].parse().map_err(|_| err())?;
        let month = s[5..].parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Kind of employment for a role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmploymentKind {
    /// Regular employment.
    #[default]
    Permanent,
    /// Fixed-term or contracting engagement.
    Contract,
}

impl EmploymentKind {
    /// Spelling used in the YAML source.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentKind::Permanent => "permanent",
            EmploymentKind::Contract => "contract",
        }
    }
}

impl FromStr for EmploymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permanent" => Ok(EmploymentKind::Permanent),
            "contract" => Ok(EmploymentKind::Contract),
            other => Err(format!(
                "'{other}' is not a valid employment kind (expected 'permanent' or 'contract')"
            )),
        }
    }
}

impl fmt::Display for EmploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity block printed at the top of the first page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) location: Option<String>,
    pub(crate) contact: String,
}

impl Header {
    /// Creates a header from the four required fields.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: email.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Returns the full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display title or tagline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the e-mail address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the city or region appended to the contact line, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the derived contact line. Empty until the resume is sanitized.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Sets the location and returns the updated header.
    pub fn with_location(mut self, location: impl Into<Option<String>>) -> Self {
        self.location = location.into();
        self
    }
}

/// One employment entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub(crate) role: String,
    pub(crate) company: String,
    pub(crate) location: String,
    pub(crate) employment: EmploymentKind,
    pub(crate) is_hybrid: bool,
    pub(crate) start: YearMonth,
    pub(crate) end: Option<YearMonth>,
    pub(crate) done: String,
    pub(crate) stack: String,
    pub(crate) dates: String,
}

impl Role {
    /// Creates a permanent, on-site role with no end date and empty text.
    pub fn new(role: impl Into<String>, company: impl Into<String>, start: YearMonth) -> Self {
        Self {
            role: role.into(),
            company: company.into(),
            location: String::new(),
            employment: EmploymentKind::Permanent,
            is_hybrid: false,
            start,
            end: None,
            done: String::new(),
            stack: String::new(),
            dates: String::new(),
        }
    }

    /// Returns the job title.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the company name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Returns the location, possibly empty.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the employment kind.
    pub fn employment(&self) -> EmploymentKind {
        self.employment
    }

    /// Returns whether the role was hybrid.
    pub fn is_hybrid(&self) -> bool {
        self.is_hybrid
    }

    /// Returns the first month of the role.
    pub fn start(&self) -> YearMonth {
        self.start
    }

    /// Returns the last month of the role, `None` while it is ongoing.
    pub fn end(&self) -> Option<YearMonth> {
        self.end
    }

    /// Returns the accomplishments text: newline separated paragraphs, `-` marks a bullet.
    pub fn done(&self) -> &str {
        &self.done
    }

    /// Returns the technology stack summary.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Returns the display date range. Empty until the resume is sanitized.
    pub fn dates(&self) -> &str {
        &self.dates
    }

    /// Annotations printed after the company: location, then `Hybrid`, then `Contract`.
    pub fn annotations(&self) -> Vec<&str> {
        let mut parts = Vec::new();
        let location = self.location.trim();
        if !location.is_empty() {
            parts.push(location);
        }
        if self.is_hybrid {
            parts.push("Hybrid");
        }
        if self.employment == EmploymentKind::Contract {
            parts.push("Contract");
        }
        parts
    }

    /// Sets the location and returns the updated role.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the employment kind and returns the updated role.
    pub fn with_employment(mut self, employment: EmploymentKind) -> Self {
        self.employment = employment;
        self
    }

    /// Sets the hybrid flag and returns the updated role.
    pub fn with_hybrid(mut self, is_hybrid: bool) -> Self {
        self.is_hybrid = is_hybrid;
        self
    }

    /// Sets the end month and returns the updated role.
    pub fn with_end(mut self, end: impl Into<Option<YearMonth>>) -> Self {
        self.end = end.into();
        self
    }

    /// Sets the accomplishments text and returns the updated role.
    pub fn with_done(mut self, done: impl Into<String>) -> Self {
        self.done = done.into();
        self
    }

    /// Sets the stack summary and returns the updated role.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }
}

/// The resume aggregate: a header and an ordered list of roles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resume {
    header: Header,
    roles: Vec<Role>,
}

impl Resume {
    /// Creates a resume, keeping the roles in the given order.
    pub fn new(header: Header, roles: impl Into<Vec<Role>>) -> Self {
        Self {
            header,
            roles: roles.into(),
        }
    }

    /// Returns the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the roles in source order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns the first `max_roles` roles, or all of them when `max_roles` is `None`.
    pub fn leading_roles(&self, max_roles: Option<usize>) -> &[Role] {
        match max_roles {
            Some(max) => &self.roles[..max.min(self.roles.len())],
            None => &self.roles,
        }
    }

    pub(crate) fn into_parts(self) -> (Header, Vec<Role>) {
        (self.header, self.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> YearMonth {
        s.parse().expect("valid month")
    }

    #[test]
    fn year_month_round_trips_display() {
        assert_eq!(month("2020-01").to_string(), "2020-01");
        assert_eq!(month("1999-12"), YearMonth::new(1999, 12).unwrap());
    }

    #[test]
    fn year_month_rejects_malformed_values() {
        for bad in ["2020-13", "2020-1", "2020-00", "20-01", "2020/01", " 2020-01", ""] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn year_month_orders_chronologically() {
        assert!(month("2020-12") < month("2021-01"));
        assert!(month("2021-02") > month("2021-01"));
    }

    #[test]
    fn employment_kind_parses_source_spellings() {
        assert_eq!("contract".parse(), Ok(EmploymentKind::Contract));
        assert_eq!("permanent".parse(), Ok(EmploymentKind::Permanent));
        assert!("freelance".parse::<EmploymentKind>().is_err());
    }

    #[test]
    fn annotations_follow_location_hybrid_contract_order() {
        let role = Role::new("Eng", "Acme", month("2022-01"))
            .with_location("Remote")
            .with_hybrid(true)
            .with_employment(EmploymentKind::Contract);
        assert_eq!(role.annotations(), vec!["Remote", "Hybrid", "Contract"]);

        let bare = Role::new("Eng", "Acme", month("2022-01")).with_location("  ");
        assert!(bare.annotations().is_empty());
    }

    #[test]
    fn leading_roles_keeps_source_order() {
        let roles: Vec<_> = (1..=9)
            .map(|i| Role::new(format!("Role {i}"), "Acme", month("2020-01")))
            .collect();
        let resume = Resume::new(Header::new("A", "B", "c@d", "1"), roles);

        let short = resume.leading_roles(Some(7));
        assert_eq!(short.len(), 7);
        assert_eq!(short[0].role(), "Role 1");
        assert_eq!(short[6].role(), "Role 7");

        assert_eq!(resume.leading_roles(Some(20)).len(), 9);
        assert_eq!(resume.leading_roles(None).len(), 9);
    }
}
