//! Text clean-up and derived display fields.
//!
//! The base-14 PDF fonts only cover a Latin-1 style repertoire, so typographic
//! punctuation that commonly sneaks in from word processors is folded to ASCII
//! here.  Sanitizing also fills in the display-only fields (`Role::dates`,
//! `Header::contact`) while keeping the machine-readable months untouched.

use crate::model::{Header, Resume, Role, YearMonth};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Replaces en dash, em dash and right single quote with their ASCII equivalents.
pub fn safe_text(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Formats a month as `Mon YYYY`, e.g. `Jan 2020`.
pub fn format_month(month: YearMonth) -> String {
    let name = MONTH_ABBREVIATIONS[usize::from(month.month()) - 1];
    format!("{} {}", name, month.year())
}

/// Builds the display range for a role: `Jan 2020 - Jun 2021` or `Jan 2020 - Present`.
pub fn display_dates(start: YearMonth, end: Option<YearMonth>) -> String {
    let end = end.map_or_else(|| "Present".to_owned(), format_month);
    format!("{} - {}", format_month(start), end)
}

/// Builds the contact line shown under the name.
pub fn contact_line(header: &Header) -> String {
    let mut line = format!("Email: {} | Mobile: {}", header.email(), header.phone());
    if let Some(location) = header.location() {
        line.push_str(" | ");
        line.push_str(location);
    }
    line
}

/// Returns a sanitized copy of `resume` with the display fields filled in.
///
/// Applying it twice gives the same result as applying it once.
pub fn sanitize(resume: &Resume) -> Resume {
    let (header, roles) = resume.clone().into_parts();
    let header = sanitize_header(header);
    let roles: Vec<Role> = roles.into_iter().map(sanitize_role).collect();
    Resume::new(header, roles)
}

fn sanitize_header(header: Header) -> Header {
    let mut header = Header {
        name: safe_text(&header.name),
        title: safe_text(&header.title),
        email: safe_text(&header.email),
        phone: safe_text(&header.phone),
        location: header.location.as_deref().map(safe_text),
        contact: String::new(),
    };
    header.contact = contact_line(&header);
    header
}

fn sanitize_role(role: Role) -> Role {
    Role {
        role: safe_text(&role.role),
        company: safe_text(&role.company),
        location: safe_text(&role.location),
        done: safe_text(&role.done),
        stack: safe_text(&role.stack),
        dates: display_dates(role.start, role.end),
        ..role
    }
}
