use crate::statics;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage of a job application.
///
/// Each status has exactly one stable code (used in the record file) and one
/// Arabic display label (used in the UI and in spreadsheets). `ALL` is the
/// single ordered table both lookups walk, so the mapping stays a bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    New,
    UnderReview,
    Accepted,
    Rejected,
    AwaitingResponse,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::New,
        Status::UnderReview,
        Status::Accepted,
        Status::Rejected,
        Status::AwaitingResponse,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Status::New => "new",
            Status::UnderReview => "under_review",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::AwaitingResponse => "awaiting_response",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::New => statics::AR_STATUS_NEW,
            Status::UnderReview => statics::AR_STATUS_UNDER_REVIEW,
            Status::Accepted => statics::AR_STATUS_ACCEPTED,
            Status::Rejected => statics::AR_STATUS_REJECTED,
            Status::AwaitingResponse => statics::AR_STATUS_AWAITING_RESPONSE,
        }
    }

    pub fn from_code(code: &str) -> Option<Status> {
        let code = code.trim();
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Status> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub applied_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<f64>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Same record content, ignoring identity and timestamps.
    /// Used when comparing records that went through an export/import cycle.
    pub fn same_content(&self, other: &Application) -> bool {
        self.company_name == other.company_name
            && self.job_title == other.job_title
            && self.applied_date == other.applied_date
            && self.expected_salary == other.expected_salary
            && self.status == other.status
            && self.contact_name == other.contact_name
            && self.contact_email == other.contact_email
            && self.contact_phone == other.contact_phone
            && self.job_link == other.job_link
            && self.notes == other.notes
    }
}

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Trim a free-text value; blank becomes `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

const DATE_INPUT_FORMATS: [&str; 4] = [
    statics::DATE_FORMAT_ISO,
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
];

/// Years a spreadsheet date cell can hold.
pub const DATE_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Parse a user- or spreadsheet-supplied date.
///
/// Accepts ISO dates and day-first dates, with ASCII or Arabic-Indic digits.
/// Bidi marks that Arabic locales insert around separators are ignored.
/// Years outside [`DATE_YEARS`] are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let normalized = normalize_digits(text);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(normalized, fmt).ok())
        .filter(|date| DATE_YEARS.contains(&date.year()))
}

/// Parse an amount such as "12,500" or "١٢٥٠٠". Returns `None` for anything
/// that is not a finite number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let normalized: String = normalize_digits(text)
        .chars()
        .filter(|c| !matches!(c, ',' | '\u{066C}' | ' '))
        .map(|c| if c == '\u{066B}' { '.' } else { c })
        .collect();
    let value = normalized.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

fn normalize_digits(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200E}' | '\u{200F}' | '\u{061C}'))
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

/// Render a salary without a trailing ".0" for whole amounts.
pub fn format_salary(value: f64) -> String {
    if is_whole(value) {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Like [`format_salary`] but never rounds, so the text parses back to `value`.
pub fn plain_number(value: f64) -> String {
    if is_whole(value) {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn is_whole(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() < 1e15
}
