//! Raw form input to validated record drafts.

use crate::record::{self, Application, Status};
use crate::statics;
use chrono::{DateTime, Local, NaiveDate, Utc};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CompanyName,
    JobTitle,
    AppliedDate,
    ExpectedSalary,
    Status,
    ContactName,
    ContactEmail,
    ContactPhone,
    JobLink,
    Notes,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::CompanyName => statics::EN_FIELD_COMPANY,
            Field::JobTitle => statics::EN_FIELD_TITLE,
            Field::AppliedDate => statics::EN_FIELD_APPLIED,
            Field::ExpectedSalary => statics::EN_FIELD_SALARY,
            Field::Status => statics::EN_FIELD_STATUS,
            Field::ContactName => statics::EN_FIELD_CONTACT_NAME,
            Field::ContactEmail => statics::EN_FIELD_CONTACT_EMAIL,
            Field::ContactPhone => statics::EN_FIELD_CONTACT_PHONE,
            Field::JobLink => statics::EN_FIELD_JOB_LINK,
            Field::Notes => statics::EN_FIELD_NOTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{}", statics::EN_ERR_REQUIRED)]
    Required,
    #[error("{}", statics::EN_ERR_INVALID_DATE)]
    InvalidDate,
    #[error("{}", statics::EN_ERR_INVALID_NUMBER)]
    InvalidNumber,
    #[error("{}", statics::EN_ERR_NEGATIVE)]
    Negative,
    #[error("{}", statics::EN_ERR_INVALID_EMAIL)]
    InvalidEmail,
    #[error("{}", statics::EN_ERR_INVALID_URL)]
    InvalidUrl,
    #[error("{}", statics::EN_ERR_UNKNOWN_STATUS)]
    UnknownStatus,
}

/// Every failing field, in form order.
pub type FieldErrors = IndexMap<Field, FieldError>;

/// Field values exactly as typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationForm {
    pub company_name: String,
    pub job_title: String,
    pub applied_date: String,
    pub expected_salary: String,
    pub status: Status,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub job_link: String,
    pub notes: String,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            job_title: String::new(),
            applied_date: Local::now()
                .date_naive()
                .format(statics::DATE_FORMAT_ISO)
                .to_string(),
            expected_salary: String::new(),
            status: Status::New,
            contact_name: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            job_link: String::new(),
            notes: String::new(),
        }
    }
}

/// A validated set of user-editable fields.
/// Blank optionals are `None`, never an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub company_name: String,
    pub job_title: String,
    pub applied_date: NaiveDate,
    pub expected_salary: Option<f64>,
    pub status: Status,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub job_link: Option<String>,
    pub notes: Option<String>,
}

impl ApplicationForm {
    pub fn from_record(app: &Application) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            company_name: app.company_name.clone(),
            job_title: app.job_title.clone(),
            applied_date: app
                .applied_date
                .format(statics::DATE_FORMAT_ISO)
                .to_string(),
            expected_salary: app
                .expected_salary
                .map(record::plain_number)
                .unwrap_or_default(),
            status: app.status,
            contact_name: text(&app.contact_name),
            contact_email: text(&app.contact_email),
            contact_phone: text(&app.contact_phone),
            job_link: text(&app.job_link),
            notes: text(&app.notes),
        }
    }

    pub fn validate(&self) -> Result<Draft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let company_name = required(&self.company_name, Field::CompanyName, &mut errors);
        let job_title = required(&self.job_title, Field::JobTitle, &mut errors);

        let applied_date = match record::non_blank(&self.applied_date) {
            None => {
                errors.insert(Field::AppliedDate, FieldError::Required);
                None
            }
            Some(text) => {
                let parsed = record::parse_date(&text);
                if parsed.is_none() {
                    errors.insert(Field::AppliedDate, FieldError::InvalidDate);
                }
                parsed
            }
        };

        let expected_salary = match validate_salary(&self.expected_salary) {
            Ok(v) => v,
            Err(e) => {
                errors.insert(Field::ExpectedSalary, e);
                None
            }
        };

        let contact_email = record::non_blank(&self.contact_email);
        if let Some(email) = contact_email.as_deref()
            && !is_valid_email(email)
        {
            errors.insert(Field::ContactEmail, FieldError::InvalidEmail);
        }

        let job_link = record::non_blank(&self.job_link);
        if let Some(link) = job_link.as_deref()
            && !is_valid_link(link)
        {
            errors.insert(Field::JobLink, FieldError::InvalidUrl);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match (company_name, job_title, applied_date) {
            (Some(company_name), Some(job_title), Some(applied_date)) => Ok(Draft {
                company_name,
                job_title,
                applied_date,
                expected_salary,
                status: self.status,
                contact_name: record::non_blank(&self.contact_name),
                contact_email,
                contact_phone: record::non_blank(&self.contact_phone),
                job_link,
                notes: record::non_blank(&self.notes),
            }),
            // Every `None` above recorded an error.
            _ => Err(errors),
        }
    }
}

impl Draft {
    /// Build a brand-new record from this draft.
    pub fn into_record(self, now: DateTime<Utc>) -> Application {
        Application {
            id: record::new_id(),
            company_name: self.company_name,
            job_title: self.job_title,
            applied_date: self.applied_date,
            expected_salary: self.expected_salary,
            status: self.status,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            job_link: self.job_link,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Application {
    /// Overwrite every user-editable field; `id` and `created_at` are kept.
    pub fn apply_draft(&mut self, draft: Draft, now: DateTime<Utc>) {
        self.company_name = draft.company_name;
        self.job_title = draft.job_title;
        self.applied_date = draft.applied_date;
        self.expected_salary = draft.expected_salary;
        self.status = draft.status;
        self.contact_name = draft.contact_name;
        self.contact_email = draft.contact_email;
        self.contact_phone = draft.contact_phone;
        self.job_link = draft.job_link;
        self.notes = draft.notes;
        self.updated_at = now;
    }
}

/// Check a status code coming from free text (the GUI uses a closed list).
pub fn validate_status_code(code: &str) -> Result<Status, FieldError> {
    if code.trim().is_empty() {
        return Err(FieldError::Required);
    }
    Status::from_code(code).ok_or(FieldError::UnknownStatus)
}

fn required(value: &str, field: Field, errors: &mut FieldErrors) -> Option<String> {
    let value = record::non_blank(value);
    if value.is_none() {
        errors.insert(field, FieldError::Required);
    }
    value
}

fn validate_salary(text: &str) -> Result<Option<f64>, FieldError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value = record::parse_amount(text).ok_or(FieldError::InvalidNumber)?;
    if value < 0.0 {
        return Err(FieldError::Negative);
    }
    Ok(Some(value))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

pub fn is_valid_link(link: &str) -> bool {
    match url::Url::parse(link.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}
