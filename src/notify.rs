//! Status-change mail composed for the desktop's mail handler.
//!
//! Sending is best-effort: the draft is handed to whatever application is
//! registered for `mailto:` links and nothing confirms delivery.

use crate::record::Application;
use crate::statics;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// RFC 6068 leaves these unreserved; everything else in subject/body is encoded.
const MAILTO_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("no contact email on \"{company}\"; status change mail not sent")]
    NoRecipient { company: String },
    #[error("status change notifications are disabled")]
    Disabled,
    #[error("could not open the mail client: {0}")]
    Launch(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            utf8_percent_encode(&self.to, MAILTO_ENCODE).to_string().replace("%40", "@"),
            utf8_percent_encode(&self.subject, MAILTO_ENCODE),
            utf8_percent_encode(&self.body, MAILTO_ENCODE),
        )
    }
}

/// Build the status-change mail for an edit from `previous` to `updated`.
pub fn compose(previous: &Application, updated: &Application) -> Result<MailDraft, NotifyError> {
    let Some(to) = updated.contact_email.clone() else {
        return Err(NotifyError::NoRecipient {
            company: updated.company_name.clone(),
        });
    };

    let subject = format!(
        "{} - {}",
        statics::AR_MAIL_SUBJECT_PREFIX,
        updated.company_name
    );

    let greeting = match updated.contact_name.as_deref() {
        Some(name) => format!("{} {name}،", statics::AR_MAIL_GREETING),
        None => format!("{}،", statics::AR_MAIL_GREETING),
    };

    let mut lines = vec![
        greeting,
        String::new(),
        statics::AR_MAIL_INTRO.to_string(),
        format!("{} {}", statics::AR_MAIL_COMPANY, updated.company_name),
        format!("{} {}", statics::AR_MAIL_TITLE, updated.job_title),
        format!(
            "{} {}",
            statics::AR_MAIL_PREVIOUS_STATUS,
            previous.status.label()
        ),
        format!("{} {}", statics::AR_MAIL_NEW_STATUS, updated.status.label()),
    ];
    if let Some(link) = updated.job_link.as_deref() {
        lines.push(format!("{} {link}", statics::AR_MAIL_LINK));
    }
    lines.push(String::new());
    lines.push(statics::AR_MAIL_CLOSING.to_string());

    Ok(MailDraft {
        to,
        subject,
        body: lines.join("\n"),
    })
}

/// Receives committed status changes.
pub trait Notifier {
    fn notify(
        &self,
        previous: &Application,
        updated: &Application,
    ) -> Result<MailDraft, NotifyError>;
}

/// Opens the composed mail in the user's default mail client.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMailer;

impl Notifier for SystemMailer {
    fn notify(
        &self,
        previous: &Application,
        updated: &Application,
    ) -> Result<MailDraft, NotifyError> {
        let draft = compose(previous, updated)?;
        open::that(draft.mailto_url())?;
        tracing::info!(to = %draft.to, "opened status change mail");
        Ok(draft)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn notify(&self, _: &Application, _: &Application) -> Result<MailDraft, NotifyError> {
        Err(NotifyError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::{MailDraft, NotifyError, compose};
    use crate::record::{Application, Status};
    use chrono::{NaiveDate, Utc};

    fn app(status: Status, email: Option<&str>) -> Application {
        let now = Utc::now();
        Application {
            id: crate::record::new_id(),
            company_name: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            applied_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expected_salary: None,
            status,
            contact_name: Some("Sara".to_string()),
            contact_email: email.map(str::to_string),
            contact_phone: None,
            job_link: Some("https://acme.com/jobs/1".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn compose_summarizes_the_change() {
        let before = app(Status::New, Some("hr@acme.com"));
        let mut after = before.clone();
        after.status = Status::Accepted;

        let draft = compose(&before, &after).unwrap();
        assert_eq!(draft.to, "hr@acme.com");
        assert!(draft.subject.ends_with("- Acme"));
        assert!(draft.body.contains("جديد"));
        assert!(draft.body.contains("مقبول"));
        assert!(draft.body.contains("https://acme.com/jobs/1"));
        assert!(draft.body.contains("Sara"));
    }

    #[test]
    fn compose_without_recipient_is_a_warning() {
        let before = app(Status::New, None);
        let mut after = before.clone();
        after.status = Status::Rejected;

        let err = compose(&before, &after).unwrap_err();
        assert!(matches!(err, NotifyError::NoRecipient { ref company } if company == "Acme"));
    }

    #[test]
    fn mailto_url_is_encoded() {
        let draft = MailDraft {
            to: "hr@acme.com".to_string(),
            subject: "a b&c".to_string(),
            body: "line1\nline2".to_string(),
        };
        assert_eq!(
            draft.mailto_url(),
            "mailto:hr@acme.com?subject=a%20b%26c&body=line1%0Aline2"
        );
    }
}
