//! Core library for Jobtrack, a single-window tracker for job applications.
//! Records live in one JSON file; spreadsheets with Arabic headers move them in
//! and out, and status changes can draft a mail to the recruiter.

pub mod config;
pub mod filter;
pub mod form;
mod gui;
pub mod logging;
pub mod notify;
pub mod record;
pub mod sheet;
pub mod statics;
pub mod store;

pub use config::Config;
pub use filter::{Filter, StatusFilter};
pub use form::{ApplicationForm, Draft, Field, FieldError, FieldErrors};
pub use gui::run_gui;
pub use notify::{DisabledNotifier, MailDraft, Notifier, NotifyError, SystemMailer};
pub use record::{Application, Status};
pub use sheet::{ImportError, ImportReport, export_workbook, import_workbook};
pub use store::{EditOutcome, Slot, StoreError, Tracker};
