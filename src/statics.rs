// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// App identity and storage locations.
pub const APP_DIR_NAME: &str = "jobtrack";
pub const DATA_FILE_NAME: &str = "applications.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_DATA_FILE: &str = "JOBTRACK_DATA";
pub const DEFAULT_LOG_FILTER: &str = "jobtrack=info";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Jobtrack: Job Application Tracker";

pub const EN_BTN_ADD: &str = "Add Application";
pub const EN_BTN_IMPORT: &str = "Import...";
pub const EN_BTN_EXPORT: &str = "Export...";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_BTN_EDIT: &str = "Edit";
pub const EN_BTN_DELETE: &str = "Delete";
pub const EN_BTN_SAVE: &str = "Save";
pub const EN_BTN_CANCEL: &str = "Cancel";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_WINDOW_NEW: &str = "New Application";
pub const EN_WINDOW_EDIT: &str = "Edit Application";
pub const EN_WINDOW_DELETE: &str = "Delete Application";

pub const EN_ABOUT_HEADING: &str = "Jobtrack: Job Application Tracker";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_DATA_FILE: &str = "Records are stored in:";

pub const EN_HOME_EMPTY: &str = "No applications yet. Add one or import a spreadsheet.";
pub const EN_SEARCH_NO_MATCHES: &str = "No matches.";

pub const EN_LABEL_SEARCH: &str = "Search:";
pub const EN_HINT_SEARCH: &str = "company name";
pub const EN_LABEL_STATUS_FILTER: &str = "Status:";
pub const EN_FILTER_ALL: &str = "All";

pub const EN_COL_COMPANY: &str = "Company";
pub const EN_COL_TITLE: &str = "Job Title";
pub const EN_COL_APPLIED: &str = "Applied";
pub const EN_COL_SALARY: &str = "Expected Salary";
pub const EN_COL_STATUS: &str = "Status";
pub const EN_COL_CONTACT: &str = "Contact";
pub const EN_COL_LINK: &str = "Link";
pub const EN_COL_UPDATED: &str = "Updated";

pub const EN_FIELD_COMPANY: &str = "Company name";
pub const EN_FIELD_TITLE: &str = "Job title";
pub const EN_FIELD_APPLIED: &str = "Applied date";
pub const EN_FIELD_SALARY: &str = "Expected salary";
pub const EN_FIELD_STATUS: &str = "Status";
pub const EN_FIELD_CONTACT_NAME: &str = "Contact name";
pub const EN_FIELD_CONTACT_EMAIL: &str = "Contact email";
pub const EN_FIELD_CONTACT_PHONE: &str = "Contact phone";
pub const EN_FIELD_JOB_LINK: &str = "Job link";
pub const EN_FIELD_NOTES: &str = "Notes";

pub const EN_HINT_DATE: &str = "YYYY-MM-DD";
pub const EN_HINT_OPTIONAL: &str = "optional";
pub const EN_HINT_URL: &str = "https://...";

pub const EN_DELETE_PROMPT: &str = "Delete this application? This cannot be undone.";
pub const EN_LINK_OPEN: &str = "open";

pub const EN_LABEL_RECORDS: &str = "records:";
pub const EN_LABEL_SHOWN: &str = "shown:";

pub const EN_ERR_REQUIRED: &str = "This field is required";
pub const EN_ERR_INVALID_DATE: &str = "Not a valid date";
pub const EN_ERR_INVALID_NUMBER: &str = "Must be a number";
pub const EN_ERR_NEGATIVE: &str = "Must not be negative";
pub const EN_ERR_INVALID_EMAIL: &str = "Not a valid email address";
pub const EN_ERR_INVALID_URL: &str = "Not a valid http(s) link";
pub const EN_ERR_UNKNOWN_STATUS: &str = "Unknown status";

pub const EN_FILE_FILTER_SPREADSHEET: &str = "Spreadsheet";

pub const EN_LITERAL_DASH: &str = "-";
pub const EN_EMPTY: &str = "";

// Arabic strings (AR_ prefix): these are part of the data contract, not just UI.
// Status labels, in `Status::ALL` order.
pub const AR_STATUS_NEW: &str = "جديد";
pub const AR_STATUS_UNDER_REVIEW: &str = "قيد المراجعة";
pub const AR_STATUS_ACCEPTED: &str = "مقبول";
pub const AR_STATUS_REJECTED: &str = "مرفوض";
pub const AR_STATUS_AWAITING_RESPONSE: &str = "في انتظار الرد";

// Spreadsheet column labels, in export order.
pub const AR_COL_COMPANY: &str = "اسم الشركة";
pub const AR_COL_TITLE: &str = "المسمى الوظيفي";
pub const AR_COL_APPLIED: &str = "تاريخ التقديم";
pub const AR_COL_SALARY: &str = "الراتب المتوقع";
pub const AR_COL_STATUS: &str = "الحالة";
pub const AR_COL_CONTACT_NAME: &str = "اسم جهة الاتصال";
pub const AR_COL_CONTACT_EMAIL: &str = "البريد الإلكتروني";
pub const AR_COL_CONTACT_PHONE: &str = "رقم الهاتف";
pub const AR_COL_JOB_LINK: &str = "رابط الوظيفة";
pub const AR_COL_NOTES: &str = "ملاحظات";

pub const AR_SHEET_NAME: &str = "طلبات التوظيف";
pub const AR_EXPORT_FILE_NAME: &str = "طلبات_التوظيف.xlsx";

// Status-change mail.
pub const AR_MAIL_SUBJECT_PREFIX: &str = "تحديث حالة طلب التوظيف";
pub const AR_MAIL_GREETING: &str = "مرحباً";
pub const AR_MAIL_INTRO: &str = "نود إعلامكم بتحديث حالة طلب التوظيف التالي:";
pub const AR_MAIL_COMPANY: &str = "الشركة:";
pub const AR_MAIL_TITLE: &str = "المسمى الوظيفي:";
pub const AR_MAIL_PREVIOUS_STATUS: &str = "الحالة السابقة:";
pub const AR_MAIL_NEW_STATUS: &str = "الحالة الجديدة:";
pub const AR_MAIL_LINK: &str = "رابط الوظيفة:";
pub const AR_MAIL_CLOSING: &str = "مع خالص التحية";

// Date formats.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
pub const DATE_FORMAT_DISPLAY: &str = "%d/%m/%Y";
pub const XLSX_DATE_FORMAT: &str = "dd/mm/yyyy";
pub const TIMESTAMP_FORMAT_DISPLAY: &str = "%Y-%m-%d %H:%M";
