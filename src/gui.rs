use crate::config::Config;
use crate::filter::{Filter, StatusFilter};
use crate::form::{ApplicationForm, Field, FieldErrors};
use crate::notify::{DisabledNotifier, Notifier, NotifyError, SystemMailer};
use crate::record::{self, Application, Status};
use crate::sheet;
use crate::statics;
use crate::store::{EditOutcome, Slot, StoreError, Tracker};
use anyhow::Context;
use chrono::{Local, Utc};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{path::Path, path::PathBuf, sync::Arc};
use uuid::Uuid;

const UI_FONT_NAME: &str = "jobtrack-ui-font";

pub fn run_gui(config: Config) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Some(font) = config.ui_font.as_deref()
                && let Err(e) = install_ui_font(&cc.egui_ctx, font)
            {
                tracing::warn!("{e:#}");
            }
            cc.egui_ctx.set_visuals(if config.dark_theme {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(JobtrackApp::new(config)))
        }),
    )
}

/// Register a user-supplied font as a fallback so Arabic labels render.
fn install_ui_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading UI font {path:?}"))?;
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        UI_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(UI_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormTarget {
    New,
    Edit(Uuid),
}

/// The add/edit dialog: raw inputs plus the errors from the last validation.
struct FormState {
    target: FormTarget,
    fields: ApplicationForm,
    errors: FieldErrors,
}

#[derive(Clone, Debug)]
enum RowAction {
    Edit(Uuid),
    Delete(Uuid),
    OpenLink(String),
}

/// View state only. Records live in `Tracker` and change only through its
/// named operations.
struct JobtrackApp {
    config: Config,
    tracker: Tracker,
    filter: Filter,
    form: Option<FormState>,
    pending_delete: Option<Uuid>,
    dialog_dir: Option<PathBuf>,
    about_open: bool,
    status: String,
    last_error: Option<String>,
}

impl JobtrackApp {
    fn new(config: Config) -> Self {
        let notifier: Box<dyn Notifier> = if config.notify_on_status_change {
            Box::new(SystemMailer)
        } else {
            Box::new(DisabledNotifier)
        };
        let tracker = Tracker::open(Slot::new(config.data_path()), notifier);
        Self {
            config,
            tracker,
            filter: Filter::default(),
            form: None,
            pending_delete: None,
            dialog_dir: dirs::document_dir(),
            about_open: false,
            status: String::new(),
            last_error: None,
        }
    }

    fn open_new_form(&mut self) {
        self.form = Some(FormState {
            target: FormTarget::New,
            fields: ApplicationForm::default(),
            errors: FieldErrors::new(),
        });
    }

    fn open_edit_form(&mut self, id: Uuid) {
        let Some(app) = self.tracker.get(id) else {
            self.last_error = Some(StoreError::NotFound(id).to_string());
            return;
        };
        self.form = Some(FormState {
            target: FormTarget::Edit(id),
            fields: ApplicationForm::from_record(app),
            errors: FieldErrors::new(),
        });
    }

    /// Validate and commit. Returns `true` when the dialog can close.
    fn submit_form(&mut self, form: &mut FormState) -> bool {
        let draft = match form.fields.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                form.errors = errors;
                return false;
            }
        };

        match form.target {
            FormTarget::New => match self.tracker.add(draft) {
                Ok(app) => {
                    self.status = format!("Added {}", app.company_name);
                    self.last_error = None;
                }
                Err(e) => self.last_error = Some(e.to_string()),
            },
            FormTarget::Edit(id) => match self.tracker.edit(id, draft) {
                Ok(outcome) => {
                    self.status = describe_edit(&outcome);
                    self.last_error = None;
                }
                Err(e) => self.last_error = Some(e.to_string()),
            },
        }
        true
    }

    fn delete_confirmed(&mut self, id: Uuid) {
        match self.tracker.delete(id) {
            Ok(removed) => {
                self.status = format!("Deleted {}", removed.company_name);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new()
            .add_filter(statics::EN_FILE_FILTER_SPREADSHEET, &["xlsx", "xls", "ods"]);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        dlg
    }

    fn import_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };
        self.dialog_dir = path.parent().map(PathBuf::from);

        let report = match sheet::import_workbook(&path, Utc::now()) {
            Ok(report) => report,
            Err(e) => {
                self.last_error = Some(format!("Import failed: {e}"));
                return;
            }
        };

        let dropped = report.dropped;
        match self.tracker.import(report.records) {
            Ok(imported) => {
                self.status = describe_import(imported, dropped);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn export_file(&mut self) {
        let Some(path) = self
            .file_dialog()
            .set_file_name(statics::AR_EXPORT_FILE_NAME)
            .save_file()
        else {
            return;
        };
        self.dialog_dir = path.parent().map(PathBuf::from);

        match sheet::export_workbook(self.tracker.records(), &path) {
            Ok(()) => {
                self.status = format!(
                    "Exported {} applications to {}",
                    self.tracker.len(),
                    path.display()
                );
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(format!("Export failed: {e:#}")),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.dark_theme = !self.config.dark_theme;
        if self.config.dark_theme {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
        if let Err(e) = self.config.save() {
            tracing::warn!("could not persist theme: {e:#}");
        }
    }

    fn apply_row_action(&mut self, action: RowAction) {
        match action {
            RowAction::Edit(id) => self.open_edit_form(id),
            RowAction::Delete(id) => self.pending_delete = Some(id),
            RowAction::OpenLink(link) => {
                if let Err(e) = open::that(&link) {
                    self.last_error = Some(format!("Failed to open link: {e}"));
                }
            }
        }
    }

    fn render_filter_bar(&mut self, ui: &mut egui::Ui, shown: usize) {
        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_SEARCH);
            ui.add(
                egui::TextEdit::singleline(&mut self.filter.search)
                    .hint_text(statics::EN_HINT_SEARCH)
                    .desired_width(220.0),
            );
            if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                self.filter.search.clear();
            }

            ui.separator();
            ui.label(statics::EN_LABEL_STATUS_FILTER);
            egui::ComboBox::from_id_salt("status_filter")
                .selected_text(self.filter.status.label())
                .show_ui(ui, |ui| {
                    let choices = std::iter::once(StatusFilter::All)
                        .chain(Status::ALL.into_iter().map(StatusFilter::Only));
                    for choice in choices {
                        ui.selectable_value(&mut self.filter.status, choice, choice.label());
                    }
                });

            ui.separator();
            ui.label(format!("{shown} / {}", self.tracker.len()));
        });
    }

    fn render_table(ui: &mut egui::Ui, rows: &[&Application]) -> Option<RowAction> {
        let mut action = None;
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
        ui.push_id("applications_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(180.0).resizable(true))
                .column(Column::initial(180.0).resizable(true))
                .column(Column::initial(90.0).resizable(true))
                .column(Column::initial(110.0).resizable(true))
                .column(Column::initial(110.0).resizable(true))
                .column(Column::initial(160.0).resizable(true))
                .column(Column::initial(50.0).resizable(false))
                .column(Column::initial(120.0).resizable(true))
                .column(Column::remainder().resizable(false))
                .header(row_h, |mut header| {
                    for title in [
                        statics::EN_COL_COMPANY,
                        statics::EN_COL_TITLE,
                        statics::EN_COL_APPLIED,
                        statics::EN_COL_SALARY,
                        statics::EN_COL_STATUS,
                        statics::EN_COL_CONTACT,
                        statics::EN_COL_LINK,
                        statics::EN_COL_UPDATED,
                        statics::EN_EMPTY,
                    ] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for app in rows {
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                ui.label(app.company_name.as_str());
                            });
                            row.col(|ui| {
                                ui.label(app.job_title.as_str());
                            });
                            row.col(|ui| {
                                ui.label(
                                    app.applied_date
                                        .format(statics::DATE_FORMAT_DISPLAY)
                                        .to_string(),
                                );
                            });
                            row.col(|ui| {
                                ui.label(
                                    app.expected_salary
                                        .map(record::format_salary)
                                        .unwrap_or_else(|| statics::EN_LITERAL_DASH.to_string()),
                                );
                            });
                            row.col(|ui| {
                                ui.label(app.status.label())
                                    .on_hover_text(app.status.code());
                            });
                            row.col(|ui| {
                                ui.label(contact_summary(app));
                            });
                            row.col(|ui| match app.job_link.as_deref() {
                                Some(link) => {
                                    if ui.link(statics::EN_LINK_OPEN).on_hover_text(link).clicked()
                                    {
                                        action = Some(RowAction::OpenLink(link.to_string()));
                                    }
                                }
                                None => {
                                    ui.label(statics::EN_LITERAL_DASH);
                                }
                            });
                            row.col(|ui| {
                                ui.label(
                                    app.updated_at
                                        .with_timezone(&Local)
                                        .format(statics::TIMESTAMP_FORMAT_DISPLAY)
                                        .to_string(),
                                );
                            });
                            row.col(|ui| {
                                if ui.small_button(statics::EN_BTN_EDIT).clicked() {
                                    action = Some(RowAction::Edit(app.id));
                                }
                                if ui.small_button(statics::EN_BTN_DELETE).clicked() {
                                    action = Some(RowAction::Delete(app.id));
                                }
                            });
                        });
                    }
                });
        });
        action
    }

    fn render_form_window(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.form.take() else {
            return;
        };

        // Once a submit has failed, keep the inline errors in step with the inputs.
        if !form.errors.is_empty() {
            form.errors = form.fields.validate().err().unwrap_or_default();
        }

        let title = match form.target {
            FormTarget::New => statics::EN_WINDOW_NEW,
            FormTarget::Edit(_) => statics::EN_WINDOW_EDIT,
        };

        let mut open = true;
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let errors = &form.errors;
                let fields = &mut form.fields;
                egui::Grid::new("application_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for field in LEADING_FIELDS {
                            text_row(ui, field, fields, errors);
                        }

                        ui.label(Field::Status.label());
                        egui::ComboBox::from_id_salt("form_status")
                            .selected_text(fields.status.label())
                            .show_ui(ui, |ui| {
                                for status in Status::ALL {
                                    let label = status.label();
                                    ui.selectable_value(&mut fields.status, status, label);
                                }
                            });
                        ui.end_row();

                        for field in CONTACT_FIELDS {
                            text_row(ui, field, fields, errors);
                        }

                        ui.label(Field::Notes.label());
                        ui.add(
                            egui::TextEdit::multiline(&mut fields.notes)
                                .desired_rows(3)
                                .desired_width(320.0),
                        );
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let save = egui::Button::new(statics::EN_BTN_SAVE);
                    submit = ui.add_enabled(form.errors.is_empty(), save).clicked();
                    cancel = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancel = true;
        }

        let close = if submit {
            self.submit_form(&mut form)
        } else {
            cancel || !open
        };
        if !close {
            self.form = Some(form);
        }
    }

    fn render_delete_window(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete else {
            return;
        };
        let Some(app) = self.tracker.get(id) else {
            self.pending_delete = None;
            return;
        };
        let summary = format!("{} / {}", app.company_name, app.job_title);

        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(statics::EN_WINDOW_DELETE)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(statics::EN_DELETE_PROMPT);
                ui.strong(summary.as_str());
                ui.horizontal(|ui| {
                    confirmed = ui.button(statics::EN_BTN_DELETE).clicked();
                    cancelled = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if confirmed {
            self.pending_delete = None;
            self.delete_confirmed(id);
        } else if cancelled || !open {
            self.pending_delete = None;
        }
    }
}

const LEADING_FIELDS: [Field; 4] = [
    Field::CompanyName,
    Field::JobTitle,
    Field::AppliedDate,
    Field::ExpectedSalary,
];

const CONTACT_FIELDS: [Field; 4] = [
    Field::ContactName,
    Field::ContactEmail,
    Field::ContactPhone,
    Field::JobLink,
];

/// The single-line input backing `field`.
fn field_text(fields: &mut ApplicationForm, field: Field) -> Option<&mut String> {
    let text = match field {
        Field::CompanyName => &mut fields.company_name,
        Field::JobTitle => &mut fields.job_title,
        Field::AppliedDate => &mut fields.applied_date,
        Field::ExpectedSalary => &mut fields.expected_salary,
        Field::ContactName => &mut fields.contact_name,
        Field::ContactEmail => &mut fields.contact_email,
        Field::ContactPhone => &mut fields.contact_phone,
        Field::JobLink => &mut fields.job_link,
        Field::Status | Field::Notes => return None,
    };
    Some(text)
}

fn field_hint(field: Field) -> &'static str {
    match field {
        Field::CompanyName | Field::JobTitle | Field::Status => statics::EN_EMPTY,
        Field::AppliedDate => statics::EN_HINT_DATE,
        Field::JobLink => statics::EN_HINT_URL,
        _ => statics::EN_HINT_OPTIONAL,
    }
}

/// One field per grid row, with its inline error (if any) on the row below.
fn text_row(ui: &mut egui::Ui, field: Field, fields: &mut ApplicationForm, errors: &FieldErrors) {
    let Some(value) = field_text(fields, field) else {
        return;
    };
    ui.label(field.label());
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(field_hint(field))
            .desired_width(320.0),
    );
    ui.end_row();
    if let Some(err) = errors.get(&field) {
        ui.label(statics::EN_EMPTY);
        ui.colored_label(egui::Color32::RED, err.to_string());
        ui.end_row();
    }
}

fn contact_summary(app: &Application) -> String {
    [&app.contact_name, &app.contact_email, &app.contact_phone]
        .into_iter()
        .find_map(|v| v.clone())
        .unwrap_or_else(|| statics::EN_LITERAL_DASH.to_string())
}

fn describe_edit(outcome: &EditOutcome) -> String {
    let base = format!("Updated {}", outcome.record.company_name);
    match (&outcome.status_change, &outcome.notification) {
        (Some((from, to)), Some(Ok(draft))) => format!(
            "{base}: {} -> {}, mail drafted to {}",
            from.label(),
            to.label(),
            draft.to
        ),
        (Some((from, to)), Some(Err(NotifyError::Disabled))) => {
            format!("{base}: {} -> {}", from.label(), to.label())
        }
        (Some((from, to)), Some(Err(e))) => {
            format!("{base}: {} -> {} ({e})", from.label(), to.label())
        }
        _ => base,
    }
}

fn describe_import(imported: usize, dropped: usize) -> String {
    if dropped == 0 {
        format!("Imported {imported} applications")
    } else {
        format!("Imported {imported} applications, skipped {dropped} rows")
    }
}

impl eframe::App for JobtrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.form.is_none() && ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::N))
        {
            self.open_new_form();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_ADD).clicked() {
                    self.open_new_form();
                }
                ui.separator();
                if ui.button(statics::EN_BTN_IMPORT).clicked() {
                    self.import_file();
                }
                let export = egui::Button::new(statics::EN_BTN_EXPORT);
                if ui.add_enabled(!self.tracker.is_empty(), export).clicked() {
                    self.export_file();
                }
                ui.separator();
                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.toggle_theme(ctx);
                }
            });
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_DATA_FILE);
                    ui.monospace(self.tracker.slot().path().display().to_string());
                });
            self.about_open = open;
        }

        let shown = self.filter.apply(self.tracker.records()).len();

        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.tracker.slot().path().display().to_string());
                ui.separator();
                ui.label(format!("{} {}", statics::EN_LABEL_RECORDS, self.tracker.len()));
                if self.filter.is_active() {
                    ui.separator();
                    ui.label(format!("{} {shown}", statics::EN_LABEL_SHOWN));
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(self.status.as_str());
                }
            });
        });

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_filter_bar(ui, shown);
            ui.separator();

            if self.tracker.is_empty() {
                ui.label(statics::EN_HOME_EMPTY);
                return;
            }
            let visible = self.filter.apply(self.tracker.records());
            if visible.is_empty() {
                ui.label(statics::EN_SEARCH_NO_MATCHES);
                return;
            }
            action = Self::render_table(ui, &visible);
        });
        if let Some(action) = action {
            self.apply_row_action(action);
        }

        self.render_form_window(ctx);
        self.render_delete_window(ctx);
    }
}
