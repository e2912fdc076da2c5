//! Spreadsheet import/export.
//!
//! One worksheet, first row holds the Arabic column labels, one row per record.
//! Export writes `.xlsx`; import reads anything calamine can open (`.xlsx`,
//! `.xls`, `.ods`) and maps rows back through the same label table.

use crate::record::{self, Application, Status};
use crate::statics;
use anyhow::Context;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Company,
    Title,
    AppliedDate,
    Salary,
    Status,
    ContactName,
    ContactEmail,
    ContactPhone,
    JobLink,
    Notes,
}

impl Column {
    /// Export order.
    pub const ALL: [Column; 10] = [
        Column::Company,
        Column::Title,
        Column::AppliedDate,
        Column::Salary,
        Column::Status,
        Column::ContactName,
        Column::ContactEmail,
        Column::ContactPhone,
        Column::JobLink,
        Column::Notes,
    ];

    /// Columns an import cannot do without.
    pub const REQUIRED: [Column; 3] = [Column::Company, Column::Title, Column::Status];

    pub fn label(self) -> &'static str {
        match self {
            Column::Company => statics::AR_COL_COMPANY,
            Column::Title => statics::AR_COL_TITLE,
            Column::AppliedDate => statics::AR_COL_APPLIED,
            Column::Salary => statics::AR_COL_SALARY,
            Column::Status => statics::AR_COL_STATUS,
            Column::ContactName => statics::AR_COL_CONTACT_NAME,
            Column::ContactEmail => statics::AR_COL_CONTACT_EMAIL,
            Column::ContactPhone => statics::AR_COL_CONTACT_PHONE,
            Column::JobLink => statics::AR_COL_JOB_LINK,
            Column::Notes => statics::AR_COL_NOTES,
        }
    }

    pub fn from_label(label: &str) -> Option<Column> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    fn width(self) -> f64 {
        match self {
            Column::Company | Column::Title | Column::ContactEmail | Column::JobLink => 28.0,
            Column::Notes => 40.0,
            _ => 16.0,
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// A spreadsheet cell, independent of the file format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }

    fn text(opt: &Option<String>) -> Cell {
        opt.as_ref()
            .map(|s| Cell::Text(s.clone()))
            .unwrap_or(Cell::Empty)
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(datetime) => Cell::Date(datetime.date()),
                None => Cell::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => s
                .get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, statics::DATE_FORMAT_ISO).ok())
                .map(Cell::Date)
                .unwrap_or_else(|| Cell::Text(s.clone())),
            Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

/// The cells of one exported row, aligned with `Column::ALL`.
pub fn record_to_row(app: &Application) -> Vec<Cell> {
    Column::ALL
        .iter()
        .map(|column| match column {
            Column::Company => Cell::Text(app.company_name.clone()),
            Column::Title => Cell::Text(app.job_title.clone()),
            Column::AppliedDate => Cell::Date(app.applied_date),
            Column::Salary => app.expected_salary.map(Cell::Number).unwrap_or(Cell::Empty),
            Column::Status => Cell::Text(app.status.label().to_string()),
            Column::ContactName => Cell::text(&app.contact_name),
            Column::ContactEmail => Cell::text(&app.contact_email),
            Column::ContactPhone => Cell::text(&app.contact_phone),
            Column::JobLink => Cell::text(&app.job_link),
            Column::Notes => Cell::text(&app.notes),
        })
        .collect()
}

/// Write every record, in store order, to a single-sheet `.xlsx` file.
pub fn export_workbook(records: &[Application], path: &Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(statics::XLSX_DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(statics::AR_SHEET_NAME)?;
    worksheet.set_right_to_left(true);

    for (col, column) in Column::ALL.iter().enumerate() {
        let col = u16::try_from(col)?;
        worksheet.write_string_with_format(0, col, column.label(), &header_format)?;
        worksheet.set_column_width(col, column.width())?;
    }

    for (idx, app) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1)?;
        for (col, cell) in record_to_row(app).into_iter().enumerate() {
            let col = u16::try_from(col)?;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text.as_str())?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                Cell::Date(date) => match excel_date(date) {
                    Some(cell_date) => {
                        worksheet.write_datetime_with_format(row, col, &cell_date, &date_format)?;
                    }
                    None => {
                        // A hand-edited slot can hold years a date cell cannot.
                        let text = date.format(statics::DATE_FORMAT_ISO).to_string();
                        worksheet.write_string(row, col, text.as_str())?;
                    }
                },
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {path:?}"))?;
    tracing::info!(count = records.len(), path = %path.display(), "exported applications");
    Ok(())
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    if !record::DATE_YEARS.contains(&date.year()) {
        return None;
    }
    ExcelDateTime::from_ymd(
        u16::try_from(date.year()).ok()?,
        u8::try_from(date.month()).ok()?,
        u8::try_from(date.day()).ok()?,
    )
    .ok()
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read spreadsheet {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("the spreadsheet has no worksheets")]
    NoWorksheet,
    #[error("the first row is missing the column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// Records mapped from a sheet, in sheet order, plus how many data rows were
/// skipped because they could not become a record.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub records: Vec<Application>,
    pub dropped: usize,
}

/// Read the first worksheet of `path`. Any file-level failure aborts the whole
/// import; individual rows that do not map are only counted.
pub fn import_workbook(path: &Path, now: DateTime<Utc>) -> Result<ImportReport, ImportError> {
    let open_err = |source: calamine::Error| ImportError::Open {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(open_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)?
        .map_err(open_err)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect::<Vec<_>>());
    let header = rows.next().unwrap_or_default();
    let report = rows_to_records(&header, rows, now)?;

    tracing::info!(
        imported = report.records.len(),
        dropped = report.dropped,
        path = %path.display(),
        "read spreadsheet"
    );
    Ok(report)
}

/// Map a header row and data rows to records. Column order in the sheet is
/// free; columns with unknown labels are ignored.
pub fn rows_to_records(
    header: &[Cell],
    rows: impl IntoIterator<Item = Vec<Cell>>,
    now: DateTime<Utc>,
) -> Result<ImportReport, ImportError> {
    let mut positions: IndexMap<Column, usize> = IndexMap::new();
    for (idx, cell) in header.iter().enumerate() {
        if let Cell::Text(label) = cell
            && let Some(column) = Column::from_label(label)
        {
            positions.entry(column).or_insert(idx);
        }
    }

    let missing: Vec<&'static str> = Column::REQUIRED
        .iter()
        .filter(|c| !positions.contains_key(*c))
        .map(|c| c.label())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut report = ImportReport::default();
    for (row_idx, cells) in rows.into_iter().enumerate() {
        if cells.iter().all(Cell::is_blank) {
            continue;
        }
        let row: IndexMap<Column, Cell> = positions
            .iter()
            .map(|(column, &idx)| (*column, cells.get(idx).cloned().unwrap_or(Cell::Empty)))
            .collect();

        match row_to_record(&row, now) {
            Some(app) => report.records.push(app),
            None => {
                // +2: one for the header, one for 1-based sheet rows.
                tracing::warn!(row = row_idx + 2, "skipping spreadsheet row");
                report.dropped += 1;
            }
        }
    }
    Ok(report)
}

/// One row to one record, or `None` when the row cannot be a valid record:
/// unknown status label, or blank company name / job title.
pub fn row_to_record(row: &IndexMap<Column, Cell>, now: DateTime<Utc>) -> Option<Application> {
    let cell = |column: Column| row.get(&column).unwrap_or(&EMPTY_CELL);

    let status = match cell(Column::Status) {
        Cell::Text(label) => Status::from_label(label)?,
        _ => return None,
    };
    let company_name = cell_text(cell(Column::Company))?;
    let job_title = cell_text(cell(Column::Title))?;

    let today = now.with_timezone(&Local).date_naive();
    let applied_date = match cell(Column::AppliedDate) {
        Cell::Date(date) => *date,
        Cell::Number(serial) => excel_serial_to_date(*serial).unwrap_or(today),
        Cell::Text(text) if !text.trim().is_empty() => record::parse_date(text).unwrap_or_else(|| {
            tracing::warn!(value = %text, "unparseable applied date, using the import date");
            today
        }),
        _ => today,
    };

    let expected_salary = match cell(Column::Salary) {
        Cell::Number(n) => Some(*n),
        Cell::Text(text) => record::parse_amount(text),
        Cell::Empty | Cell::Date(_) => None,
    }
    .filter(|n| n.is_finite() && *n >= 0.0);

    Some(Application {
        id: record::new_id(),
        company_name,
        job_title,
        applied_date,
        expected_salary,
        status,
        contact_name: cell_text(cell(Column::ContactName)),
        contact_email: cell_text(cell(Column::ContactEmail)),
        contact_phone: cell_text(cell(Column::ContactPhone)),
        job_link: cell_text(cell(Column::JobLink)),
        notes: cell_text(cell(Column::Notes)),
        created_at: now,
        updated_at: now,
    })
}

fn cell_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(text) => record::non_blank(text),
        // Phone numbers and the like are often typed as numbers.
        Cell::Number(n) => Some(record::plain_number(*n)),
        Cell::Date(date) => Some(date.format(statics::DATE_FORMAT_ISO).to_string()),
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    // Excel's day zero, adjusted for its 1900 leap-year bug.
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_days(Days::new(serial.floor() as u64))
        .filter(|date| record::DATE_YEARS.contains(&date.year()))
}
