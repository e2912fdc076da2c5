use chrono::{NaiveDate, TimeZone, Utc};
use jobtrack::{Application, ImportError, Status, export_workbook, import_workbook, record, statics};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn sample(company: &str, status: Status) -> Application {
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
    Application {
        id: record::new_id(),
        company_name: company.to_string(),
        job_title: "مهندس برمجيات".to_string(),
        applied_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        expected_salary: None,
        status,
        contact_name: None,
        contact_email: None,
        contact_phone: None,
        job_link: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn export_then_import_preserves_content_and_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(statics::AR_EXPORT_FILE_NAME);

    let mut full = sample("Acme", Status::AwaitingResponse);
    full.expected_salary = Some(12500.5);
    full.contact_name = Some("سارة".to_string());
    full.contact_email = Some("hr@acme.com".to_string());
    full.contact_phone = Some("0551234567".to_string());
    full.job_link = Some("https://acme.com/jobs/1".to_string());
    full.notes = Some("مقابلة ثانية".to_string());

    let mut whole_salary = sample("شركة الأفق", Status::Accepted);
    whole_salary.expected_salary = Some(9000.0);

    let records = vec![full, whole_salary, sample("Globex", Status::New)];
    export_workbook(&records, &path)?;

    let imported_at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
    let report = import_workbook(&path, imported_at)?;
    assert_eq!(report.dropped, 0);
    assert_eq!(report.records.len(), records.len());

    for (before, after) in records.iter().zip(&report.records) {
        assert!(
            before.same_content(after),
            "content changed:\n{before:#?}\n{after:#?}"
        );
        assert_ne!(before.id, after.id);
        assert_eq!(after.created_at, imported_at);
        assert_eq!(after.updated_at, imported_at);
    }
    Ok(())
}

#[test]
fn a_year_outside_the_sheet_range_does_not_block_export() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("old.xlsx");

    // Only a hand-edited record file can carry such a date.
    let mut ancient = sample("Acme", Status::New);
    ancient.applied_date = NaiveDate::from_ymd_opt(24, 5, 1).unwrap();
    let records = vec![ancient, sample("Globex", Status::Rejected)];
    export_workbook(&records, &path)?;

    let imported_at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
    let report = import_workbook(&path, imported_at)?;
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.dropped, 0);
    assert!(records[1].same_content(&report.records[1]));
    Ok(())
}

#[test]
fn exporting_nothing_still_writes_the_header() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.xlsx");
    export_workbook(&[], &path)?;

    let report = import_workbook(&path, Utc::now())?;
    assert!(report.records.is_empty());
    assert_eq!(report.dropped, 0);
    Ok(())
}

#[test]
fn hand_made_sheet_with_reordered_columns() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("manual.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Required columns only, in a different order, plus one the app ignores.
    sheet.write_string(0, 0, "الحالة")?;
    sheet.write_string(0, 1, "ملاحظة خارجية")?;
    sheet.write_string(0, 2, "المسمى الوظيفي")?;
    sheet.write_string(0, 3, "اسم الشركة")?;
    sheet.write_string(0, 4, "تاريخ التقديم")?;

    sheet.write_string(1, 0, "قيد المراجعة")?;
    sheet.write_string(1, 1, "ignored")?;
    sheet.write_string(1, 2, "Analyst")?;
    sheet.write_string(1, 3, "Initech")?;
    sheet.write_string(1, 4, "05/03/2024")?;

    sheet.write_string(2, 0, "حالة غريبة")?;
    sheet.write_string(2, 2, "Engineer")?;
    sheet.write_string(2, 3, "Umbrella")?;
    workbook.save(&path)?;

    let report = import_workbook(&path, Utc::now())?;
    assert_eq!(report.dropped, 1);
    assert_eq!(report.records.len(), 1);
    let app = &report.records[0];
    assert_eq!(app.company_name, "Initech");
    assert_eq!(app.job_title, "Analyst");
    assert_eq!(app.status, Status::UnderReview);
    assert_eq!(app.applied_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(app.expected_salary, None);
    Ok(())
}

#[test]
fn sheet_without_required_headers_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("wrong.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Company")?;
    sheet.write_string(0, 1, "الحالة")?;
    sheet.write_string(1, 0, "Acme")?;
    sheet.write_string(1, 1, "جديد")?;
    workbook.save(&path)?;

    match import_workbook(&path, Utc::now()) {
        Err(ImportError::MissingColumns(missing)) => {
            assert_eq!(missing, vec!["اسم الشركة", "المسمى الوظيفي"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
    Ok(())
}

#[test]
fn unreadable_file_is_an_open_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("not-a-sheet.xlsx");
    std::fs::write(&path, b"plain text, not a zip")?;

    assert!(matches!(
        import_workbook(&path, Utc::now()),
        Err(ImportError::Open { .. })
    ));
    Ok(())
}
