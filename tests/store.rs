use chrono::{NaiveDate, TimeZone, Utc};
use jobtrack::{DisabledNotifier, Draft, Slot, Status, StoreError, Tracker};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn draft(company: &str) -> Draft {
    Draft {
        company_name: company.to_string(),
        job_title: "Engineer".to_string(),
        applied_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        expected_salary: Some(15000.0),
        status: Status::New,
        contact_name: None,
        contact_email: None,
        contact_phone: None,
        job_link: None,
        notes: None,
    }
}

fn open(slot: &Slot) -> Tracker {
    Tracker::open(slot.clone(), Box::new(DisabledNotifier))
}

#[test]
fn missing_slot_loads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("nope").join("applications.json"));
    assert!(slot.load().is_empty());
    assert!(open(&slot).is_empty());
    Ok(())
}

#[test]
fn corrupt_or_non_list_slot_loads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("applications.json");
    let slot = Slot::new(&path);

    std::fs::write(&path, "{ not json")?;
    assert!(slot.load().is_empty());

    std::fs::write(&path, r#"{ "companyName": "Acme" }"#)?;
    assert!(slot.load().is_empty());
    Ok(())
}

#[test]
fn save_then_load_gives_equal_records() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("data").join("applications.json"));

    let mut tracker = open(&slot);
    tracker.add(draft("Acme"))?;
    let mut with_extras = draft("Globex");
    with_extras.contact_email = Some("hr@globex.com".to_string());
    with_extras.notes = Some("ملاحظات".to_string());
    tracker.add(with_extras)?;

    assert_eq!(slot.load(), tracker.records());
    assert!(!slot.path().with_file_name("applications.json.tmp").exists());
    Ok(())
}

#[test]
fn absent_optionals_are_not_written() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("applications.json"));
    let mut tracker = open(&slot);
    let mut d = draft("Acme");
    d.expected_salary = None;
    tracker.add(d)?;

    let text = std::fs::read_to_string(slot.path())?;
    assert!(text.contains("\"companyName\": \"Acme\""));
    assert!(text.contains("\"status\": \"new\""));
    assert!(!text.contains("expectedSalary"));
    assert!(!text.contains("contactEmail"));
    assert!(!text.contains("null"));
    Ok(())
}

#[test]
fn add_prepends_and_persists() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("applications.json"));
    let mut tracker = open(&slot);

    let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let first = tracker.add_at(draft("Acme"), now)?.clone();
    tracker.add_at(draft("Globex"), now)?;

    let names: Vec<_> = tracker.records().iter().map(|r| r.company_name.as_str()).collect();
    assert_eq!(names, ["Globex", "Acme"]);
    assert_eq!(first.created_at, now);
    assert_eq!(first.updated_at, now);

    let reopened = open(&slot);
    assert_eq!(reopened.records(), tracker.records());
    Ok(())
}

#[test]
fn ids_are_unique() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut tracker = open(&Slot::new(dir.path().join("applications.json")));
    for i in 0..20 {
        tracker.add(draft(&format!("Company {i}")))?;
    }
    let mut ids: Vec<_> = tracker.records().iter().map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    Ok(())
}

#[test]
fn edit_keeps_identity_and_position() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("applications.json"));
    let mut tracker = open(&slot);

    let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let edited = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();
    tracker.add_at(draft("Acme"), created)?;
    let id = tracker.add_at(draft("Globex"), created)?.id;
    tracker.add_at(draft("Initech"), created)?;

    let mut change = draft("Globex Corp");
    change.status = Status::UnderReview;
    let outcome = tracker.edit_at(id, change, edited)?;

    assert_eq!(outcome.record.id, id);
    assert_eq!(outcome.record.created_at, created);
    assert_eq!(outcome.record.updated_at, edited);
    assert_eq!(outcome.status_change, Some((Status::New, Status::UnderReview)));
    assert_eq!(tracker.records()[1].company_name, "Globex Corp");
    assert_eq!(tracker.len(), 3);
    assert_eq!(open(&slot).records(), tracker.records());
    Ok(())
}

#[test]
fn edit_without_status_change_reports_none() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut tracker = open(&Slot::new(dir.path().join("applications.json")));
    let id = tracker.add(draft("Acme"))?.id;

    let mut change = draft("Acme");
    change.notes = Some("called back".to_string());
    let outcome = tracker.edit(id, change)?;
    assert_eq!(outcome.status_change, None);
    assert!(outcome.notification.is_none());
    Ok(())
}

#[test]
fn delete_removes_only_the_target() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("applications.json"));
    let mut tracker = open(&slot);
    tracker.add(draft("Acme"))?;
    let id = tracker.add(draft("Globex"))?.id;
    tracker.add(draft("Initech"))?;

    let removed = tracker.delete(id)?;
    assert_eq!(removed.company_name, "Globex");
    let names: Vec<_> = tracker.records().iter().map(|r| r.company_name.as_str()).collect();
    assert_eq!(names, ["Initech", "Acme"]);
    assert_eq!(open(&slot).len(), 2);
    Ok(())
}

#[test]
fn unknown_id_is_not_found() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut tracker = open(&Slot::new(dir.path().join("applications.json")));
    tracker.add(draft("Acme"))?;
    let stranger = uuid::Uuid::new_v4();

    assert!(matches!(tracker.delete(stranger), Err(StoreError::NotFound(id)) if id == stranger));
    assert!(matches!(
        tracker.edit(stranger, draft("Nobody")),
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(tracker.len(), 1);
    Ok(())
}

#[test]
fn import_prepends_the_batch_in_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let slot = Slot::new(dir.path().join("applications.json"));
    let mut tracker = open(&slot);
    tracker.add(draft("Existing"))?;

    let now = Utc::now();
    let batch = vec![draft("First").into_record(now), draft("Second").into_record(now)];
    assert_eq!(tracker.import(batch)?, 2);

    let names: Vec<_> = tracker.records().iter().map(|r| r.company_name.as_str()).collect();
    assert_eq!(names, ["First", "Second", "Existing"]);
    assert_eq!(open(&slot).records(), tracker.records());

    assert_eq!(tracker.import(Vec::new())?, 0);
    assert_eq!(tracker.len(), 3);
    Ok(())
}

#[test]
fn failed_save_keeps_the_change_in_memory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // The slot path is a directory, so the final rename cannot succeed.
    let blocked = dir.path().join("applications.json");
    std::fs::create_dir(&blocked)?;
    let mut tracker = open(&Slot::new(&blocked));

    let err = tracker.add(draft("Acme")).unwrap_err();
    assert!(matches!(err, StoreError::Save(_)));
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.records()[0].company_name, "Acme");
    assert!(!dir.path().join("applications.json.tmp").exists());
    Ok(())
}
