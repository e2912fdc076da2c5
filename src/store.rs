use crate::form::Draft;
use crate::notify::{MailDraft, Notifier, NotifyError};
use crate::record::{Application, Status};
use crate::statics;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::{
    fs,
    path::{Path, PathBuf},
};
use uuid::Uuid;

/// The single file that mirrors the whole record list.
///
/// Reads fail soft (anything unusable is an empty list); writes overwrite the
/// file unconditionally. There is no history: last write wins.
#[derive(Debug, Clone)]
pub struct Slot {
    path: PathBuf,
}

impl Slot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/jobtrack/applications.json`, or `./applications.json` when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(statics::APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(statics::DATA_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<Application> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no record file yet");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "unreadable record file: {e}");
                return Vec::new();
            }
        };

        match parse_records(&text) {
            Ok(records) => {
                let count = records.len();
                tracing::debug!(count, path = %self.path.display(), "loaded records");
                records
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring corrupt record file: {e:#}");
                Vec::new()
            }
        }
    }

    pub fn save(&self, records: &[Application]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
        }

        let mut text = serde_json::to_string_pretty(records).context("serializing records")?;
        text.push('\n');

        // Write next to the slot and rename over it, so readers never see half a file.
        let tmp = self.tmp_path();
        fs::write(&tmp, text.as_bytes()).with_context(|| format!("writing {tmp:?}"))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!(path = %tmp.display(), "could not remove temp file: {cleanup}");
            }
            return Err(e).with_context(|| format!("replacing {:?}", self.path));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| statics::DATA_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Lenient parse: JSON5 is a superset of what `save` writes, so a hand-edited
/// file with comments or trailing commas still loads.
pub fn parse_records(text: &str) -> anyhow::Result<Vec<Application>> {
    Ok(json5::from_str::<Vec<Application>>(text)?)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no application with id {0}")]
    NotFound(Uuid),
    #[error("failed to save records: {0:#}")]
    Save(anyhow::Error),
}

/// Result of an edit. The record is already committed (and saved) when this is
/// returned; `notification` only reports what happened to the mail side effect.
#[derive(Debug)]
pub struct EditOutcome {
    pub record: Application,
    pub status_change: Option<(Status, Status)>,
    pub notification: Option<Result<MailDraft, NotifyError>>,
}

/// Application state: the ordered record list plus the slot it mirrors to.
///
/// All writes go through `add`, `edit`, `delete` and `import`, and each of them
/// saves before returning. Readers only ever get shared references.
pub struct Tracker {
    slot: Slot,
    records: Vec<Application>,
    notifier: Box<dyn Notifier>,
}

impl Tracker {
    pub fn open(slot: Slot, notifier: Box<dyn Notifier>) -> Self {
        let records = slot.load();
        tracing::info!(count = records.len(), path = %slot.path().display(), "opened record store");
        Self {
            slot,
            records,
            notifier,
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn records(&self) -> &[Application] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Application> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn add(&mut self, draft: Draft) -> Result<&Application, StoreError> {
        self.add_at(draft, Utc::now())
    }

    /// New records go to the front of the list.
    pub fn add_at(&mut self, draft: Draft, now: DateTime<Utc>) -> Result<&Application, StoreError> {
        let record = draft.into_record(now);
        tracing::info!(id = %record.id, company = %record.company_name, "adding application");
        self.records.insert(0, record);
        self.persist()?;
        Ok(&self.records[0])
    }

    pub fn edit(&mut self, id: Uuid, draft: Draft) -> Result<EditOutcome, StoreError> {
        self.edit_at(id, draft, Utc::now())
    }

    pub fn edit_at(
        &mut self,
        id: Uuid,
        draft: Draft,
        now: DateTime<Utc>,
    ) -> Result<EditOutcome, StoreError> {
        let idx = self.index_of(id)?;
        let previous = self.records[idx].clone();
        self.records[idx].apply_draft(draft, now);
        let updated = self.records[idx].clone();
        tracing::info!(%id, company = %updated.company_name, "updated application");
        self.persist()?;

        let status_change = (previous.status != updated.status)
            .then_some((previous.status, updated.status));

        // The edit is committed; whatever the mail side effect does cannot undo it.
        let notification = status_change.map(|(from, to)| {
            let result = self.notifier.notify(&previous, &updated);
            if let Err(e) = &result {
                let (from, to) = (from.code(), to.code());
                tracing::warn!(%id, from, to, "status change mail skipped: {e}");
            }
            result
        });

        Ok(EditOutcome {
            record: updated,
            status_change,
            notification,
        })
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Application, StoreError> {
        let idx = self.index_of(id)?;
        let removed = self.records.remove(idx);
        tracing::info!(%id, company = %removed.company_name, "deleted application");
        self.persist()?;
        Ok(removed)
    }

    /// Prepend an imported batch as a group, keeping its internal order.
    pub fn import(&mut self, batch: Vec<Application>) -> Result<usize, StoreError> {
        let count = batch.len();
        if count == 0 {
            return Ok(0);
        }
        self.records.splice(0..0, batch);
        tracing::info!(count, "imported applications");
        self.persist()?;
        Ok(count)
    }

    fn index_of(&self, id: Uuid) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.slot.save(&self.records).map_err(|e| {
            tracing::error!("{e:#}");
            StoreError::Save(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Slot, parse_records};
    use std::path::Path;

    #[test]
    fn parse_records_accepts_json5_and_rejects_non_lists() {
        let text = r#"[
  // hand edited
  {
    id: "6f1c1a0e-8d1e-4c5b-9a43-1f1f5d1c2b3a",
    companyName: "Acme",
    jobTitle: "Engineer",
    appliedDate: "2024-05-01",
    expectedSalary: 12000,
    status: "under_review",
    createdAt: "2024-05-01T09:00:00Z",
    updatedAt: "2024-05-02T09:00:00Z",
  },
]
"#;
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].expected_salary, Some(12000.0));
        assert_eq!(records[0].contact_email, None);

        assert!(parse_records(r#"{ "companyName": "Acme" }"#).is_err());
        assert!(parse_records("").is_err());
        assert!(parse_records(r#"[{ "companyName": "Acme" }]"#).is_err());
    }

    #[test]
    fn tmp_path_sits_next_to_the_slot() {
        let slot = Slot::new("/data/jobtrack/applications.json");
        assert_eq!(
            slot.tmp_path(),
            Path::new("/data/jobtrack/applications.json.tmp")
        );
    }
}
