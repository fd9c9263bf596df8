use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument, warn};

use super::KeyValueStore;
use crate::{error::AppError, model::attendance::AttendanceRecord};

/// The persisted attendance list, stored as one JSON array under a single key.
///
/// Every mutation rewrites the whole list. Mutations are serialized inside
/// this process; two processes sharing one backend are last-write-wins.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All saved records in insertion order. Missing, unreadable or malformed
    /// data reads as an empty list.
    pub fn load_all(&self) -> Vec<AttendanceRecord> {
        match self.backend.get(&self.key) {
            Ok(raw) => self.parse(raw),
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to read saved records");
                Vec::new()
            }
        }
    }

    /// Current list for a read-modify-write. A failed read is an error here so
    /// the rewrite never replaces records it could not see.
    fn read_for_update(&self) -> Result<Vec<AttendanceRecord>, AppError> {
        let raw = self.backend.get(&self.key)?;
        Ok(self.parse(raw))
    }

    fn parse(&self, raw: Option<String>) -> Vec<AttendanceRecord> {
        let Some(raw) = raw else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<AttendanceRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, key = %self.key, "Saved records are malformed, treating as empty");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, record), fields(employee_id = %record.employee_id, date = %record.date))]
    pub fn append_record(&self, record: &AttendanceRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.read_for_update()?;
        records.push(record.clone());
        self.write_all(&records)?;

        debug!(total = records.len(), "Record appended");
        Ok(())
    }

    /// Drops every record whose (employee id, date) pair matches and returns
    /// how many were removed.
    #[instrument(skip(self))]
    pub fn remove_record(&self, employee_id: &str, date: &str) -> Result<usize, AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.read_for_update()?;
        let before = records.len();
        records.retain(|r| !r.matches(employee_id, date));
        let removed = before - records.len();
        self.write_all(&records)?;

        debug!(removed, remaining = records.len(), "Records removed");
        Ok(removed)
    }

    pub fn clear_all(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.backend.remove(&self.key)?;
        info!(key = %self.key, "All saved records cleared");
        Ok(())
    }

    fn write_all(&self, records: &[AttendanceRecord]) -> Result<(), AppError> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(&self.key, &raw)?;
        Ok(())
    }
}
