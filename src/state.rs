use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result, bail};
use chrono::{
    Local,
    format::{Item, StrftimeItems},
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppError,
    export::{self, ExportFile, ExportFormat},
    form::FormController,
    model::{attendance::AttendanceRecord, employee::EmployeeDirectory},
    store::{self, FileStore, KeyValueStore, RecordStore},
    table::{AttendanceTable, TableSnapshot},
};

/// What the single user is looking at: the form and the rendered table.
pub struct Session {
    pub form: FormController,
    pub table: AttendanceTable,
}

pub struct AppState {
    pub config: Config,
    pub directory: EmployeeDirectory,
    pub records: RecordStore,
    session: Mutex<Session>,
}

impl AppState {
    /// File-backed state for the server binary.
    pub fn open(config: Config) -> Result<Self> {
        let backend = FileStore::open(&config.data_dir)
            .with_context(|| format!("opening data dir {}", config.data_dir.display()))?;
        let directory = EmployeeDirectory::load(config.employee_directory.as_deref())?;

        Self::new(config, directory, Arc::new(backend))
    }

    /// Builds the session and replays the saved records into the table.
    pub fn new(
        config: Config,
        directory: EmployeeDirectory,
        backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("invalid DATE_FORMAT {:?}", config.date_format);
        }
        store::validate_key(&config.storage_key).context("invalid STORAGE_KEY")?;

        let records = RecordStore::new(backend, config.storage_key.clone());
        let mut table = AttendanceTable::new();
        table.render_all(records.load_all());
        info!(
            rows = table.rows().len(),
            employees = directory.all().len(),
            "Saved records loaded"
        );

        Ok(Self {
            session: Mutex::new(Session {
                form: FormController::new(config.status_options.clone()),
                table,
            }),
            config,
            directory,
            records,
        })
    }

    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Today's date as stamped on submitted records.
    pub fn today(&self) -> String {
        Local::now().format(&self.config.date_format).to_string()
    }

    /// Validates the form, persists the record, shows it in the table and
    /// resets the form. Nothing changes when validation or the write fails.
    #[instrument(skip(self))]
    pub fn submit_form(&self) -> Result<AttendanceRecord, AppError> {
        let date = self.today();
        let mut session = self.session();

        let record = session.form.build_record(&date)?;
        self.records.append_record(&record)?;
        session.table.append_row(record.clone());
        session.form.reset();

        info!(employee_id = %record.employee_id, status = %record.status, "Attendance submitted");
        Ok(record)
    }

    pub fn remove_row(&self, row_id: Uuid) -> Result<AttendanceRecord, AppError> {
        let record = self.session().table.remove_row(row_id, &self.records)?;
        info!(employee_id = %record.employee_id, date = %record.date, "Attendance row removed");
        Ok(record)
    }

    /// Bulk removal by (employee id, date) from both the store and the view.
    pub fn remove_matching(&self, employee_id: &str, date: &str) -> Result<usize, AppError> {
        let mut session = self.session();
        let removed = self.records.remove_record(employee_id, date)?;
        session.table.remove_matching(employee_id, date);
        Ok(removed)
    }

    /// Wipes the saved list and re-renders the (now empty) table.
    pub fn reset_all(&self) -> Result<(), AppError> {
        let mut session = self.session();
        self.records.clear_all()?;
        session.table.render_all(self.records.load_all());
        Ok(())
    }

    pub fn table_snapshot(&self) -> TableSnapshot {
        self.session().table.snapshot()
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportFile, AppError> {
        let snapshot = self.table_snapshot();
        Ok(export::export(format, &self.config.export_title, &snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::new(
            Config::default(),
            EmployeeDirectory::builtin(),
            Arc::new(MemoryStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn submit_persists_renders_and_resets() {
        let state = state();
        {
            let mut session = state.session();
            let directory = &state.directory;
            session.form.select_employee_id("E1", directory);
            session.form.select_employee_name("Alice", directory);
            session.form.set_status("Present").unwrap();
            let row = session.form.add_time_entry_row().unwrap();
            session
                .form
                .update_time_entry(row, Some("09:00".into()), Some("17:00".into()))
                .unwrap();
        }

        let record = state.submit_form().unwrap();

        let saved = state.records.load_all();
        assert_eq!(saved, vec![record.clone()]);
        assert_eq!(saved[0].employee_id, "E1");
        assert_eq!(saved[0].employee_name, "Alice");
        assert_eq!(saved[0].in_times, vec!["09:00"]);
        assert_eq!(saved[0].out_times, vec!["17:00"]);
        assert_eq!(saved[0].date, state.today());

        let session = state.session();
        assert_eq!(session.table.rows().len(), 1);
        assert!(!session.form.add_entry_enabled());
        assert!(session.form.rows().is_empty());
        assert!(session.form.status().is_none());
    }

    #[test]
    fn failed_validation_changes_nothing() {
        let state = state();
        state.session().form.set_status("Present").unwrap();

        assert!(state.submit_form().is_err());
        assert!(state.records.load_all().is_empty());
        assert!(state.session().form.status().is_some());
    }

    #[test]
    fn saved_records_are_replayed_on_start() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        backend
            .set(
                "attendanceRecords",
                r#"[{"employeeId":"E1","employeeName":"Alice","designation":"","dateOfJoining":"",
                     "status":"Absent","inTimes":[],"outTimes":[],"date":"1/1/2024"}]"#,
            )
            .unwrap();

        let state =
            AppState::new(Config::default(), EmployeeDirectory::builtin(), backend).unwrap();

        assert_eq!(state.session().table.rows().len(), 1);
        assert_eq!(state.table_snapshot().rows[0][0], "E1");
    }

    #[test]
    fn reset_all_clears_store_and_table() {
        let state = state();
        {
            let mut session = state.session();
            session.form.select_employee_id("E001", &state.directory);
            session.form.set_status("Absent").unwrap();
        }
        state.submit_form().unwrap();

        state.reset_all().unwrap();

        assert!(state.records.load_all().is_empty());
        assert!(state.session().table.rows().is_empty());
    }

    #[test]
    fn remove_matching_removes_duplicates() {
        let state = state();
        for _ in 0..2 {
            {
                let mut session = state.session();
                session.form.select_employee_id("E002", &state.directory);
                session.form.set_status("Absent").unwrap();
            }
            state.submit_form().unwrap();
        }

        let removed = state.remove_matching("E002", &state.today()).unwrap();

        assert_eq!(removed, 2);
        assert!(state.records.load_all().is_empty());
        assert!(state.session().table.rows().is_empty());
    }

    #[test]
    fn rejects_invalid_date_format() {
        let config = Config {
            date_format: "%Q".to_string(),
            ..Config::default()
        };
        let result = AppState::new(
            config,
            EmployeeDirectory::builtin(),
            Arc::new(MemoryStore::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_storage_key() {
        for key in ["../escape", "nested/records", "a\\b", ""] {
            let config = Config {
                storage_key: key.to_string(),
                ..Config::default()
            };
            let result = AppState::new(
                config,
                EmployeeDirectory::builtin(),
                Arc::new(MemoryStore::new()),
            );
            assert!(result.is_err(), "key {key:?} accepted");
        }
    }

    #[test]
    fn exports_render_current_table() {
        let state = state();
        let pdf = state.export(ExportFormat::Pdf).unwrap();
        let xlsx = state.export(ExportFormat::Spreadsheet).unwrap();

        assert_eq!(pdf.file_name(), "attendance_records.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
        assert!(xlsx.bytes.starts_with(b"PK"));
    }
}
