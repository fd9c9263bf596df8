use actix_web::http::StatusCode;
use derive_more::Display;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::{
    attendance::{AttendanceRecord, Status},
    employee::EmployeeDirectory,
};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum FormError {
    #[display(fmt = "Unknown status {:?}", _0)]
    UnknownStatus(String),

    #[display(fmt = "Time entries cannot be added for the current status")]
    AddEntryDisabled,

    #[display(fmt = "Time entries are disabled for the current status")]
    EntriesDisabled,

    #[display(fmt = "Time entry {} not found", _0)]
    UnknownRow(Uuid),

    #[display(fmt = "{} is required", _0)]
    MissingField(&'static str),

    #[display(fmt = "In time is required for time entry {}", _0)]
    MissingInTime(usize),
}

impl FormError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FormError::UnknownRow(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// One in/out pair in the form. The id is minted when the row is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryRow {
    pub id: Uuid,
    pub in_time: String,
    pub out_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeEntryView {
    #[schema(value_type = String, format = "uuid")]
    pub row_id: Uuid,
    #[schema(example = "09:00")]
    pub in_time: String,
    #[schema(example = "17:00")]
    pub out_time: String,
    pub disabled: bool,
    pub in_time_required: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "date": "1/1/2024",
    "employee_id": "E001",
    "employee_name": "Alice Rahman",
    "designation": "Software Engineer",
    "date_of_joining": "2021-03-15",
    "status": "Present",
    "status_options": ["Present", "Absent"],
    "add_entry_enabled": true,
    "time_entries": [{
        "row_id": "6f1c1f9e-2b7a-4d8e-9a51-2f3b5b1d8c11",
        "in_time": "09:00",
        "out_time": "",
        "disabled": false,
        "in_time_required": true
    }]
}))]
pub struct FormView {
    pub date: String,
    pub employee_id: String,
    pub employee_name: String,
    pub designation: String,
    pub date_of_joining: String,
    pub status: Option<String>,
    pub status_options: Vec<String>,
    pub add_entry_enabled: bool,
    pub time_entries: Vec<TimeEntryView>,
}

/// Form state: employee fields, status, and the dynamic time-entry rows.
///
/// Rows are locked (disabled, nothing required, no adding) until a status
/// other than "Absent" is chosen.
#[derive(Debug, Clone)]
pub struct FormController {
    status_options: Vec<String>,
    employee_id: String,
    employee_name: String,
    designation: String,
    date_of_joining: String,
    status: Option<Status>,
    rows: Vec<TimeEntryRow>,
    entries_locked: bool,
}

impl FormController {
    pub fn new(status_options: Vec<String>) -> Self {
        Self {
            status_options,
            employee_id: String::new(),
            employee_name: String::new(),
            designation: String::new(),
            date_of_joining: String::new(),
            status: None,
            rows: Vec::new(),
            entries_locked: true,
        }
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn rows(&self) -> &[TimeEntryRow] {
        &self.rows
    }

    pub fn add_entry_enabled(&self) -> bool {
        !self.entries_locked
    }

    /// Choose an employee by id; name, designation and joining date follow
    /// when the id is known, otherwise they keep their current values.
    pub fn select_employee_id(&mut self, id: &str, directory: &EmployeeDirectory) {
        self.employee_id = id.to_string();
        if let Some(employee) = directory.by_id(id) {
            self.employee_name = employee.name.clone();
            self.designation = employee.designation.clone();
            self.date_of_joining = employee.date_of_joining.clone();
        }
    }

    /// Same as [`select_employee_id`](Self::select_employee_id), keyed by name.
    pub fn select_employee_name(&mut self, name: &str, directory: &EmployeeDirectory) {
        self.employee_name = name.to_string();
        if let Some(employee) = directory.by_name(name) {
            self.employee_id = employee.id.clone();
            self.designation = employee.designation.clone();
            self.date_of_joining = employee.date_of_joining.clone();
        }
    }

    pub fn set_status(&mut self, status: &str) -> Result<(), FormError> {
        if !self.status_options.iter().any(|opt| opt == status) {
            return Err(FormError::UnknownStatus(status.to_string()));
        }

        let status = Status::new(status);
        self.entries_locked = status.is_absent();
        debug!(%status, locked = self.entries_locked, "Status changed");
        self.status = Some(status);
        Ok(())
    }

    pub fn add_time_entry_row(&mut self) -> Result<Uuid, FormError> {
        if self.entries_locked {
            return Err(FormError::AddEntryDisabled);
        }

        let id = Uuid::new_v4();
        self.rows.push(TimeEntryRow {
            id,
            in_time: String::new(),
            out_time: String::new(),
        });
        Ok(id)
    }

    pub fn update_time_entry(
        &mut self,
        row_id: Uuid,
        in_time: Option<String>,
        out_time: Option<String>,
    ) -> Result<(), FormError> {
        if self.entries_locked {
            return Err(FormError::EntriesDisabled);
        }

        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or(FormError::UnknownRow(row_id))?;

        if let Some(in_time) = in_time {
            row.in_time = in_time;
        }
        if let Some(out_time) = out_time {
            row.out_time = out_time;
        }
        Ok(())
    }

    pub fn remove_time_entry_row(&mut self, row_id: Uuid) -> Result<(), FormError> {
        let idx = self
            .rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or(FormError::UnknownRow(row_id))?;
        self.rows.remove(idx);
        Ok(())
    }

    /// Checks required fields and gathers the record. Time entries are paired
    /// by their current position in the form; an Absent record carries none.
    pub fn build_record(&self, date: &str) -> Result<AttendanceRecord, FormError> {
        if self.employee_id.trim().is_empty() {
            return Err(FormError::MissingField("Employee ID"));
        }
        if self.employee_name.trim().is_empty() {
            return Err(FormError::MissingField("Employee name"));
        }
        let status = self
            .status
            .clone()
            .ok_or(FormError::MissingField("Status"))?;

        let (in_times, out_times): (Vec<String>, Vec<String>) = if self.entries_locked {
            (Vec::new(), Vec::new())
        } else {
            if let Some(pos) = self.rows.iter().position(|r| r.in_time.trim().is_empty()) {
                return Err(FormError::MissingInTime(pos + 1));
            }
            self.rows
                .iter()
                .map(|r| (r.in_time.clone(), r.out_time.clone()))
                .unzip()
        };

        Ok(AttendanceRecord {
            employee_id: self.employee_id.clone(),
            employee_name: self.employee_name.clone(),
            designation: self.designation.clone(),
            date_of_joining: self.date_of_joining.clone(),
            status,
            in_times,
            out_times,
            date: date.to_string(),
        })
    }

    /// Back to the initial empty state: no status, no rows, adding disabled.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.status_options));
    }

    pub fn view(&self, date: &str) -> FormView {
        FormView {
            date: date.to_string(),
            employee_id: self.employee_id.clone(),
            employee_name: self.employee_name.clone(),
            designation: self.designation.clone(),
            date_of_joining: self.date_of_joining.clone(),
            status: self.status().map(|s| s.to_string()),
            status_options: self.status_options.clone(),
            add_entry_enabled: self.add_entry_enabled(),
            time_entries: self
                .rows()
                .iter()
                .map(|r| TimeEntryView {
                    row_id: r.id,
                    in_time: r.in_time.clone(),
                    out_time: r.out_time.clone(),
                    disabled: self.entries_locked,
                    in_time_required: !self.entries_locked,
                })
                .collect(),
        }
    }
}
