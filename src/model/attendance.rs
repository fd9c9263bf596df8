use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The status value that locks time entries.
pub const ABSENT: &str = "Absent";
pub const PRESENT: &str = "Present";

/// Attendance classification chosen in the form.
///
/// Options other than `Present` and `Absent` come from configuration, so the
/// value is kept as a string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0 == ABSENT
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted attendance record.
///
/// Field names on the wire are camelCase; `in_times` and `out_times` are
/// paired by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "E001",
        "employeeName": "Alice Rahman",
        "designation": "Software Engineer",
        "dateOfJoining": "2021-03-15",
        "status": "Present",
        "inTimes": ["09:00", "14:00"],
        "outTimes": ["12:30", "17:30"],
        "date": "1/1/2024"
    })
)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub designation: String,
    pub date_of_joining: String,
    #[schema(value_type = String, example = "Present")]
    pub status: Status,
    pub in_times: Vec<String>,
    pub out_times: Vec<String>,
    pub date: String,
}

impl AttendanceRecord {
    /// True when this record is keyed by the given (employee id, date) pair.
    pub fn matches(&self, employee_id: &str, date: &str) -> bool {
        self.employee_id == employee_id && self.date == date
    }
}
