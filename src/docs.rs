use crate::api::employee::EmployeeListResponse;
use crate::api::form::{SelectEmployee, SetStatus, UpdateTimeEntry};
use crate::api::records::RecordKey;
use crate::form::{FormView, controller::TimeEntryView};
use crate::model::{attendance::AttendanceRecord, employee::Employee};
use crate::table::{TableView, renderer::TableRowView};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Employee Attendance Tracker

A single-user attendance sheet: fill in the form, submit records, review them
in a table, export the table, or wipe everything.

### 🔹 Workflow
- **Form**
  - Pick an employee by id or name; designation and joining date follow
  - Choose a status; `Absent` locks the time entries
  - Add, edit and remove in/out time rows, then submit
- **Records**
  - Every submission is saved locally and shown as a table row
  - Removing a row deletes every saved record with the same employee id and date
- **Export**
  - `GET /api/export/pdf` and `GET /api/export/spreadsheet` download the table

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,

        crate::api::form::get_form,
        crate::api::form::select_employee,
        crate::api::form::set_status,
        crate::api::form::add_time_entry,
        crate::api::form::update_time_entry,
        crate::api::form::remove_time_entry,
        crate::api::form::submit_form,

        crate::api::records::list_records,
        crate::api::records::remove_row,
        crate::api::records::remove_records,
        crate::api::records::reset_records,

        crate::api::export::export_table
    ),
    components(
        schemas(
            Employee,
            EmployeeListResponse,
            AttendanceRecord,
            FormView,
            TimeEntryView,
            SelectEmployee,
            SetStatus,
            UpdateTimeEntry,
            TableView,
            TableRowView,
            RecordKey
        )
    ),
    tags(
        (name = "Employee", description = "Employee reference data"),
        (name = "Form", description = "Attendance form state and submission"),
        (name = "Attendance", description = "Saved attendance records"),
        (name = "Export", description = "PDF and spreadsheet downloads"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/employees",
            "/api/form",
            "/api/form/submit",
            "/api/form/entries/{row_id}",
            "/api/records",
            "/api/records/rows/{row_id}",
            "/api/records/reset",
            "/api/export/{format}",
        ] {
            assert!(paths.iter().any(|p| *p == expected), "missing {expected}");
        }
    }
}
