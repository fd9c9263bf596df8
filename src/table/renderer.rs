use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppError, model::attendance::AttendanceRecord, store::RecordStore};

/// Joins multiple in/out times inside one cell.
pub const TIME_SEPARATOR: &str = ", ";

/// Fixed column order of the attendance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Column {
    #[strum(to_string = "Employee ID")]
    EmployeeId,
    #[strum(to_string = "Employee Name")]
    EmployeeName,
    #[strum(to_string = "Designation")]
    Designation,
    #[strum(to_string = "Date of Joining")]
    DateOfJoining,
    #[strum(to_string = "Status")]
    Status,
    #[strum(to_string = "In Time")]
    InTimes,
    #[strum(to_string = "Out Time")]
    OutTimes,
    #[strum(to_string = "Date")]
    Date,
    #[strum(to_string = "Action")]
    Action,
}

impl Column {
    /// Columns that carry record data (everything but the remove action).
    pub fn data_columns() -> impl Iterator<Item = Column> {
        Column::iter().filter(|c| *c != Column::Action)
    }

    pub fn cell(self, record: &AttendanceRecord) -> String {
        match self {
            Column::EmployeeId => record.employee_id.clone(),
            Column::EmployeeName => record.employee_name.clone(),
            Column::Designation => record.designation.clone(),
            Column::DateOfJoining => record.date_of_joining.clone(),
            Column::Status => record.status.to_string(),
            Column::InTimes => record.in_times.join(TIME_SEPARATOR),
            Column::OutTimes => record.out_times.join(TIME_SEPARATOR),
            Column::Date => record.date.clone(),
            Column::Action => "Remove".to_string(),
        }
    }
}

/// One visible row. The id is a view handle only and is never persisted.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub id: Uuid,
    pub record: AttendanceRecord,
}

impl TableRow {
    pub fn cells(&self) -> Vec<String> {
        Column::data_columns().map(|c| c.cell(&self.record)).collect()
    }
}

/// Text content of the table as exporters see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableRowView {
    #[schema(value_type = String, format = "uuid")]
    pub row_id: Uuid,
    pub cells: Vec<String>,
    pub record: AttendanceRecord,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "headers": ["Employee ID", "Employee Name", "Designation", "Date of Joining",
                "Status", "In Time", "Out Time", "Date", "Action"],
    "rows": [],
    "total": 0
}))]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<TableRowView>,
    pub total: usize,
}

/// In-memory projection of the saved records, one row per record.
#[derive(Debug, Default)]
pub struct AttendanceTable {
    rows: Vec<TableRow>,
}

impl AttendanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Drops every row and rebuilds from `records` in order.
    pub fn render_all(&mut self, records: Vec<AttendanceRecord>) {
        self.rows.clear();
        for record in records {
            self.append_row(record);
        }
        debug!(rows = self.rows.len(), "Table rendered");
    }

    pub fn append_row(&mut self, record: AttendanceRecord) -> Uuid {
        let id = Uuid::new_v4();
        self.rows.push(TableRow { id, record });
        id
    }

    /// The per-row remove action: deletes every saved record with this row's
    /// (employee id, date) and takes only this row out of the view.
    pub fn remove_row(
        &mut self,
        row_id: Uuid,
        store: &RecordStore,
    ) -> Result<AttendanceRecord, AppError> {
        let idx = self
            .rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or_else(|| AppError::NotFound(format!("Row {row_id}")))?;

        let record = &self.rows[idx].record;
        store.remove_record(&record.employee_id, &record.date)?;

        Ok(self.rows.remove(idx).record)
    }

    /// Drops every visible row keyed by (employee id, date).
    pub fn remove_matching(&mut self, employee_id: &str, date: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !r.record.matches(employee_id, date));
        before - self.rows.len()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            headers: Column::data_columns().map(|c| c.to_string()).collect(),
            rows: self.rows.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn view(&self) -> TableView {
        TableView {
            headers: Column::iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| TableRowView {
                    row_id: r.id,
                    cells: Column::iter().map(|c| c.cell(&r.record)).collect(),
                    record: r.record.clone(),
                })
                .collect(),
            total: self.rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{model::attendance::Status, store::MemoryStore};

    fn record(id: &str, date: &str, ins: &[&str], outs: &[&str]) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: id.into(),
            employee_name: "Alice".into(),
            designation: "Engineer".into(),
            date_of_joining: "2021-03-15".into(),
            status: Status::new("Present"),
            in_times: ins.iter().map(|s| s.to_string()).collect(),
            out_times: outs.iter().map(|s| s.to_string()).collect(),
            date: date.into(),
        }
    }

    fn store_with(records: &[AttendanceRecord]) -> RecordStore {
        let store = RecordStore::new(Arc::new(MemoryStore::new()), "attendanceRecords");
        for r in records {
            store.append_record(r).unwrap();
        }
        store
    }

    #[test]
    fn column_order_is_fixed() {
        let headers: Vec<String> = Column::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            headers,
            vec![
                "Employee ID",
                "Employee Name",
                "Designation",
                "Date of Joining",
                "Status",
                "In Time",
                "Out Time",
                "Date",
                "Action"
            ]
        );
    }

    #[test]
    fn cells_join_times() {
        let row = TableRow {
            id: Uuid::new_v4(),
            record: record("E1", "1/1/2024", &["09:00", "13:00"], &["12:00", ""]),
        };
        assert_eq!(
            row.cells(),
            vec![
                "E1",
                "Alice",
                "Engineer",
                "2021-03-15",
                "Present",
                "09:00, 13:00",
                "12:00, ",
                "1/1/2024"
            ]
        );
    }

    #[test]
    fn render_all_replaces_rows_in_order() {
        let mut table = AttendanceTable::new();
        table.append_row(record("old", "1/1/2024", &[], &[]));

        table.render_all(vec![
            record("E1", "1/1/2024", &[], &[]),
            record("E2", "1/1/2024", &[], &[]),
        ]);

        let ids: Vec<_> = table.rows().iter().map(|r| r.record.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2"]);
    }

    #[test]
    fn remove_row_deletes_all_matches_from_store_but_one_row_from_view() {
        let a = record("E1", "1/1/2024", &["09:00"], &["12:00"]);
        let b = record("E1", "1/1/2024", &["13:00"], &["17:00"]);
        let c = record("E2", "1/1/2024", &["09:00"], &["17:00"]);
        let store = store_with(&[a.clone(), b.clone(), c.clone()]);
        let mut table = AttendanceTable::new();
        table.render_all(store.load_all());
        let first = table.rows()[0].id;

        let removed = table.remove_row(first, &store).unwrap();

        assert_eq!(removed, a);
        assert_eq!(store.load_all(), vec![c]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].record, b);
    }

    #[test]
    fn remove_unknown_row_is_not_found() {
        let store = store_with(&[]);
        let mut table = AttendanceTable::new();
        let err = table.remove_row(Uuid::new_v4(), &store).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn remove_matching_drops_every_visible_match() {
        let mut table = AttendanceTable::new();
        table.render_all(vec![
            record("E1", "1/1/2024", &[], &[]),
            record("E1", "1/1/2024", &[], &[]),
            record("E1", "1/2/2024", &[], &[]),
        ]);

        assert_eq!(table.remove_matching("E1", "1/1/2024"), 2);
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn snapshot_omits_action_column() {
        let mut table = AttendanceTable::new();
        table.append_row(record("E1", "1/1/2024", &["09:00"], &["17:00"]));

        let snapshot = table.snapshot();
        assert_eq!(snapshot.headers.len(), 8);
        assert_eq!(snapshot.rows[0].len(), 8);
        assert!(!snapshot.headers.contains(&"Action".to_string()));

        let view = table.view();
        assert_eq!(view.headers.len(), 9);
        assert_eq!(view.rows[0].cells[8], "Remove");
    }
}
