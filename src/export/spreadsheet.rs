use rust_xlsxwriter::{Format, Workbook};

use super::ExportError;
use crate::table::TableSnapshot;

const SHEET_NAME: &str = "Sheet1";

/// One worksheet: bold header row, then the table rows as text cells.
pub fn render(table: &TableSnapshot) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, &header)?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string(idx as u32 + 1, col as u16, cell)?;
        }
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_an_xlsx_archive() {
        let table = TableSnapshot {
            headers: vec!["Employee ID".into(), "In Time".into()],
            rows: vec![vec!["E1".into(), "09:00, 13:00".into()]],
        };

        let bytes = render(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_table_is_valid() {
        let bytes = render(&TableSnapshot {
            headers: vec![],
            rows: vec![],
        })
        .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
