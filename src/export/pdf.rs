use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::ExportError;
use crate::table::TableSnapshot;

// Landscape A4, millimetres.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 14.0;

const TITLE_X: f32 = 20.0;
const TITLE_Y: f32 = PAGE_HEIGHT - 10.0;
const TITLE_SIZE: f32 = 16.0;

const TABLE_TOP: f32 = PAGE_HEIGHT - 20.0;
const CELL_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 6.0;

// Rough Helvetica average glyph width in mm per point of font size.
const GLYPH_WIDTH: f32 = 0.5 * 0.3528;

/// Title line followed by the table, header repeated on each page.
pub fn render(title: &str, table: &TableSnapshot) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let grid = Grid::new(table.headers.len());

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(title, TITLE_SIZE, Mm(TITLE_X), Mm(TITLE_Y), &bold);

    let mut y = TABLE_TOP;
    grid.write_row(&current, &table.headers, y, &bold);
    y -= ROW_HEIGHT;

    for row in &table.rows {
        if y < MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT - MARGIN;
            grid.write_row(&current, &table.headers, y, &bold);
            y -= ROW_HEIGHT;
        }
        grid.write_row(&current, row, y, &regular);
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

struct Grid {
    column_width: f32,
    max_chars: usize,
}

impl Grid {
    fn new(columns: usize) -> Self {
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns.max(1) as f32;
        let max_chars = (column_width / (CELL_SIZE * GLYPH_WIDTH)).floor() as usize;
        Self {
            column_width,
            max_chars: max_chars.max(4),
        }
    }

    fn write_row(
        &self,
        layer: &PdfLayerReference,
        cells: &[String],
        y: f32,
        font: &IndirectFontRef,
    ) {
        for (idx, cell) in cells.iter().enumerate() {
            let x = MARGIN + idx as f32 * self.column_width;
            layer.use_text(self.fit(cell), CELL_SIZE, Mm(x), Mm(y), font);
        }
    }

    fn fit(&self, text: &str) -> String {
        if text.chars().count() <= self.max_chars {
            return text.to_string();
        }
        let mut cut: String = text.chars().take(self.max_chars - 3).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rows: usize) -> TableSnapshot {
        TableSnapshot {
            headers: vec!["Employee ID".into(), "Employee Name".into(), "Date".into()],
            rows: (0..rows)
                .map(|i| vec![format!("E{i}"), "Alice".into(), "1/1/2024".into()])
                .collect(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render("Employee Attendance Records", &snapshot(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn paginates_long_tables() {
        let short = render("t", &snapshot(1)).unwrap();
        let long = render("t", &snapshot(200)).unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn empty_table_still_has_title() {
        let bytes = render("t", &TableSnapshot { headers: vec![], rows: vec![] }).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let grid = Grid::new(8);
        let long = "x".repeat(200);
        let fitted = grid.fit(&long);
        assert_eq!(fitted.chars().count(), grid.max_chars);
        assert!(fitted.ends_with("..."));
        assert_eq!(grid.fit("09:00"), "09:00");
    }
}
