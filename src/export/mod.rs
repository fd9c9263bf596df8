pub mod pdf;
pub mod spreadsheet;

use derive_more::{Display, From};
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::table::TableSnapshot;

/// File name stem shared by every export.
pub const FILE_STEM: &str = "attendance_records";

#[derive(Debug, Display, From)]
pub enum ExportError {
    #[display(fmt = "pdf: {}", _0)]
    Pdf(String),

    #[display(fmt = "spreadsheet: {}", _0)]
    Spreadsheet(rust_xlsxwriter::XlsxError),
}

impl std::error::Error for ExportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    #[strum(to_string = "spreadsheet", serialize = "xlsx")]
    Spreadsheet,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Spreadsheet => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(self) -> String {
        format!("{FILE_STEM}.{}", self.extension())
    }
}

/// A rendered download.
#[derive(Debug)]
pub struct ExportFile {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn file_name(&self) -> String {
        self.format.file_name()
    }
}

pub fn export(
    format: ExportFormat,
    title: &str,
    table: &TableSnapshot,
) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render(title, table)?,
        ExportFormat::Spreadsheet => spreadsheet::render(table)?,
    };
    tracing::info!(%format, rows = table.rows.len(), size = bytes.len(), "Export rendered");
    Ok(ExportFile { format, bytes })
}
