//! Spreadsheet report (XLSX).

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{ReportError, Result};
use crate::parse::GroupRecord;

use super::RecordSink;

const HEADERS: [&str; 3] = ["WLC Address", "FlexConnect Group", "AP Count"];
const COLUMN_WIDTHS: [f64; 3] = [15.0, 40.0, 12.0];

/// One-worksheet spreadsheet with three named columns.
pub struct SpreadsheetReport {
    path: PathBuf,
    workbook: Workbook,
    sheet: Worksheet,
    next_row: u32,
}

impl SpreadsheetReport {
    /// Prepare a workbook with the header row; nothing is written to disk
    /// until [`RecordSink::finish`].
    pub fn create(path: &Path) -> Result<Self> {
        let mut sheet = Worksheet::new();
        let bold = Format::new().set_bold();

        for (col, header) in HEADERS.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(ReportError::Spreadsheet)?;
        }
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            sheet
                .set_column_width(col as u16, *width)
                .map_err(ReportError::Spreadsheet)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            workbook: Workbook::new(),
            sheet,
            next_row: 1,
        })
    }
}

impl RecordSink for SpreadsheetReport {
    fn append_rows(&mut self, rows: &[GroupRecord]) -> Result<()> {
        for row in rows {
            self.sheet
                .write_string(self.next_row, 0, &row.host)
                .and_then(|s| s.write_string(self.next_row, 1, &row.group))
                .and_then(|s| s.write_number(self.next_row, 2, f64::from(row.ap_count)))
                .map_err(ReportError::Spreadsheet)?;
            self.next_row += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let sheet = std::mem::replace(&mut self.sheet, Worksheet::new());
        self.workbook.push_worksheet(sheet);
        self.workbook
            .save(&self.path)
            .map_err(ReportError::Spreadsheet)?;
        Ok(())
    }
}
