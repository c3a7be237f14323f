//! Export of selected courses from the full course spreadsheet into a new
//! workbook for download.

mod error;

pub use error::ExportError;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// Header label of the course code column in the source sheet.
pub const CODE_HEADER_LABEL: &str = "流水號";
/// Name of the single sheet in exported workbooks.
pub const OUTPUT_SHEET_NAME: &str = "Selected Courses";
/// File name offered to the browser.
pub const EXPORT_FILE_NAME: &str = "selected_courses.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// An encoded workbook ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    pub bytes: Vec<u8>,
    /// Number of data rows copied from the source sheet
    pub matched: usize,
    pub file_name: &'static str,
}

/// Copies rows for selected course codes out of the full course spreadsheet.
#[derive(Debug, Clone)]
pub struct CourseExporter {
    source_path: PathBuf,
}

impl CourseExporter {
    /// Creates an exporter reading from the spreadsheet at `source_path`.
    ///
    /// The file is opened on every export, not here.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
        }
    }

    /// Builds a workbook containing the header row and every row whose
    /// course code is in `codes`.
    ///
    /// Cells keep their original columns. Rows are emitted in source order
    /// directly below the header.
    ///
    /// # Arguments
    /// * `codes` - Course codes (流水號) to include
    ///
    /// # Returns
    /// * `Ok(ExportedWorkbook)` - The encoded workbook and matched row count
    /// * `Err(ExportError::NoCourseCodes)` - If `codes` is empty
    /// * `Err(ExportError::CodeColumnNotFound)` - If no header names the code column
    /// * `Err` - If the source can't be read or the output can't be encoded
    pub fn export_courses(&self, codes: &HashSet<String>) -> Result<ExportedWorkbook, ExportError> {
        if codes.is_empty() {
            return Err(ExportError::NoCourseCodes);
        }

        let mut source = open_workbook_auto(&self.source_path)?;
        let range = source
            .worksheet_range_at(0)
            .ok_or(ExportError::NoWorksheet)??;

        // The header must be the first sheet row; a blank first row has no header
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        if first_row != 0 {
            return Err(ExportError::CodeColumnNotFound);
        }
        let mut rows = range.rows();

        let header = rows.next().ok_or(ExportError::CodeColumnNotFound)?;
        let code_idx = header
            .iter()
            .position(|cell| cell_text(cell).is_some_and(|text| text.contains(CODE_HEADER_LABEL)))
            .ok_or(ExportError::CodeColumnNotFound)?;

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(OUTPUT_SHEET_NAME)?;

        write_row(sheet, 0, first_col, header)?;

        let mut matched = 0;
        for row in rows {
            let code = row.get(code_idx).and_then(cell_text);
            if code.is_some_and(|code| codes.contains(&code)) {
                matched += 1;
                write_row(sheet, matched, first_col, row)?;
            }
        }

        let bytes = workbook.save_to_buffer()?;

        info!(
            "Exported {} of {} requested courses from {}",
            matched,
            codes.len(),
            self.source_path.display()
        );

        Ok(ExportedWorkbook {
            bytes,
            matched: matched as usize,
            file_name: EXPORT_FILE_NAME,
        })
    }
}

/// Text of a cell as it would be typed, with integral numbers printed
/// without a fractional part. Empty cells have no text.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some((*f as i64).to_string())
        }
        other => Some(other.to_string()),
    }
}

fn write_row(
    sheet: &mut Worksheet,
    row: u32,
    first_col: u32,
    cells: &[Data],
) -> Result<(), rust_xlsxwriter::XlsxError> {
    for (idx, cell) in cells.iter().enumerate() {
        // Columns beyond the sheet limit can't exist in a valid source file
        let Ok(col) = u16::try_from(first_col as usize + idx) else {
            break;
        };

        match cell {
            Data::Empty => {}
            Data::String(s) => {
                sheet.write_string(row, col, s)?;
            }
            Data::Int(i) => {
                sheet.write_number(row, col, *i as f64)?;
            }
            Data::Float(f) => {
                sheet.write_number(row, col, *f)?;
            }
            Data::Bool(b) => {
                sheet.write_boolean(row, col, *b)?;
            }
            other => {
                sheet.write_string(row, col, other.to_string())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Xlsx;
    use std::io::Cursor;
    use std::path::Path;

    fn write_source(path: &Path, header: &[&str], rows: &[(&str, &str, f64)]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, label) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *label).unwrap();
        }
        for (i, (code, name, credits)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *name).unwrap();
            sheet.write_string(row, 1, *code).unwrap();
            sheet.write_number(row, 2, *credits).unwrap();
        }
        workbook.save(path).unwrap();
    }

    fn read_output(bytes: Vec<u8>) -> (String, Vec<Vec<Data>>) {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let name = workbook.sheet_names()[0].clone();
        let range = workbook.worksheet_range(&name).unwrap();
        (name, range.rows().map(|r| r.to_vec()).collect())
    }

    fn codes(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_rows() -> Vec<(&'static str, &'static str, f64)> {
        vec![
            ("10101", "資料結構", 3.0),
            ("10102", "微積分", 4.0),
            ("10103", "線性代數", 3.0),
        ]
    }

    #[test]
    fn test_empty_selection_skips_source() {
        let exporter = CourseExporter::new("/nonexistent/bigcontent.xlsx");
        let err = exporter.export_courses(&HashSet::new()).unwrap_err();

        assert!(matches!(err, ExportError::NoCourseCodes));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_exports_matching_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigcontent.xlsx");
        write_source(&path, &["名稱", "流水號", "學分"], &sample_rows());

        let exporter = CourseExporter::new(&path);
        let exported = exporter
            .export_courses(&codes(&["10103", "10101", "99999"]))
            .unwrap();

        assert_eq!(exported.matched, 2);
        assert_eq!(exported.file_name, EXPORT_FILE_NAME);

        let (sheet_name, rows) = read_output(exported.bytes);
        assert_eq!(sheet_name, OUTPUT_SHEET_NAME);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][1], Data::String("流水號".to_string()));
        assert_eq!(rows[1][0], Data::String("資料結構".to_string()));
        assert_eq!(rows[2][1], Data::String("10103".to_string()));
        assert_eq!(rows[2][2], Data::Float(3.0));
    }

    #[test]
    fn test_header_label_matched_by_substring() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigcontent.xlsx");
        write_source(&path, &["名稱", "課程流水號", "學分"], &sample_rows());

        let exported = CourseExporter::new(&path)
            .export_courses(&codes(&["10102"]))
            .unwrap();
        assert_eq!(exported.matched, 1);
    }

    #[test]
    fn test_missing_code_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigcontent.xlsx");
        write_source(&path, &["名稱", "代碼", "學分"], &sample_rows());

        let err = CourseExporter::new(&path)
            .export_courses(&codes(&["10101"]))
            .unwrap_err();
        assert!(matches!(err, ExportError::CodeColumnNotFound));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_header_must_be_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigcontent.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 0, "流水號").unwrap();
        sheet.write_string(2, 0, "10101").unwrap();
        workbook.save(&path).unwrap();

        let err = CourseExporter::new(&path)
            .export_courses(&codes(&["10101"]))
            .unwrap_err();
        assert!(matches!(err, ExportError::CodeColumnNotFound));
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CourseExporter::new(dir.path().join("missing.xlsx"))
            .export_courses(&codes(&["10101"]))
            .unwrap_err();
        assert!(matches!(err, ExportError::Read(_)));
    }

    #[test]
    fn test_numeric_codes_match_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bigcontent.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "流水號").unwrap();
        sheet.write_number(1, 0, 20001.0).unwrap();
        sheet.write_number(2, 0, 20002.0).unwrap();
        workbook.save(&path).unwrap();

        let exported = CourseExporter::new(&path)
            .export_courses(&codes(&["20002"]))
            .unwrap();
        assert_eq!(exported.matched, 1);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Float(12.0)), Some("12".to_string()));
        assert_eq!(cell_text(&Data::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
    }
}
