//! Spreadsheet export of the cached records.

use crate::models::{Record, RECORD_COLUMNS};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;

pub const EXPORT_FILE_NAME: &str = "my_relaxation_space_records.xlsx";
pub const SHEET_NAME: &str = "휴식공간기록";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no records to export")]
    Empty,
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Writes every record to a single sheet: a header row of field names, then
/// one row per record in cache order.
pub fn to_xlsx(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in RECORD_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in record.column_values().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.push_worksheet(worksheet);
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_produces_no_file() {
        assert!(matches!(to_xlsx(&[]), Err(ExportError::Empty)));
    }

    #[test]
    fn writes_zip_container() {
        let records = vec![Record {
            location: "카페".to_string(),
            activity: "독서, 음악 감상".to_string(),
            time: "1~2시간".to_string(),
            timestamp: "2025-05-01T09:30:00.000Z".to_string(),
            ..Record::default()
        }];

        let bytes = to_xlsx(&records).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
