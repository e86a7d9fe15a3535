//! Spreadsheet loader
//!
//! Reads an .xlsx workbook from uploaded bytes into a table addressed by
//! column name. The header row is given 1-based, the way a spreadsheet
//! application displays it; rows above it are skipped.

use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};
use std::io::Cursor;

use crate::error::{MatchError, MatchResult, SheetKind};

/// One worksheet reduced to trimmed cell strings under exact column names.
/// Column names are matched case-sensitively; the required columns are fixed
/// by the request contract, not inferred.
#[derive(Debug, Clone)]
pub struct SheetTable {
    kind: SheetKind,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Parse the first worksheet of an .xlsx workbook.
    pub fn from_xlsx_bytes(kind: SheetKind, data: &[u8], header_row: u32) -> MatchResult<Self> {
        if header_row < 1 {
            return Err(MatchError::validation("header_row", "header row is 1-based"));
        }

        let cursor = Cursor::new(data);
        let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(cursor)
            .map_err(|e: calamine::XlsxError| MatchError::sheet_parse(kind, e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| MatchError::sheet_parse(kind, "no sheets found in workbook"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| {
                MatchError::sheet_parse(kind, format!("worksheet '{}' not found", sheet_name))
            })?
            .map_err(|e| MatchError::sheet_parse(kind, e.to_string()))?;

        // The range starts at the first non-empty cell, not at physical row 1,
        // so the 1-based header index is offset by the range origin. A header
        // inside an entirely blank leading region clamps to the first data row.
        let origin = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let skip = (header_row as usize - 1).saturating_sub(origin);
        let mut rows_iter = range.rows().skip(skip);

        let headers: Vec<String> = rows_iter
            .next()
            .ok_or_else(|| {
                MatchError::sheet_parse(
                    kind,
                    format!("header row {} is beyond the end of the sheet", header_row),
                )
            })?
            .iter()
            .map(|cell: &DataType| cell.to_string().trim().to_string())
            .collect();

        let rows: Vec<Vec<String>> = rows_iter
            .map(|row| {
                (0..headers.len())
                    .map(|i| {
                        row.get(i)
                            .map(|cell: &DataType| cell.to_string().trim().to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            kind,
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows below the header, empty cells included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Schema check: fail with the user-facing column message before any read.
    pub fn require_column(&self, name: &str) -> MatchResult<usize> {
        self.column_index(name)
            .ok_or_else(|| MatchError::missing_column(self.kind, name))
    }

    /// Non-empty values of one column, row order preserved.
    pub fn column_values(&self, name: &str) -> MatchResult<Vec<String>> {
        let idx = self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row[idx].clone())
            .filter(|value| !value.is_empty())
            .collect())
    }

    /// Row-ordered (a, b) pairs where both cells are non-empty. Rows missing
    /// either value are dropped, mirroring a dropna over the two columns.
    pub fn paired_values(&self, a: &str, b: &str) -> MatchResult<Vec<(String, String)>> {
        let a_idx = self.require_column(a)?;
        let b_idx = self.require_column(b)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| !row[a_idx].is_empty() && !row[b_idx].is_empty())
            .map(|row| (row[a_idx].clone(), row[b_idx].clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_fixture(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_columns_by_exact_name() {
        let data = xlsx_fixture(&[
            &["Feature WERS Code", "Description"],
            &["AB-12", "heated seats"],
            &["", "blank code row"],
            &["XY_9", "trailer tow"],
        ]);

        let table = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 1).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column_values("Feature WERS Code").unwrap(),
            vec!["AB-12".to_string(), "XY_9".to_string()]
        );
    }

    #[test]
    fn test_header_row_offset_skips_leading_rows() {
        let data = xlsx_fixture(&[
            &["Quarterly feature summary"],
            &["generated 2024-03-01"],
            &["Feature WERS Code"],
            &["AB-12"],
        ]);

        let table = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 3).unwrap();
        assert_eq!(table.headers(), &["Feature WERS Code".to_string()]);
        assert_eq!(table.column_values("Feature WERS Code").unwrap(), vec!["AB-12"]);
    }

    #[test]
    fn test_header_row_counts_blank_physical_rows() {
        // Header displayed on row 3 with rows 1-2 entirely blank: the header
        // index counts physical rows, not rows from the first non-empty cell.
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "Feature WERS Code").unwrap();
        sheet.write_string(3, 0, "AB-12").unwrap();
        let data = workbook.save_to_buffer().unwrap();

        let table = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 3).unwrap();
        assert_eq!(table.headers(), &["Feature WERS Code".to_string()]);
        assert_eq!(table.column_values("Feature WERS Code").unwrap(), vec!["AB-12"]);
    }

    #[test]
    fn test_missing_column_reports_sheet_by_name() {
        let data = xlsx_fixture(&[&["Wrong Header"], &["AB-12"]]);

        let table = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 1).unwrap();
        let err = table.require_column("Feature WERS Code").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column 'Feature WERS Code' not found in the Excel file."
        );
    }

    #[test]
    fn test_paired_values_drop_incomplete_rows() {
        let data = xlsx_fixture(&[
            &["WERS Code", "Sales Code"],
            &["AB-12", "S1"],
            &["AB-12", ""],
            &["", "S9"],
            &["AB-12", "S2"],
        ]);

        let table = SheetTable::from_xlsx_bytes(SheetKind::Voci, &data, 1).unwrap();
        let pairs = table.paired_values("WERS Code", "Sales Code").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("AB-12".to_string(), "S1".to_string()),
                ("AB-12".to_string(), "S2".to_string()),
            ]
        );
    }

    #[test]
    fn test_corrupt_workbook_is_a_parse_error() {
        let err = SheetTable::from_xlsx_bytes(SheetKind::Voci, b"not an xlsx file", 1).unwrap_err();
        assert!(err.to_string().starts_with("Error reading VOCI Excel file:"));
    }

    #[test]
    fn test_header_row_beyond_sheet_is_a_parse_error() {
        let data = xlsx_fixture(&[&["Feature WERS Code"], &["AB-12"]]);
        let err = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 10).unwrap_err();
        assert_eq!(err.error_code(), "SHEET_PARSE_ERROR");
    }

    #[test]
    fn test_zero_header_row_is_rejected() {
        let data = xlsx_fixture(&[&["Feature WERS Code"]]);
        let err = SheetTable::from_xlsx_bytes(SheetKind::Feature, &data, 0).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
