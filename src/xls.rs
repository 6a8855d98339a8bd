use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::report::Report;

const SHEET_NAME: &str = "varsift_report";

/// Writes the report as a single-sheet workbook: a header row of column
/// names, then one row per record in the same order as the TSV output,
/// every value in its string form.
pub fn write_xls(report: &Report, path: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in report.schema.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (row, record) in report.records().enumerate() {
        for (col, value) in record.fields().iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value.as_str())?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("could not write workbook to {path}"))?;

    Ok(())
}
