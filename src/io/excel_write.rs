use std::path::Path;

use rust_xlsxwriter::{Format, Table, TableColumn, Workbook};

use crate::error::Result;
use crate::flatten::{Cell, WorkbookData};

/// Writes the provided workbook data to the given path.
pub fn write_workbook(path: &Path, workbook: &WorkbookData) -> Result<()> {
    let mut workbook_writer = build_writer(workbook)?;
    workbook_writer.save(path)?;
    Ok(())
}

/// Renders the provided workbook data into an in-memory `.xlsx` file.
pub fn write_workbook_to_buffer(workbook: &WorkbookData) -> Result<Vec<u8>> {
    let mut workbook_writer = build_writer(workbook)?;
    Ok(workbook_writer.save_to_buffer()?)
}

fn build_writer(workbook: &WorkbookData) -> Result<Workbook> {
    let mut workbook_writer = Workbook::new();

    for table in &workbook.tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(value) => {
                        worksheet.write_string(row_num, col_idx as u16, value)?;
                    }
                    Cell::Number { value, decimals } => {
                        // The stored value keeps full precision; only the
                        // display is rounded.
                        let format = Format::new().set_num_format(number_format(*decimals));
                        worksheet.write_number_with_format(
                            row_num,
                            col_idx as u16,
                            *value,
                            &format,
                        )?;
                    }
                }
            }
        }

        let columns: Vec<TableColumn> = table
            .columns
            .iter()
            .map(|header| TableColumn::new().set_header(header))
            .collect();
        let mut excel_table = Table::new();
        excel_table.set_autofilter(true).set_columns(&columns);

        let col_end = (table.columns.len() as u16).saturating_sub(1);
        let row_end = if table.rows.is_empty() {
            0
        } else {
            table.rows.len() as u32
        };
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
        worksheet.autofit();
    }

    Ok(workbook_writer)
}

fn number_format(decimals: u8) -> String {
    if decimals == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(usize::from(decimals)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formats_follow_decimals() {
        assert_eq!(number_format(0), "0");
        assert_eq!(number_format(2), "0.00");
        assert_eq!(number_format(3), "0.000");
    }
}
