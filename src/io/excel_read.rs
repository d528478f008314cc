use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::flatten::{INPUT_FIELDS, INPUTS_COLUMNS, INPUTS_SHEET};
use crate::model::{EconInput, validate};

const VALUE_COLUMN: usize = 2;

/// Reads an [`EconInput`] back from a workbook following the conventions
/// produced by the [`excel_write`](crate::io::excel_write) module.
///
/// Only the Inputs sheet is consulted; Results and Breakdown are derived data.
pub fn read_input(path: &Path) -> Result<EconInput> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    parse_inputs(&mut workbook)
}

/// Same as [`read_input`], for a workbook already held in memory.
pub fn read_input_from_bytes(bytes: &[u8]) -> Result<EconInput> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    parse_inputs(&mut workbook)
}

fn parse_inputs<R: Read + Seek>(workbook: &mut Xlsx<R>) -> Result<EconInput> {
    let range = read_required_sheet(workbook, INPUTS_SHEET)?;
    let rows: Vec<&[DataType]> = range.rows().collect();

    let headers: Vec<String> = rows
        .first()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .unwrap_or_default();
    if !headers.starts_with(&INPUTS_COLUMNS.map(String::from)) {
        return Err(ToolError::InvalidWorkbook(format!(
            "sheet '{INPUTS_SHEET}' must start with columns {INPUTS_COLUMNS:?}"
        )));
    }

    let mut input = EconInput::default();
    for field in &INPUT_FIELDS {
        let row = rows.iter().skip(1).find(|row| {
            cell_to_string(row.first()).trim() == field.section
                && cell_to_string(row.get(1)).trim() == field.parameter
        });
        let value = match row {
            Some(row) => cell_to_number(row.get(VALUE_COLUMN), field.parameter)?,
            None => {
                debug!(
                    section = field.section,
                    parameter = field.parameter,
                    "input row absent, defaulting to 0"
                );
                0.0
            }
        };
        (field.set)(&mut input, value);
    }

    Ok(validate(input)?)
}

fn read_required_sheet<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn cell_to_number(cell: Option<&DataType>, parameter: &str) -> Result<f64> {
    let invalid = |value: String| ToolError::InvalidLiteral {
        column: format!("Value ({parameter})"),
        value,
    };
    match cell {
        Some(DataType::Float(value)) => Ok(*value),
        Some(DataType::Int(value)) => Ok(*value as f64),
        Some(DataType::String(value)) if value.trim().is_empty() => Ok(0.0),
        Some(DataType::String(value)) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(value.clone())),
        Some(DataType::Empty) | None => Ok(0.0),
        Some(other) => Err(invalid(other.to_string())),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_are_read_as_is() {
        let cell = DataType::Float(12.345_678);
        assert_eq!(cell_to_number(Some(&cell), "Volume").unwrap(), 12.345_678);
        assert_eq!(cell_to_number(Some(&DataType::Int(40)), "Volume").unwrap(), 40.0);
    }

    #[test]
    fn display_strings_are_parsed() {
        let cell = DataType::String(" 12.50 ".to_string());
        assert_eq!(cell_to_number(Some(&cell), "Label").unwrap(), 12.5);
    }

    #[test]
    fn blank_cells_count_as_zero() {
        assert_eq!(cell_to_number(None, "Cap").unwrap(), 0.0);
        assert_eq!(cell_to_number(Some(&DataType::Empty), "Cap").unwrap(), 0.0);
        let blank = DataType::String("  ".to_string());
        assert_eq!(cell_to_number(Some(&blank), "Cap").unwrap(), 0.0);
    }

    #[test]
    fn text_cells_are_rejected() {
        let cell = DataType::String("twelve".to_string());
        let error = cell_to_number(Some(&cell), "Label").unwrap_err();
        assert!(matches!(
            error,
            ToolError::InvalidLiteral { ref column, ref value }
                if column == "Value (Label)" && value == "twelve"
        ));
    }
}
