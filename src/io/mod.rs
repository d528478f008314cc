//! Spreadsheet adapters: [`excel_write`] materialises a laid-out workbook and
//! [`excel_read`] rebuilds an input from the Inputs sheet.

pub mod excel_read;
pub mod excel_write;
