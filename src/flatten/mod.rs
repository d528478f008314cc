//! Flattens an input and its computed result into the three-sheet workbook
//! layout. The sheet names, column headers, and the `(section, parameter)`
//! naming of the Inputs rows are the contract shared with
//! [`excel_read`](crate::io::excel_read).

use crate::econ::ratio;
use crate::model::{EconInput, EconResult};

/// Sheet holding one row per input field.
pub const INPUTS_SHEET: &str = "Inputs";
/// Sheet holding the computed metrics.
pub const RESULTS_SHEET: &str = "Results";
/// Sheet holding the cost of goods split by category.
pub const BREAKDOWN_SHEET: &str = "Breakdown";

pub const INPUTS_COLUMNS: [&str; 4] = ["Section", "Parameter", "Value", "Unit"];
pub const RESULTS_COLUMNS: [&str; 3] = ["Metric", "Value", "Unit"];
pub const BREAKDOWN_COLUMNS: [&str; 3] = ["Category", "Amount", "Percent"];

/// Decimal places shown for monetary and physical quantities.
pub const DEFAULT_DECIMALS: u8 = 2;

/// A single cell value. Numbers keep their full precision; `decimals` only
/// drives how the spreadsheet displays them.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number { value: f64, decimals: u8 },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn amount(value: f64) -> Self {
        Cell::Number {
            value,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn count(value: u64) -> Self {
        Cell::Number {
            value: value as f64,
            decimals: 0,
        }
    }

    /// Renders the cell the way the spreadsheet shows it.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Number { value, decimals } => format_amount(*value, *decimals),
        }
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    fn new(sheet_name: &str, columns: &[&str]) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Represents all tables required to materialise the Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

/// One row of the Inputs sheet and the model field it maps to.
pub struct InputField {
    pub section: &'static str,
    pub parameter: &'static str,
    pub unit: &'static str,
    pub get: fn(&EconInput) -> f64,
    pub set: fn(&mut EconInput, f64),
}

macro_rules! input_field {
    ($section:literal, $parameter:literal, $unit:literal, $($path:ident).+) => {
        InputField {
            section: $section,
            parameter: $parameter,
            unit: $unit,
            get: |input| input.$($path).+,
            set: |input, value| input.$($path).+ = value,
        }
    };
}

/// Inputs sheet rows, in the order they are written.
pub const INPUT_FIELDS: [InputField; 21] = [
    input_field!("Ingredients", "Juice per liter", "per L", ingredients.juice_per_liter),
    input_field!("Ingredients", "Yeast per 1000L", "per 1000 L", ingredients.yeast_per_1000l),
    input_field!("Ingredients", "Sugar per kg", "per kg", ingredients.sugar_per_kg),
    input_field!("Ingredients", "Other per bottle", "per bottle", ingredients.other_per_bottle),
    input_field!("Packaging", "Bottle 75cl", "per unit", packaging.bottle_75cl),
    input_field!("Packaging", "Bottle 150cl", "per unit", packaging.bottle_150cl),
    input_field!("Packaging", "Label", "per unit", packaging.label),
    input_field!("Packaging", "Cap", "per unit", packaging.cap),
    input_field!("Packaging", "Box", "per unit", packaging.box_cost),
    input_field!("Labor", "Hourly rate", "per hour", labor.hourly_rate),
    input_field!("Labor", "Hours per batch", "hours", labor.hours_per_batch),
    input_field!("Labor", "Monthly fixed", "per month", labor.monthly_fixed),
    input_field!("Overhead", "Monthly fixed", "per month", overhead.monthly_fixed),
    input_field!("Overhead", "Per liter", "per L", overhead.per_liter),
    input_field!("Overhead", "Percent of COGS", "%", overhead.percent_of_cogs),
    input_field!("Production", "Volume", "L", production.volume_liters),
    input_field!("Production", "Wastage", "%", production.wastage_percent),
    input_field!("Production", "Yield efficiency", "%", production.yield_efficiency),
    input_field!("Pricing", "Bottle 75cl excl. VAT", "per bottle", pricing.bottle_75cl_excl_vat),
    input_field!("Pricing", "Bottle 150cl excl. VAT", "per bottle", pricing.bottle_150cl_excl_vat),
    input_field!("Pricing", "Price inflation yearly", "%", pricing.price_inflation_yearly),
];

/// Lays out `input` and its computed `result` as the Inputs, Results, and
/// Breakdown sheets, in that order.
pub fn build_workbook(input: &EconInput, result: &EconResult) -> WorkbookData {
    WorkbookData {
        tables: vec![
            build_inputs_table(input),
            build_results_table(result),
            build_breakdown_table(result),
        ],
    }
}

fn build_inputs_table(input: &EconInput) -> SheetTable {
    let mut table = SheetTable::new(INPUTS_SHEET, &INPUTS_COLUMNS);
    for field in &INPUT_FIELDS {
        table.rows.push(vec![
            Cell::text(field.section),
            Cell::text(field.parameter),
            Cell::amount((field.get)(input)),
            Cell::text(field.unit),
        ]);
    }
    table
}

fn build_results_table(result: &EconResult) -> SheetTable {
    let metrics = [
        ("Effective volume", Cell::amount(result.effective_volume_liters), "L"),
        ("Ingredients cost", Cell::amount(result.ingredients_cost), "currency"),
        ("Packaging cost", Cell::amount(result.packaging_cost), "currency"),
        ("Labor cost", Cell::amount(result.labor_cost), "currency"),
        ("Overhead cost", Cell::amount(result.overhead_cost), "currency"),
        ("Total COGS", Cell::amount(result.total_cogs), "currency"),
        ("COGS per liter", Cell::amount(result.cogs_per_liter), "per L"),
        ("COGS per bottle 75cl", Cell::amount(result.cogs_per_bottle_75cl), "per bottle"),
        ("COGS per bottle 150cl", Cell::amount(result.cogs_per_bottle_150cl), "per bottle"),
        ("Bottles 75cl", Cell::count(result.bottles_75cl), "bottles"),
        ("Bottles 150cl", Cell::count(result.bottles_150cl), "bottles"),
        ("Gross margin 75cl", Cell::amount(result.gross_margin_75cl), "per bottle"),
        ("Gross margin 150cl", Cell::amount(result.gross_margin_150cl), "per bottle"),
        ("Gross margin % 75cl", Cell::amount(result.gross_margin_pct_75cl), "%"),
        ("Gross margin % 150cl", Cell::amount(result.gross_margin_pct_150cl), "%"),
        ("Revenue 75cl", Cell::amount(result.revenue_75cl), "currency"),
        ("Revenue 150cl", Cell::amount(result.revenue_150cl), "currency"),
        ("Total revenue", Cell::amount(result.total_revenue), "currency"),
        ("Total profit", Cell::amount(result.total_profit), "currency"),
        ("Fixed costs", Cell::amount(result.fixed_costs), "currency"),
        (
            "Variable cost per 75cl equivalent",
            Cell::amount(result.variable_cost_per_75cl_equivalent),
            "per bottle",
        ),
        ("Contribution margin 75cl", Cell::amount(result.contribution_margin_75cl), "per bottle"),
        ("Breakeven bottles 75cl", Cell::count(result.breakeven_bottles_75cl), "bottles"),
        ("Breakeven liters", Cell::amount(result.breakeven_liters), "L"),
    ];

    let mut table = SheetTable::new(RESULTS_SHEET, &RESULTS_COLUMNS);
    for (metric, value, unit) in metrics {
        table.rows.push(vec![Cell::text(metric), value, Cell::text(unit)]);
    }
    table
}

fn build_breakdown_table(result: &EconResult) -> SheetTable {
    let breakdown = &result.breakdown;
    let total = result.total_cogs;
    let categories = [
        ("Juice", breakdown.juice),
        ("Yeast", breakdown.yeast),
        ("Packaging", breakdown.packaging),
        ("Labor", breakdown.labor),
        ("Overhead", breakdown.overhead),
        ("Total", total),
    ];

    let mut table = SheetTable::new(BREAKDOWN_SHEET, &BREAKDOWN_COLUMNS);
    for (category, amount) in categories {
        table.rows.push(vec![
            Cell::text(category),
            Cell::amount(amount),
            Cell::amount(ratio(amount, total) * 100.0),
        ]);
    }
    table
}

/// Formats `value` with a fixed number of decimal places.
pub fn format_amount(value: f64, decimals: u8) -> String {
    format!("{value:.prec$}", prec = usize::from(decimals))
}
