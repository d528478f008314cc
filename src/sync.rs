use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::econ::calc_economics;
use crate::error::Result;
use crate::flatten::build_workbook;
use crate::io::excel_read;
use crate::io::excel_write;
use crate::model::{EconInput, EconResult, Scenario, validate, validate_scenario};

/// Validates `input`, computes its economics, and writes the Inputs, Results,
/// and Breakdown sheets to `output`. Returns the computed result.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn export_to_excel(input: &EconInput, output: &Path) -> Result<EconResult> {
    let input = validate(*input)?;
    let result = calc_economics(&input);
    let workbook = build_workbook(&input, &result);
    debug!(sheet_count = workbook.tables.len(), "workbook constructed");
    excel_write::write_workbook(output, &workbook)?;
    info!(total_cogs = result.total_cogs, "economics workbook written");
    Ok(result)
}

/// Rebuilds a validated input from the Inputs sheet of a workbook. Nothing is
/// returned unless the whole input parses and validates.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn import_from_excel(input: &Path) -> Result<EconInput> {
    let econ_input = excel_read::read_input(input)?;
    info!("economics input imported from workbook");
    Ok(econ_input)
}

/// Same as [`import_from_excel`], for an uploaded workbook held in memory.
#[instrument(level = "info", skip_all, fields(bytes = bytes.len()))]
pub fn import_from_excel_bytes(bytes: &[u8]) -> Result<EconInput> {
    let econ_input = excel_read::read_input_from_bytes(bytes)?;
    info!("economics input imported from workbook");
    Ok(econ_input)
}

/// Synchronises a JSON input document into an economics workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn json_to_excel(input: &Path, output: &Path) -> Result<EconResult> {
    let econ_input = load_input(input)?;
    export_to_excel(&econ_input, output)
}

/// Synchronises an economics workbook back into a JSON input document.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn excel_to_json(input: &Path, output: &Path) -> Result<EconInput> {
    let econ_input = excel_read::read_input(input)?;
    let json_string = serde_json::to_string_pretty(&econ_input)?;
    fs::write(output, json_string)?;
    Ok(econ_input)
}

/// Loads and validates a JSON input document.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_input(path: &Path) -> Result<EconInput> {
    let source = fs::read_to_string(path)?;
    let econ_input: EconInput = serde_json::from_str(&source)?;
    Ok(validate(econ_input)?)
}

/// Loads and validates a JSON array of scenarios. The first scenario with an
/// out-of-range multiplier or inflation rejects the whole file.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let source = fs::read_to_string(path)?;
    let scenarios = serde_json::from_str::<Vec<Scenario>>(&source)?
        .into_iter()
        .map(validate_scenario)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(scenario_count = scenarios.len(), "scenarios loaded");
    Ok(scenarios)
}
