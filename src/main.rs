use std::path::{Path, PathBuf};

use cider_econ::econ::{
    calc_economics, calc_variance, find_scenario, price_sensitivity, scenario_input,
};
use cider_econ::flatten::format_amount;
use cider_econ::model::{
    DEFAULT_ECON_INPUT, DEFAULT_SCENARIOS, EconInput, Scenario, SensitivityRange,
};
use cider_econ::{Result, ToolError, logging, sync};
use clap::{Parser, Subcommand};
use serde::Serialize;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Calc(args) => execute_calc(args),
        Command::Scenarios(args) => execute_scenarios(args),
        Command::Sensitivity(args) => execute_sensitivity(args),
        Command::Variance(args) => execute_variance(args),
        Command::Export(args) => execute_export(args),
        Command::Import(args) => execute_import(args),
        Command::Defaults => print_json(&DEFAULT_ECON_INPUT),
    }
}

fn execute_calc(args: CalcArgs) -> Result<()> {
    let mut input = resolve_input(args.input.as_deref())?;
    if let Some(name) = &args.scenario {
        let scenarios = resolve_scenarios(args.scenarios.as_deref())?;
        input = scenario_input(&input, find_scenario(&scenarios, name)?)?;
    }
    print_json(&calc_economics(&input))
}

fn execute_scenarios(args: ScenarioArgs) -> Result<()> {
    let base = resolve_input(args.input.as_deref())?;
    let scenarios = resolve_scenarios(args.scenarios.as_deref())?;

    println!("scenario\tcogs/L\tmargin % 75cl\tprofit\tbreakeven 75cl");
    for scenario in &scenarios {
        let result = calc_economics(&scenario_input(&base, scenario)?);
        println!(
            "{}\t{}\t{}\t{}\t{}",
            scenario.name,
            format_amount(result.cogs_per_liter, 2),
            format_amount(result.gross_margin_pct_75cl, 2),
            format_amount(result.total_profit, 2),
            result.breakeven_bottles_75cl,
        );
    }
    Ok(())
}

fn execute_sensitivity(args: SensitivityArgs) -> Result<()> {
    let input = resolve_input(args.input.as_deref())?;
    let range = SensitivityRange {
        min: args.min,
        max: args.max,
        steps: args.steps,
    };

    println!("price\tmargin\tmargin %\trevenue");
    for point in price_sensitivity(&input, range)? {
        println!(
            "{}\t{}\t{}\t{}",
            format_amount(point.price, 2),
            format_amount(point.margin, 2),
            format_amount(point.margin_pct, 2),
            format_amount(point.revenue, 2),
        );
    }
    Ok(())
}

fn execute_variance(args: VarianceArgs) -> Result<()> {
    let planned = calc_economics(&load_existing_input(&args.planned)?);
    let actual = calc_economics(&load_existing_input(&args.actual)?);
    print_json(&calc_variance(&planned, &actual))
}

fn execute_export(args: ExportArgs) -> Result<()> {
    let input = resolve_input(args.input.as_deref())?;
    sync::export_to_excel(&input, &args.output)?;
    Ok(())
}

fn execute_import(args: ImportArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }
    match &args.output {
        Some(output) => sync::excel_to_json(&args.input, output).map(|_| ()),
        None => print_json(&sync::import_from_excel(&args.input)?),
    }
}

fn resolve_input(path: Option<&Path>) -> Result<EconInput> {
    match path {
        Some(path) => load_existing_input(path),
        None => Ok(DEFAULT_ECON_INPUT),
    }
}

fn load_existing_input(path: &Path) -> Result<EconInput> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    sync::load_input(path)
}

fn resolve_scenarios(path: Option<&Path>) -> Result<Vec<Scenario>> {
    match path {
        Some(path) if !path.exists() => Err(ToolError::MissingInput(path.to_path_buf())),
        Some(path) => sync::load_scenarios(path),
        None => Ok(DEFAULT_SCENARIOS.to_vec()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Cost of goods, margin, and breakeven calculator for cider batches."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the economics of one batch.
    Calc(CalcArgs),
    /// Compare the batch across every scenario.
    Scenarios(ScenarioArgs),
    /// Sweep the 75cl price and report margins.
    Sensitivity(SensitivityArgs),
    /// Compare planned and actual economics of the same batch.
    Variance(VarianceArgs),
    /// Write the batch economics to an Excel workbook.
    Export(ExportArgs),
    /// Read a batch input back from an Excel workbook.
    Import(ImportArgs),
    /// Print the built-in reference input.
    Defaults,
}

#[derive(clap::Args)]
struct CalcArgs {
    /// JSON input file. Uses the built-in reference batch when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Name of the scenario to apply before calculating.
    #[arg(long)]
    scenario: Option<String>,

    /// JSON file holding the scenario list.
    #[arg(long)]
    scenarios: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ScenarioArgs {
    /// JSON input file. Uses the built-in reference batch when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON file holding the scenario list.
    #[arg(long)]
    scenarios: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SensitivityArgs {
    /// JSON input file. Uses the built-in reference batch when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Lowest 75cl price to sample.
    #[arg(long)]
    min: f64,

    /// Highest 75cl price to sample.
    #[arg(long)]
    max: f64,

    /// Number of intervals between min and max.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(clap::Args)]
struct VarianceArgs {
    /// JSON input describing the planned batch.
    #[arg(long)]
    planned: PathBuf,

    /// JSON input describing the batch as produced.
    #[arg(long)]
    actual: PathBuf,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON input file. Uses the built-in reference batch when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Workbook to write.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Workbook to read.
    #[arg(long)]
    input: PathBuf,

    /// JSON file to write. Prints to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}
