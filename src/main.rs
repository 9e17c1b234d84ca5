// Batch entry point: analyse one workbook and print the report as JSON.
//
// Usage:
//   inventory-analytics <workbook.xlsx|primary.csv> [--config file.json] [--pretty] [--json-logs]

use anyhow::{bail, Context, Result};
use inventory_analytics::importer::read_csv_sheet;
use inventory_analytics::logging::{self, LogFormat};
use inventory_analytics::{
    runway_days, AnalysisConfig, AnalysisPipeline, SheetKind, Workbook, WorkbookReader,
};
use std::path::{Path, PathBuf};

struct CliArgs {
    workbook: PathBuf,
    config: Option<PathBuf>,
    pretty: bool,
    log_format: LogFormat,
}

fn parse_args() -> Result<CliArgs> {
    let mut workbook = None;
    let mut config = None;
    let mut pretty = false;
    let mut log_format = LogFormat::Text;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a file path")?;
                config = Some(PathBuf::from(path));
            }
            "--pretty" => pretty = true,
            "--json-logs" => log_format = LogFormat::Json,
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            path => {
                if workbook.is_some() {
                    bail!("only one workbook path is accepted");
                }
                workbook = Some(PathBuf::from(path));
            }
        }
    }

    let workbook = workbook.context(
        "usage: inventory-analytics <workbook> [--config file.json] [--pretty] [--json-logs]",
    )?;
    Ok(CliArgs {
        workbook,
        config,
        pretty,
        log_format,
    })
}

fn load_workbook(path: &Path, config: &AnalysisConfig) -> Result<Workbook> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        let sheet = read_csv_sheet(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Workbook::new().with_sheet(SheetKind::Primary, sheet));
    }

    WorkbookReader::new(&config.sheet_aliases)
        .read(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let args = parse_args()?;
    logging::init_with_format(args.log_format);

    tracing::info!(version = inventory_analytics::VERSION, "inventory analytics");

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    let workbook = load_workbook(&args.workbook, &config)?;

    let sentinel = config.days_of_stock_sentinel;
    let pipeline = AnalysisPipeline::new(config);
    let report = pipeline
        .run(&workbook, |record| Some(runway_days(record, sentinel)))
        .context("analysis failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
