use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use superstore_report::builder;
use superstore_report::dataset::{self, DEFAULT_DATA_PATH};
use superstore_report::insights::Insights;
use superstore_report::metrics::{ModelMetrics, DEFAULT_METRICS_PATH};
use superstore_report::narrative;

/// Generates the Superstore final report PDF from the cleaned dataset.
///
/// All paths default to the standard project layout, so a bare invocation
/// from the project root reads `data/processed/cleaned_superstore_data.csv`
/// and writes `results/reports/final_report.pdf`.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the cleaned dataset CSV.
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Path the report PDF is written to.
    #[arg(long, default_value = "results/reports/final_report.pdf")]
    output: PathBuf,

    /// Optional TOML file overriding the model evaluation metrics.
    #[arg(long, default_value = DEFAULT_METRICS_PATH)]
    metrics: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let df = dataset::load_csv(&cli.data)?;
    let insights = Insights::from_dataframe(&df)?;
    let metrics = ModelMetrics::load_or_default(&cli.metrics)?;
    let report = narrative::compose(&insights, &metrics);
    builder::write_report(&report, &cli.output)?;
    println!("Final report saved to: {}", cli.output.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
