use std::path::PathBuf;

use clap::Parser;
use program_forge::config::Config;
use program_forge::io::{RemoteSpreadsheet, SheetSource, WorkbookFile};
use program_forge::publish;
use program_forge::render::HtmlRenderer;
use program_forge::{Result, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(output) = cli.output {
        config.output.directory = output;
    }

    let source: Box<dyn SheetSource> = match cli.workbook {
        Some(path) => Box::new(WorkbookFile::new(path)),
        None => Box::new(RemoteSpreadsheet::from_config(&config.source)),
    };

    let report = publish::publish(source.as_ref(), &config, &HtmlRenderer)?;
    info!(
        rows = report.row_count,
        tracks = report.track_count,
        files = report.written.len(),
        "program written"
    );
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render a conference program, legend, and track slides from a schedule spreadsheet."
)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read a locally exported .xlsx workbook instead of the remote spreadsheet.
    #[arg(long)]
    workbook: Option<PathBuf>,

    /// Output directory, overriding the configured one.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}
