//! grid-export - print grids from a JSON job file to PDF or XLSX

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::JobFile;
use std::path::PathBuf;
use text_engine::{FixedMetricsProvider, FontMetricsProvider, SystemFontProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grid-export")]
#[command(version)]
#[command(about = "Export tabular grids as tagged PDF or XLSX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct JobArgs {
    /// JSON job file
    #[arg(long, value_name = "FILE")]
    job: PathBuf,

    /// Output file, overwritten if present
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Measure with fixed synthetic metrics instead of installed fonts
    #[arg(long)]
    fixed_metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the job's grids as a PDF document
    Pdf(JobArgs),
    /// Export the job's grids as an XLSX workbook
    Xlsx(JobArgs),
}

fn provider(fixed_metrics: bool) -> Box<dyn FontMetricsProvider> {
    if fixed_metrics {
        Box::new(FixedMetricsProvider::new())
    } else {
        Box::new(SystemFontProvider::new())
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Pdf(args) => {
            let job = JobFile::load(&args.job)?;
            let fonts = provider(args.fixed_metrics);
            export::export_pdf(&args.output, &job.grids, &job.page_setup, &*fonts, &job.pdf)
                .with_context(|| format!("PDF export to {} failed", args.output.display()))?;
        }
        Commands::Xlsx(args) => {
            let job = JobFile::load(&args.job)?;
            let fonts = provider(args.fixed_metrics);
            export::export_xlsx(&args.output, &job.grids, &job.page_setup, &*fonts, &job.xlsx)
                .with_context(|| format!("XLSX export to {} failed", args.output.display()))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    run(Cli::parse())
}
