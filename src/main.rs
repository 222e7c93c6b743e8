use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use pptxsim::config::Config;
use pptxsim::error::AnalysisError;
use pptxsim::pipeline::analyze;

/// pptxsim: pairwise text similarity for PowerPoint submissions.
///
/// Compares every .pptx file in a folder against every other one, flags
/// suspiciously similar pairs, and assigns 0-5 deduction points per file.
/// Writes pptx_similarity.xlsx, pptx_similarity.csv and similarity_report.txt.
#[derive(Parser)]
#[command(name = "pptxsim", version, about)]
struct Cli {
    /// Folder containing the .pptx files to compare (not searched recursively)
    #[arg(default_value = ".")]
    folder: PathBuf,

    /// Where to write the output files (default: PPTXSIM_OUTPUT_DIR or ".")
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip similarity_report.txt and only write the matrix exports
    #[arg(long)]
    no_report: bool,

    /// Ignore common English words when comparing
    #[arg(long)]
    stop_words: bool,

    /// Print the analysis as JSON instead of the colored summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pptxsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_report {
        config.emit_report = false;
    }
    if cli.stop_words {
        config.stop_words = true;
    }

    info!(
        folder = %cli.folder.display(),
        output_dir = %config.output_dir.display(),
        emit_report = config.emit_report,
        "Starting similarity run"
    );

    let options = config.analysis_options(cli.json);
    let outcome = match analyze::run(&cli.folder, &options) {
        Ok(outcome) => outcome,
        Err(e) => match e.downcast_ref::<AnalysisError>() {
            // Nothing to compare: report and exit normally, no files written
            Some(AnalysisError::NotEnoughDocuments(_)) | Some(AnalysisError::EmptyCorpus) => {
                warn!(error = %e, "Run aborted");
                println!("Not enough valid PPTX files to compare.");
                return Ok(());
            }
            Some(err) => {
                warn!(error = %err, "Run aborted");
                println!("Error in similarity calculation: {err}");
                return Ok(());
            }
            // Could not even list the folder
            None => return Err(e),
        },
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.analysis)?);
        return Ok(());
    }

    pptxsim::output::terminal::display_analysis(&outcome.analysis);

    println!("\n{}", "Output files:".bold());
    for path in &outcome.written {
        println!("  {}", path.display());
    }

    Ok(())
}
