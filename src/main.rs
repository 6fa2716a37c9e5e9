//! qrgen command-line entrypoint

use clap::Parser;
use qrgen::{LoggingOptions, QrConfig, RunOutcome, config, generate, logging};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "qrgen", version, about = "Generate a QR code.")]
struct Cli {
    /// URL for the QR code (defaults to QR_DATA_URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

fn main() -> ExitCode {
    println!("Starting QR Code generation script...");

    // Loaded before anything reads the environment; existing variables win.
    match config::load_dotenv() {
        Ok(Some(path)) => println!("Environment variables loaded from {}", path.display()),
        Ok(None) => println!("Environment variables loaded"),
        Err(err) => eprintln!("{err}"),
    }

    let config = QrConfig::from_env();
    println!("URL: {}", config.target_url);
    println!("Directory: {}", config.output_dir.display());
    println!("Filename: {}", config.output_filename);
    println!(
        "Colors - Fill: {}, Back: {}",
        config.fill_color, config.back_color
    );

    if let Err(err) = logging::init(&LoggingOptions::from_env()) {
        eprintln!("{err}");
    }
    println!("Entering main function");

    let cli = Cli::parse();
    let config = config.with_url_override(cli.url);
    println!("Using URL: {}", config.target_url);

    match generate::run(&config) {
        Ok(RunOutcome::Saved(_)) => ExitCode::SUCCESS,
        Ok(RunOutcome::Skipped(reason)) => {
            tracing::debug!(%reason, "QR code generation skipped");
            ExitCode::SUCCESS
        }
        // Only the output directory setup can fail the run.
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
