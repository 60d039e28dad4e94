use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::{ForecastError, Result};
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::processors::{AnalysisPipeline, BatchAnalyzer};
use crate::simulation::source_for;
use crate::utils::locations::{is_known_location, GERMAN_CITIES};
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            date,
            time,
            location,
            seed,
            format,
            delay_ms,
        } => {
            let time = time.unwrap_or_else(|| settings.default_time.clone());
            let location = location.unwrap_or_else(|| settings.default_location.clone());

            let request = match AnalysisRequest::parse(date.as_deref(), &time, &location) {
                Err(e) if e.is_missing_input() => {
                    println!("No date supplied - nothing to analyse. Pass --date YYYY-MM-DD.");
                    return Ok(());
                }
                other => other?,
            };

            if !is_known_location(&request.location) {
                warn!(
                    location = %request.location,
                    "Not a built-in location; it is used as a label only"
                );
            }

            if delay_ms > 0 {
                let progress = ProgressReporter::new_spinner(
                    "Fetching weather data and analyzing patterns...",
                    format == OutputFormat::Json,
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                progress.finish_and_clear();
            }

            let thresholds = settings.thresholds;
            let result = tokio::task::spawn_blocking(move || {
                AnalysisPipeline::new(source_for(seed, 0))
                    .with_thresholds(thresholds)
                    .run(&request)
            })
            .await?
            .map_err(report_defect)?;

            print_result(&result, format)?;
        }

        Commands::Batch {
            date,
            time,
            locations,
            seed,
            max_workers,
            format,
        } => {
            let time = time.unwrap_or_else(|| settings.default_time.clone());
            let locations = if locations.is_empty() {
                GERMAN_CITIES.iter().map(|c| c.to_string()).collect()
            } else {
                locations
            };

            // Parse once against the first label; per-location validation
            // happens inside the pipeline.
            let request = match AnalysisRequest::parse(date.as_deref(), &time, &locations[0]) {
                Err(e) if e.is_missing_input() => {
                    println!("No date supplied - nothing to analyse. Pass --date YYYY-MM-DD.");
                    return Ok(());
                }
                other => other?,
            };

            let progress = ProgressReporter::new(
                locations.len() as u64,
                "Analysing locations...",
                format == OutputFormat::Json,
            );
            let analyzer = BatchAnalyzer::new(max_workers)
                .with_seed(seed)
                .with_thresholds(settings.thresholds);

            let results = tokio::task::spawn_blocking(move || {
                let results = analyzer.analyze_locations(
                    request.date,
                    request.time,
                    &locations,
                    Some(&progress),
                );
                progress.finish_and_clear();
                results
            })
            .await?
            .map_err(report_defect)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Text => {
                    println!(
                        "Batch analysis for {} at {}",
                        request.date,
                        request.time.format("%H:%M")
                    );
                    for result in &results {
                        println!("{}", result.headline());
                    }
                    println!(
                        "\n{}/{} locations with anomalies",
                        results.iter().filter(|r| r.has_anomalies()).count(),
                        results.len()
                    );
                }
            }
        }

        Commands::Locations => {
            for city in GERMAN_CITIES {
                println!("{}", city);
            }
        }
    }

    Ok(())
}

fn print_result(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => println!("{}", result.summary()),
    }
    Ok(())
}

fn report_defect(err: ForecastError) -> ForecastError {
    if err.is_defect() {
        error!(error = %err, "Analysis invariant violated");
    }
    err
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let outcome = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    outcome.map_err(|e| ForecastError::Config(format!("Failed to initialise logging: {}", e)))
}
