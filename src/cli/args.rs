use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-anomaly")]
#[command(about = "Simulated forecast versus ten-year history, with anomaly detection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse one date for one location
    Analyze {
        #[arg(short, long, help = "Target date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(short, long, help = "Time of day (HH:MM) [default: from settings]")]
        time: Option<String>,

        #[arg(short, long, help = "Location label [default: from settings]")]
        location: Option<String>,

        #[arg(long, help = "Seed for reproducible output")]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        #[arg(long, default_value = "0", help = "Artificial delay before results (ms)")]
        delay_ms: u64,
    },

    /// Analyse one date for several locations in parallel
    Batch {
        #[arg(short, long, help = "Target date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(short, long, help = "Time of day (HH:MM) [default: from settings]")]
        time: Option<String>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Comma-separated locations [default: all built-in cities]"
        )]
        locations: Vec<String>,

        #[arg(long, help = "Base seed; location i uses seed + i")]
        seed: Option<u64>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the built-in location labels
    Locations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "weather-anomaly",
            "analyze",
            "--date",
            "2024-07-15",
            "--location",
            "Munich",
            "--seed",
            "4",
            "--format",
            "json",
        ]);

        match cli.command {
            Commands::Analyze {
                date,
                location,
                seed,
                format,
                delay_ms,
                time,
            } => {
                assert_eq!(date.as_deref(), Some("2024-07-15"));
                assert_eq!(location.as_deref(), Some("Munich"));
                assert_eq!(seed, Some(4));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(delay_ms, 0);
                assert!(time.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_batch_locations() {
        let cli = Cli::parse_from([
            "weather-anomaly",
            "--verbose",
            "batch",
            "-d",
            "2024-01-05",
            "--locations",
            "Berlin,Hamburg,Essen",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Batch { locations, .. } => {
                assert_eq!(locations, vec!["Berlin", "Hamburg", "Essen"]);
            }
            _ => panic!("expected batch"),
        }
    }
}
