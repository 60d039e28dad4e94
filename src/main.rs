use clap::Parser;
use weather_anomaly::cli::{run, Cli};
use weather_anomaly::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
