use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_LENGTH;

#[derive(Parser)]
#[command(name = "wirsa-cli")]
#[command(about = "Query a running WiRSa update service the way the firmware does", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(long, default_value = "/wirsa-v3.php")]
    version_path: String,

    #[arg(long, default_value = "/wirsa-bin-v3.php")]
    binary_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the latest release tag
    Version,
    /// Compare the latest release against a running build
    Check {
        /// Build tag currently installed on the device
        #[arg(short, long)]
        current: String,
    },
    /// Download the latest firmware binary
    Download {
        #[arg(short, long, default_value = "wirsa.bin")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Version => {
            let latest = fetch_version(&client, base, &cli.version_path).await?;
            println!("{}", latest);
        }
        Commands::Check { current } => {
            let latest = fetch_version(&client, base, &cli.version_path).await?;
            println!("Latest Version: {}, Device Version: {}", latest, current);
            if latest != current {
                println!("WiRSa firmware update available.");
            } else {
                println!("Your WiRSa is running the latest firmware version.");
            }
        }
        Commands::Download { output } => {
            let res = client.get(format!("{}{}", base, cli.binary_path)).send().await?;
            let status = res.status();
            if !status.is_success() {
                return Err(format!("update service returned status {}", status).into());
            }

            let expected = res
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<usize>().ok());
            let bin = res.bytes().await?;
            if let Some(expected) = expected {
                if expected != bin.len() {
                    return Err(format!(
                        "truncated download: expected {} bytes, got {}",
                        expected,
                        bin.len()
                    )
                    .into());
                }
            }

            tokio::fs::write(&output, &bin).await?;
            println!("Wrote {} bytes to {}", bin.len(), output.display());
        }
    }

    Ok(())
}

async fn fetch_version(
    client: &reqwest::Client,
    base: &str,
    path: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let res = client.get(format!("{}{}", base, path)).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(format!("Firmware version check failed: status {}", status).into());
    }
    Ok(res.text().await?)
}
