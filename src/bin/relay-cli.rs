use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for curl-relay", long_about = None)]
struct Cli {
    /// Base URL of the running relay.
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Relay endpoint path.
    #[arg(long, default_value = "/curl")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay one HTTP call through the server
    Send {
        /// Target URL
        target: String,
        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
    /// Show journal counters
    Status,
    /// List every journaled call
    Entries,
    /// Show one journaled call
    Entry { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Send { target, method, headers } => {
            let headers = parse_headers(&headers)?;
            let body = json!({
                "method": method,
                "url": target,
                "headers": headers,
            });
            client
                .post(format!("{}{}", cli.url, cli.path))
                .json(&body)
                .send()
                .await?
        }
        Commands::Status => client.get(format!("{}/admin/status", cli.url)).send().await?,
        Commands::Entries => client.get(format!("{}/admin/entries", cli.url)).send().await?,
        Commands::Entry { id } => {
            client
                .get(format!("{}/admin/entries/{}", cli.url, id))
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn parse_headers(raw: &[String]) -> Result<BTreeMap<String, String>, String> {
    raw.iter()
        .map(|h| {
            h.split_once(':')
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| format!("header {:?} is not in \"Name: value\" form", h))
        })
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprint!("{}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
