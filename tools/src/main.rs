//! rewards-runner: headless front end for the rewards core.
//!
//! Usage:
//!   rewards-runner --data data/transactions.json --months 3
//!   rewards-runner --data data/transactions.json --ipc-mode

use std::env;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use rewards_core::{error::RewardsError, service::RewardsService, store::DataStore};
use serde_json::json;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    CustomerPoints {
        months_back: Option<u32>,
    },
    CustomerTransactions {
        customer_id: String,
        months_back: Option<u32>,
    },
    Transactions,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data = args
        .windows(2)
        .find(|w| w[0] == "--data")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "data/transactions.json".to_string());
    let months = parse_arg(&args, "--months", 3u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let service = RewardsService::new(DataStore::open(&data));

    if ipc_mode {
        run_ipc_loop(&service)
    } else {
        print_summary(&service, months)
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

/// One-shot mode: print every customer's rollup and exit.
fn print_summary(service: &RewardsService, months: u32) -> Result<()> {
    let summaries = service.customer_points(Some(months))?;

    println!("Customer reward points (last {months} months)");
    println!();
    for summary in &summaries {
        println!(
            "  {:<24} {:>7} pts   ${:>10.2}",
            summary.name, summary.total_points, summary.total_amount_spent
        );
        for (month, entry) in &summary.monthly_points {
            println!(
                "      {month}  {:>5} pts   ${:>10.2}",
                entry.points, entry.amount_spent
            );
        }
    }
    println!();
    println!("  {} customers", summaries.len());
    Ok(())
}

/// IPC mode: one JSON command per stdin line, one JSON reply per stdout
/// line, until `quit` or EOF.
fn run_ipc_loop(service: &RewardsService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command: IpcCommand = match serde_json::from_str(&line) {
            Ok(command) => command,
            Err(e) => {
                let reply = json!({
                    "success": false,
                    "message": "Unrecognized command",
                    "error": e.to_string(),
                });
                writeln!(stdout, "{reply}")?;
                stdout.flush()?;
                continue;
            }
        };

        let reply = match command {
            IpcCommand::CustomerPoints { months_back } => {
                match service.customer_points(months_back) {
                    Ok(data) => json!({ "success": true, "data": data }),
                    Err(e) => failure(e),
                }
            }
            IpcCommand::CustomerTransactions {
                customer_id,
                months_back,
            } => match service.customer_transactions(&customer_id, months_back) {
                Ok(data) => json!({ "success": true, "data": data }),
                Err(e @ RewardsError::CustomerNotFound { .. }) => json!({
                    "success": false,
                    "message": e.to_string(),
                    "notFound": true,
                }),
                Err(e) => failure(e),
            },
            IpcCommand::Transactions => match service.all_transactions() {
                Ok(data) => {
                    let count = data.len();
                    json!({
                        "success": true,
                        "data": data,
                        "meta": { "count": count },
                    })
                }
                Err(e) => failure(e),
            },
            IpcCommand::Quit => break,
        };

        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }

    Ok(())
}

fn failure(error: RewardsError) -> serde_json::Value {
    log::error!("request failed: {error}");
    json!({
        "success": false,
        "message": "Error processing request",
        "error": error.to_string(),
    })
}
