//! Card validation CLI
//!
//! Command-line stand-in for the card-entry form that normally drives the
//! engine: feeds each input through the validation pipeline and prints the
//! structured result as one JSON object per line. Exits non-zero when any
//! input fails the checksum or length policy.

use std::io::{self, BufRead};

use anyhow::Result;
use card_engine::validate;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut all_pass = true;
    if args.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            all_pass &= report(&line)?;
        }
    } else {
        for arg in &args {
            all_pass &= report(arg)?;
        }
    }

    if !all_pass {
        std::process::exit(1);
    }
    Ok(())
}

fn report(raw: &str) -> Result<bool> {
    let result = validate(raw);
    println!("{}", serde_json::to_string(&result)?);
    Ok(result.passes())
}
