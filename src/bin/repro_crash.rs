//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --features repro --bin repro_crash -- <crash_file>
//!
//! Set `RUST_LOG=rangekit=trace` to see tree construction and ignored
//! updates alongside the replayed operations.

#[path = "common/harness.rs"]
mod harness;

use std::fs;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use harness::{FuzzOp, Harness};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        process::exit(1);
    }
    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            process::exit(1);
        }
    };

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let Some((mut harness, mut remaining)) = Harness::from_bytes(&data) else {
        eprintln!("Empty input");
        return;
    };

    let mut op_num = 0;
    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;
        op_num += 1;
        info!(op_num, ?op, "replaying");
        harness.step(op);
    }
    harness.finish();

    eprintln!("Replayed {} ops without a failure", op_num);
}
