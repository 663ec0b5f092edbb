//! snmp-discover: Find SNMP agents on the local network.
//!
//! Part of the snmp-device CLI utilities.

use clap::Parser;
use snmp_device::cli::args::{CommonArgs, DiscoverArgs, OutputArgs};
use snmp_device::cli::output::{OutputContext, write_error};
use snmp_device::discover;
use std::process::ExitCode;
use std::time::Instant;

/// Broadcast one sysDescr request and list the agents that answer.
#[derive(Debug, Parser)]
#[command(name = "snmp-discover", version, about)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    discover: DiscoverArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let config = match args.discover.config(&args.common) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    match discover(config).await {
        Ok(outcome) => {
            let output_ctx = OutputContext {
                format: args.output.format,
                show_timing: args.output.timing,
            };
            if let Err(e) = output_ctx.write_discovery(&outcome, start.elapsed()) {
                eprintln!("Error writing output: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            write_error(&e);
            ExitCode::FAILURE
        }
    }
}
