//! snmp-poll: Retrieve one snapshot from a printer or host.
//!
//! Part of the snmp-device CLI utilities.

use clap::Parser;
use snmp_device::cli::args::{CommonArgs, DeviceTypeArg, OutputArgs};
use snmp_device::cli::output::{OutputContext, write_error};
use snmp_device::{Client, DeviceEndpoint, Snapshot, retrieve, schema_for};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Instant;

/// Poll one SNMP agent and print what its device schema describes.
#[derive(Debug, Parser)]
#[command(name = "snmp-poll", version, about)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Device schema to apply: printer or computer.
    #[arg(short = 'T', long = "type", default_value = "printer")]
    device_type: DeviceTypeArg,

    /// Agent hostname or IP address.
    #[arg(value_name = "HOST")]
    host: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    args.output.init_tracing();

    let endpoint = match args.common.endpoint(&args.host) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let result = run_poll(&endpoint, &args).await;
    let elapsed = start.elapsed();

    match result {
        Ok((target, snapshot)) => {
            let output_ctx = OutputContext {
                format: args.output.format,
                show_timing: args.output.timing,
            };
            if let Err(e) = output_ctx.write_snapshot(target, &snapshot, elapsed) {
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

async fn run_poll(
    endpoint: &DeviceEndpoint,
    args: &Args,
) -> snmp_device::Result<(SocketAddr, Snapshot)> {
    let client = Client::connect(endpoint).await?;
    let snapshot = retrieve(&client, &schema_for(args.device_type.into())).await?;
    Ok((client.peer_addr(), snapshot))
}
