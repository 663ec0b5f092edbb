//! Rendering of snapshots and discovery results for the CLI tools.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;

use super::args::OutputFormat;
use crate::discovery::{DiscoveryOutcome, discovered_label};
use crate::error::Error;
use crate::presentation;
use crate::snapshot::{GroupResult, Record, Snapshot};

/// Print an error to stderr in the tools' common format.
pub fn write_error(err: &Error) {
    eprintln!("Error: {}", err);
}

/// Output settings for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    pub format: OutputFormat,
    pub show_timing: bool,
}

impl OutputContext {
    /// Write a polled snapshot to stdout.
    pub fn write_snapshot(
        &self,
        target: SocketAddr,
        snapshot: &Snapshot,
        elapsed: Duration,
    ) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.format {
            OutputFormat::Human => write_human(&mut out, target, snapshot)?,
            OutputFormat::Raw => write_raw(&mut out, snapshot)?,
        }
        if self.show_timing {
            writeln!(out, "# elapsed: {:.1}ms", elapsed.as_secs_f64() * 1000.0)?;
        }
        Ok(())
    }

    /// Write discovery results to stdout, one agent per line.
    pub fn write_discovery(&self, outcome: &DiscoveryOutcome, elapsed: Duration) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for (addr, description) in &outcome.results {
            match self.format {
                OutputFormat::Human => writeln!(out, "{}", discovered_label(*addr, description))?,
                OutputFormat::Raw => writeln!(out, "{}\t{}", addr.ip(), description.trim())?,
            }
        }
        if self.show_timing {
            writeln!(
                out,
                "# {} agent(s), ended by {} after {:.1}ms",
                outcome.results.len(),
                outcome.reason,
                elapsed.as_secs_f64() * 1000.0
            )?;
        }
        Ok(())
    }
}

fn write_human(out: &mut impl Write, target: SocketAddr, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out, "{} {}", snapshot.device_type, target)?;
    let identity = [
        ("manufacturer", presentation::manufacturer(snapshot)),
        ("model", presentation::model(snapshot)),
        ("sw_version", presentation::sw_version(snapshot).map(str::to_owned)),
    ];
    for (label, value) in identity {
        if let Some(value) = value {
            writeln!(out, "  {:<14}{}", label, value)?;
        }
    }
    if let Some(status) = presentation::printer_status(snapshot) {
        writeln!(out, "  {:<14}{}", "status", status)?;
        let flags = presentation::error_flags(snapshot);
        if !flags.is_empty() {
            writeln!(out, "  {:<14}{}", "errors", flags.join(", "))?;
        }
    }
    let connections = presentation::connections(snapshot);
    if !connections.is_empty() {
        writeln!(out, "  {:<14}{}", "connections", connections.join(", "))?;
    }

    let colorants = snapshot.table("colorants");
    for row in snapshot.table("supplies").into_iter().flat_map(|t| t.values()) {
        let (Some(name), Some(level)) = (
            presentation::supply_name(row, colorants),
            presentation::row_level(row),
        ) else {
            continue;
        };
        let unit = level.unit.map(|u| format!(" {u}")).unwrap_or_default();
        writeln!(out, "  supply        {}: {}/{}{}", name, level.level, level.capacity, unit)?;
    }

    for (name, group) in &snapshot.groups {
        writeln!(out)?;
        writeln!(out, "[{}]", name)?;
        match group {
            GroupResult::Scalar(record) => write_record(out, "  ", record)?,
            GroupResult::Table(rows) => {
                for (index, record) in rows {
                    writeln!(out, "  {}:", index)?;
                    write_record(out, "    ", record)?;
                }
            }
        }
    }
    Ok(())
}

fn write_record(out: &mut impl Write, indent: &str, record: &Record) -> io::Result<()> {
    for (field, value) in record {
        writeln!(out, "{}{} = {}", indent, field, value)?;
    }
    Ok(())
}

fn write_raw(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    for (name, group) in &snapshot.groups {
        match group {
            GroupResult::Scalar(record) => {
                for (field, value) in record {
                    writeln!(out, "{}\t\t{}\t{}", name, field, value)?;
                }
            }
            GroupResult::Table(rows) => {
                for (index, record) in rows {
                    for (field, value) in record {
                        writeln!(out, "{}\t{}\t{}\t{}", name, index, field, value)?;
                    }
                }
            }
        }
    }
    for (field, value) in &snapshot.additional_info {
        writeln!(out, "additional_info\t\t{}\t{}", field, value)?;
    }
    Ok(())
}
