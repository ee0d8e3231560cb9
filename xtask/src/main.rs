use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace task runner")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run the live-device conformance suites, single-threaded
    E2e {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        #[arg(long)]
        pin: Option<String>,
    },
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::E2e { host, port, pin } => run_e2e(host, port, pin),
    }
}

fn run_e2e(host: Option<String>, port: Option<u16>, pin: Option<String>) -> Result<()> {
    let mut cmd = Command::new(env!("CARGO"));
    // The device is shared mutable state; the suites must not interleave.
    cmd.args(["test", "--package", "test-support", "--", "--test-threads=1"]);
    cmd.env("TSENSE_DEVICE_E2E", "1");
    if let Some(host) = host {
        cmd.env("TSENSE_HOST", host);
    }
    if let Some(port) = port {
        cmd.env("TSENSE_PORT", port.to_string());
    }
    if let Some(pin) = pin {
        cmd.env("TSENSE_PIN", pin);
    }

    let status = cmd.status().context("failed to spawn cargo test")?;
    if !status.success() {
        bail!("device conformance suites failed");
    }
    Ok(())
}
