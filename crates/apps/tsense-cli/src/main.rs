use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::process::ExitCode;
use tsense_sdk::config::{DEFAULT_HOST, DEFAULT_PIN, DEFAULT_PORT};
use tsense_sdk::{Endpoint, Outcome, SensorClient, SensorInfo};

#[derive(Parser, Debug)]
#[command(name = "tsense", about = "Temperature sensor operator CLI", version)]
struct Cli {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = DEFAULT_PIN)]
    pin: String,

    /// Print raw JSON instead of formatted output
    #[arg(long)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the device identity and settings
    Info,
    /// Show the current temperature reading
    Reading,
    /// List the RPC methods the device exposes
    Methods,
    /// Rename the device
    SetName { name: String },
    /// Change the reading interval
    SetInterval {
        /// Interval between readings, in seconds
        seconds: u32,
    },
    /// Step the firmware one version forward
    UpdateFirmware,
    /// Reboot the device
    Reboot,
    /// Restore factory settings and wait for the device to come back
    FactoryReset,
    /// Print an endpoint config template for TSENSE_CONFIG
    ConfigTemplate,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let endpoint = Endpoint {
        host: cli.host.clone(),
        port: cli.port,
        pin: cli.pin.clone(),
    };
    let client = SensorClient::new(&endpoint);

    match &cli.command {
        Command::Info => render_info(cli, client.get_info()?),
        Command::SetName { name } => render_info(cli, client.set_name(name)?),
        Command::SetInterval { seconds } => render_info(cli, client.set_reading_interval(*seconds)?),
        Command::FactoryReset => render_info(cli, client.reset_to_factory()?),
        Command::Reading => {
            let reading = client.get_reading()?;
            if cli.json {
                println!("{}", json!({ "reading": reading }));
            } else {
                println!("{reading}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Methods => {
            let methods = client.get_methods()?;
            if cli.json {
                println!("{}", json!(methods));
            } else {
                for method in methods {
                    println!("{method}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::UpdateFirmware => render_ack(cli, client.update_firmware()?),
        Command::Reboot => render_ack(cli, client.reboot()?),
        Command::ConfigTemplate => {
            print!("{}", Endpoint::example_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn render_info(cli: &Cli, outcome: Outcome<SensorInfo>) -> Result<ExitCode> {
    match outcome {
        Outcome::Accepted(info) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else if !cli.quiet {
                print_info(&info);
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Rejected(error) => {
            eprintln!("device rejected the request: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render_ack(cli: &Cli, ack: String) -> Result<ExitCode> {
    if cli.json {
        println!("{}", json!({ "result": ack }));
    } else if !cli.quiet {
        println!("{ack}");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_info(info: &SensorInfo) {
    println!("name:             {}", info.name);
    println!("hid:              {}", info.hid);
    println!("model:            {}", info.model);
    println!("firmware version: {}", info.firmware_version);
    println!("reading interval: {}s", info.reading_interval);
}
