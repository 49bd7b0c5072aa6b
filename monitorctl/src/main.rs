use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use monitorctl_core::{DdcError, Monitor, MonitorController, PowerMode};

mod cli;
mod config;
mod table;

use cli::{Cli, Command, GetCommand, SetCommand};
use config::Config;
use table::{Align, Table};

const LOG_ENV: &str = "MONITORCTL_LOGLEVEL";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(stderr) = err.downcast_ref::<DdcError>().and_then(DdcError::stderr) {
                eprintln!("{}", stderr.trim_end());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    let controller = config.controller();
    let default_display = config.default_display;

    match cli.command {
        Command::List => return list(&controller),
        Command::Find { target } => {
            let monitor = controller.find_monitor(target.display, target.bus)?;
            print!("{}", monitor_table("Monitor", std::slice::from_ref(&monitor)));
        }
        Command::Get { setting } => match setting {
            GetCommand::Brightness { target } => {
                let (current, max) = controller.get_brightness(target.resolve(default_display)?)?;
                println!("Brightness: {current}/{max}");
            }
            GetCommand::Power { target } => {
                let raw = controller.get_power_mode(target.resolve(default_display)?)?;
                println!("Power mode: {} (0x{raw:02x})", PowerMode::from(raw));
            }
        },
        Command::Set { setting } => match setting {
            SetCommand::Brightness { value, target } => {
                controller.set_brightness(value, target.resolve(default_display)?)?;
                println!("Brightness set to {value}");
            }
        },
        Command::On { target } => {
            controller.power_on(target.resolve(default_display)?)?;
            println!("Power state set to On");
        }
        Command::Off { target } => {
            controller.power_off(target.resolve(default_display)?)?;
            println!("Power state set to Off");
        }
        Command::Toggle { target } => {
            let state = controller.toggle_power(target.resolve(default_display)?)?;
            println!("Power state: {state}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn list(controller: &MonitorController) -> Result<ExitCode> {
    let monitors = controller.list_monitors()?;
    if monitors.is_empty() {
        eprintln!("No monitors found. Ensure DDC/CI is enabled and permissions are set.");
        return Ok(ExitCode::FAILURE);
    }
    print!("{}", monitor_table("Detected Monitors", &monitors));
    Ok(ExitCode::SUCCESS)
}

fn monitor_table(title: &str, monitors: &[Monitor]) -> Table {
    let mut table = Table::new(title)
        .column("Display #", Align::Right)
        .column("I2C Bus", Align::Right)
        .column("Mfg", Align::Left)
        .column("Model", Align::Left)
        .column("Serial", Align::Left);

    for m in monitors {
        table.add_row(vec![
            m.display.to_string(),
            m.bus_path(),
            m.mfg.clone(),
            m.model.clone(),
            m.serial.clone().unwrap_or_default(),
        ]);
    }
    table
}
