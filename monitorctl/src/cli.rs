use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use monitorctl_core::{DdcError, Target};

#[derive(Debug, Parser)]
#[command(
    name = "monitorctl",
    version,
    about = "Control external monitor brightness and power over DDC/CI (via ddcutil)",
    after_help = "Examples:\n  monitorctl list\n  monitorctl get brightness -d 1\n  monitorctl set brightness 40 --bus 6\n  monitorctl toggle\n\nLog verbosity is read from MONITORCTL_LOGLEVEL (default: info)."
)]
pub struct Cli {
    /// Config file (default: ~/.config/monitor_control/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List detected monitors
    List,
    /// Show the detected monitor matching a display or bus number
    Find {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Read a monitor setting
    Get {
        #[command(subcommand)]
        setting: GetCommand,
    },
    /// Change a monitor setting
    Set {
        #[command(subcommand)]
        setting: SetCommand,
    },
    /// Turn a monitor on
    On {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Turn a monitor off
    Off {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Turn a monitor off if it is on, on otherwise
    Toggle {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum GetCommand {
    /// Current and maximum brightness
    Brightness {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Current power mode
    Power {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum SetCommand {
    /// Set brightness
    Brightness {
        /// Brightness value [0-100]
        value: u32,
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct TargetArgs {
    /// ddcutil display number
    #[arg(short, long, conflicts_with = "bus")]
    pub display: Option<u32>,

    /// ddcutil I2C bus number
    #[arg(short, long)]
    pub bus: Option<u32>,
}

impl TargetArgs {
    /// Resolve to a [`Target`], falling back to `default_display` when no selector was given.
    pub fn resolve(&self, default_display: Option<u32>) -> Result<Target, DdcError> {
        match (self.display, self.bus) {
            (None, None) => Target::from_selection(default_display, None),
            (display, bus) => Target::from_selection(display, bus),
        }
    }
}
