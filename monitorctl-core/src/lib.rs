//! Rust API for monitor brightness and power control over DDC/CI.
//!
//! This crate drives the [`ddcutil`](https://www.ddcutil.com/) command-line
//! tool: it builds ddcutil command lines, runs them as subprocesses and parses
//! their textual output into typed values. The DDC/CI protocol itself is left
//! entirely to ddcutil.
//!
//! # Requirements
//!
//! - Linux with the `i2c-dev` kernel module loaded
//! - ddcutil installed and on `PATH`
//! - Read/write access to `/dev/i2c-*`
//!
//! # Example
//!
//! ```no_run
//! use monitorctl_core::{DdcError, MonitorController, Target};
//!
//! fn main() -> Result<(), DdcError> {
//!     let controller = MonitorController::system();
//!
//!     // Enumerate monitors
//!     for monitor in controller.list_monitors()? {
//!         println!("{} on {}: {}", monitor.display, monitor.bus_path(), monitor.model);
//!     }
//!
//!     // Address a monitor by display number or by bus, never both
//!     let target = Target::from_selection(Some(1), None)?;
//!
//!     let (current, max) = controller.get_brightness(target)?;
//!     println!("Brightness: {current}/{max}");
//!
//!     controller.set_brightness(75, target)?;
//!     controller.toggle_power(target)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Use [`MockRunner`] to test code without ddcutil or hardware:
//!
//! ```
//! use monitorctl_core::{MockRunner, MonitorController, PowerState, Target};
//!
//! let mock = MockRunner::new();
//! mock.push_output("VCP code 0xd6 (Power mode): DPM: On,  DPMS: Off (sl=0x01)");
//! mock.push_output("");
//!
//! let controller = MonitorController::new(&mock);
//! assert_eq!(controller.toggle_power(Target::Default).unwrap(), PowerState::Off);
//! assert_eq!(mock.call_count(), 2);
//! ```

#![warn(missing_docs)]

mod controller;
mod ddcutil;
mod detect;
mod error;
mod mock;
mod monitor;
mod power;
mod runner;
mod target;
mod vcp;

// Re-export public API
pub use controller::{DEFAULT_SLEEP_MULTIPLIER, MAX_BRIGHTNESS, MonitorController};
pub use ddcutil::{Ddcutil, Timeouts};
pub use detect::parse_detection;
pub use error::{DdcError, Result};
pub use mock::{MockRunner, RecordedCall};
pub use monitor::{Monitor, UNKNOWN};
pub use power::{POWER_OFF, POWER_ON, PowerMode, PowerState};
pub use runner::{CommandResult, CommandRunner, DEFAULT_PROGRAM, DdcutilRunner, MAX_TIMEOUT};
pub use target::{Target, resolve_target};
pub use vcp::{BRIGHTNESS_CODE, FeatureValue, POWER_MODE_CODE, parse_feature_value};
