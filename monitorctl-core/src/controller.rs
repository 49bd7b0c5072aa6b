//! Brightness and power control built on ddcutil.

use crate::ddcutil::{Ddcutil, Timeouts};
use crate::error::{DdcError, Result};
use crate::monitor::Monitor;
use crate::power::{POWER_OFF, POWER_ON, PowerState};
use crate::runner::{CommandRunner, DdcutilRunner};
use crate::target::Target;
use crate::vcp::{BRIGHTNESS_CODE, POWER_MODE_CODE};

use log::{debug, info};

/// Sleep multiplier passed to `setvcp` for brightness writes.
pub const DEFAULT_SLEEP_MULTIPLIER: f32 = 0.2;

/// Highest brightness accepted by [`MonitorController::set_brightness`].
pub const MAX_BRIGHTNESS: u32 = 100;

/// High-level monitor operations.
///
/// Every call spawns a fresh ddcutil process; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct MonitorController<R = DdcutilRunner> {
    ddcutil: Ddcutil<R>,
    sleep_multiplier: Option<f32>,
}

impl MonitorController<DdcutilRunner> {
    /// Use `ddcutil` from `PATH` with default settings.
    pub fn system() -> Self {
        Self::new(DdcutilRunner::new())
    }
}

impl<R: CommandRunner> MonitorController<R> {
    /// Create a controller over `runner` with default timeouts.
    pub fn new(runner: R) -> Self {
        Self::from_ddcutil(Ddcutil::new(runner))
    }

    /// Create a controller over `runner` with custom timeouts.
    pub fn with_timeouts(runner: R, timeouts: Timeouts) -> Self {
        Self::from_ddcutil(Ddcutil::with_timeouts(runner, timeouts))
    }

    /// Create a controller over an existing ddcutil client.
    pub fn from_ddcutil(ddcutil: Ddcutil<R>) -> Self {
        Self {
            ddcutil,
            sleep_multiplier: Some(DEFAULT_SLEEP_MULTIPLIER),
        }
    }

    /// Override the sleep multiplier used for brightness writes (`None` keeps ddcutil's default).
    pub fn sleep_multiplier(mut self, multiplier: Option<f32>) -> Self {
        self.sleep_multiplier = multiplier;
        self
    }

    /// The underlying ddcutil client.
    pub fn ddcutil(&self) -> &Ddcutil<R> {
        &self.ddcutil
    }

    /// List all connected monitors.
    pub fn list_monitors(&self) -> Result<Vec<Monitor>> {
        self.ddcutil.detect()
    }

    /// Find a monitor by display number or bus number.
    ///
    /// The display number wins when both are given.
    pub fn find_monitor(&self, display: Option<u32>, bus: Option<u32>) -> Result<Monitor> {
        let target = match (display, bus) {
            (Some(display), _) => Target::Display(display),
            (None, Some(bus)) => Target::Bus(bus),
            (None, None) => {
                return Err(DdcError::InvalidArgument(
                    "Provide either display or bus number to find a monitor".to_string(),
                ));
            }
        };

        self.list_monitors()?
            .into_iter()
            .find(|m| m.matches(target))
            .ok_or_else(|| {
                DdcError::NotFound(match target {
                    Target::Display(display) => {
                        format!("No monitor found with display number {display}")
                    }
                    Target::Bus(bus) => format!("No monitor found with bus number {bus}"),
                    Target::Default => "No monitor found".to_string(),
                })
            })
    }

    /// Read brightness as `(current, maximum)`.
    pub fn get_brightness(&self, target: Target) -> Result<(u32, u32)> {
        let value = self.ddcutil.get_vcp(BRIGHTNESS_CODE, target)?;
        Ok((value.current, value.maximum))
    }

    /// Set brightness (0-100).
    pub fn set_brightness(&self, value: u32, target: Target) -> Result<()> {
        if value > MAX_BRIGHTNESS {
            return Err(DdcError::InvalidArgument(format!(
                "Brightness value must be between 0 and {MAX_BRIGHTNESS}, got {value}"
            )));
        }
        self.ddcutil
            .set_vcp(BRIGHTNESS_CODE, value, target, self.sleep_multiplier)?;
        info!("brightness of {} set to {}", target, value);
        Ok(())
    }

    /// Read the raw power mode (1 = on, 4 = standby, 5 = off; other values are device specific).
    pub fn get_power_mode(&self, target: Target) -> Result<u32> {
        Ok(self.ddcutil.get_vcp(POWER_MODE_CODE, target)?.current)
    }

    /// Turn the monitor on.
    pub fn power_on(&self, target: Target) -> Result<()> {
        self.ddcutil.set_vcp(POWER_MODE_CODE, POWER_ON, target, None)?;
        info!("{} powered on", target);
        Ok(())
    }

    /// Turn the monitor off.
    pub fn power_off(&self, target: Target) -> Result<()> {
        self.ddcutil
            .set_vcp(POWER_MODE_CODE, POWER_OFF, target, None)?;
        info!("{} powered off", target);
        Ok(())
    }

    /// Toggle power, returning the state that was requested.
    ///
    /// Only the "fully on" code counts as on: standby and unknown modes are
    /// switched on.
    pub fn toggle_power(&self, target: Target) -> Result<PowerState> {
        let mode = self.get_power_mode(target)?;
        debug!("current power mode of {}: {}", target, mode);

        if mode == POWER_ON {
            self.power_off(target)?;
            Ok(PowerState::Off)
        } else {
            self.power_on(target)?;
            Ok(PowerState::On)
        }
    }
}
