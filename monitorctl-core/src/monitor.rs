//! Detected monitor records.

use crate::target::Target;

/// Placeholder used when ddcutil does not report a manufacturer or model.
pub const UNKNOWN: &str = "Unknown";

/// A monitor reported by `ddcutil detect`.
///
/// Records are built by [`parse_detection`](crate::parse_detection) and are
/// only valid for the detection run that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// ddcutil display number (1-based, unique per detection run).
    pub display: u32,
    /// I2C bus number, e.g. `6` for `/dev/i2c-6`.
    pub i2c_bus: u32,
    /// EDID manufacturer id, e.g. `AUS`.
    pub mfg: String,
    /// Monitor model, e.g. `VZ249`.
    pub model: String,
    /// EDID serial number, when reported.
    pub serial: Option<String>,
}

impl Monitor {
    /// Create a monitor record with unknown manufacturer and model.
    pub fn new(display: u32, i2c_bus: u32) -> Self {
        Self {
            display,
            i2c_bus,
            mfg: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            serial: None,
        }
    }

    /// Whether `target` addresses this monitor. [`Target::Default`] matches nothing.
    pub fn matches(&self, target: Target) -> bool {
        match target {
            Target::Display(display) => self.display == display,
            Target::Bus(bus) => self.i2c_bus == bus,
            Target::Default => false,
        }
    }

    /// Device path of the monitor's I2C bus.
    pub fn bus_path(&self) -> String {
        format!("/dev/i2c-{}", self.i2c_bus)
    }
}
