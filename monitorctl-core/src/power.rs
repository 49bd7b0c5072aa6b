//! Power mode definitions (VCP feature `D6`).

use std::fmt;

/// Raw `D6` value that turns a monitor on.
pub const POWER_ON: u32 = 1;

/// Raw `D6` value that turns a monitor off.
///
/// Some monitors (LG in particular) cannot be woken over DDC/CI after this.
pub const POWER_OFF: u32 = 5;

/// Typed view of a raw power mode reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Fully on (`0x01`).
    On,
    /// Standby (`0x02`).
    Standby,
    /// Suspend (`0x03`).
    Suspend,
    /// Off via DPM, often reported as standby (`0x04`).
    Off,
    /// Off via the power button (`0x05`).
    HardOff,
    /// Any value the MCCS table does not name.
    Other(u32),
}

impl PowerMode {
    /// The raw `D6` value.
    pub fn raw(self) -> u32 {
        match self {
            Self::On => 1,
            Self::Standby => 2,
            Self::Suspend => 3,
            Self::Off => 4,
            Self::HardOff => 5,
            Self::Other(raw) => raw,
        }
    }

    /// Whether the mode is the "fully on" code.
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<u32> for PowerMode {
    fn from(raw: u32) -> Self {
        match raw {
            1 => Self::On,
            2 => Self::Standby,
            3 => Self::Suspend,
            4 => Self::Off,
            5 => Self::HardOff,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "On"),
            Self::Standby => write!(f, "Standby"),
            Self::Suspend => write!(f, "Suspend"),
            Self::Off => write!(f, "Off (DPM)"),
            Self::HardOff => write!(f, "Off"),
            Self::Other(raw) => write!(f, "Unknown (0x{raw:02x})"),
        }
    }
}

/// The state a monitor was switched to by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Power-on was issued.
    On,
    /// Power-off was issued.
    Off,
}

impl PowerState {
    /// `"on"` or `"off"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_mode_from_raw() {
        assert_eq!(PowerMode::from(POWER_ON), PowerMode::On);
        assert_eq!(PowerMode::from(POWER_OFF), PowerMode::HardOff);
        assert_eq!(PowerMode::from(4), PowerMode::Off);
        assert_eq!(PowerMode::from(0x42).raw(), 0x42);
        assert!(!PowerMode::Standby.is_on());
    }

    #[test]
    fn test_power_labels() {
        assert_eq!(PowerMode::Other(0x42).to_string(), "Unknown (0x42)");
        assert_eq!(PowerState::Off.to_string(), "off");
    }
}
