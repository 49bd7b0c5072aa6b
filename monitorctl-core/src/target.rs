//! Monitor addressing for ddcutil commands.

use crate::error::{DdcError, Result};
use std::fmt;

/// How a command addresses a monitor.
///
/// ddcutil reaches a monitor either by its enumerated display number or by its
/// raw I2C bus number, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// Let ddcutil pick its default monitor.
    #[default]
    Default,
    /// ddcutil display number (`--display=N`).
    Display(u32),
    /// I2C bus number (`--bus=N`).
    Bus(u32),
}

impl Target {
    /// Build a target from optional display and bus selectors.
    ///
    /// Fails with [`DdcError::InvalidArgument`] when both are given.
    pub fn from_selection(display: Option<u32>, bus: Option<u32>) -> Result<Self> {
        match (display, bus) {
            (Some(_), Some(_)) => Err(DdcError::InvalidArgument(
                "Cannot specify both display and bus. They are mutually exclusive ways to target a monitor."
                    .to_string(),
            )),
            (Some(display), None) => Ok(Self::Display(display)),
            (None, Some(bus)) => Ok(Self::Bus(bus)),
            (None, None) => Ok(Self::Default),
        }
    }

    /// The ddcutil arguments selecting this target.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Default => Vec::new(),
            Self::Display(display) => vec![format!("--display={display}")],
            Self::Bus(bus) => vec![format!("--bus={bus}")],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default display"),
            Self::Display(display) => write!(f, "display {display}"),
            Self::Bus(bus) => write!(f, "bus /dev/i2c-{bus}"),
        }
    }
}

/// Resolve optional display and bus selectors straight into ddcutil arguments.
pub fn resolve_target(display: Option<u32>, bus: Option<u32>) -> Result<Vec<String>> {
    Target::from_selection(display, bus).map(|target| target.args())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_rejects_both() {
        let err = resolve_target(Some(1), Some(2)).unwrap_err();
        assert!(matches!(err, DdcError::InvalidArgument(_)));
    }

    #[test]
    fn test_resolve_target_single_selector() {
        assert_eq!(resolve_target(Some(1), None).unwrap(), ["--display=1"]);
        assert_eq!(resolve_target(None, Some(6)).unwrap(), ["--bus=6"]);
        assert!(resolve_target(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_target_display_names() {
        assert_eq!(Target::Display(2).to_string(), "display 2");
        assert_eq!(Target::Bus(4).to_string(), "bus /dev/i2c-4");
        assert_eq!(Target::default(), Target::Default);
    }
}
