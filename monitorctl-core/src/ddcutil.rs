//! Typed wrappers over the ddcutil subcommands.

use crate::detect::parse_detection;
use crate::error::Result;
use crate::monitor::Monitor;
use crate::runner::{CommandRunner, DdcutilRunner};
use crate::target::Target;
use crate::vcp::{FeatureValue, parse_feature_value};

use log::debug;
use std::time::Duration;

/// Per-command timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Timeout for `detect`, which scans every bus.
    pub detect: Duration,
    /// Timeout for `getvcp` and `setvcp`.
    pub vcp: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            detect: Duration::from_secs(10),
            vcp: Duration::from_secs(5),
        }
    }
}

/// ddcutil client: builds argument vectors, runs them and parses the output.
#[derive(Debug, Clone)]
pub struct Ddcutil<R = DdcutilRunner> {
    runner: R,
    timeouts: Timeouts,
}

impl Ddcutil<DdcutilRunner> {
    /// Use `ddcutil` from `PATH` with default timeouts.
    pub fn system() -> Self {
        Self::new(DdcutilRunner::new())
    }
}

impl<R: CommandRunner> Ddcutil<R> {
    /// Wrap a runner with default timeouts.
    pub fn new(runner: R) -> Self {
        Self::with_timeouts(runner, Timeouts::default())
    }

    /// Wrap a runner with custom timeouts.
    pub fn with_timeouts(runner: R, timeouts: Timeouts) -> Self {
        Self { runner, timeouts }
    }

    /// The configured timeouts.
    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// The underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `ddcutil detect` and parse the detected monitors.
    pub fn detect(&self) -> Result<Vec<Monitor>> {
        let res = self
            .runner
            .run(&["detect".to_string()], self.timeouts.detect)?;
        let monitors = parse_detection(&res.stdout)?;
        debug!("detected {} monitor(s)", monitors.len());
        Ok(monitors)
    }

    /// Run `ddcutil getvcp <code>` against `target`.
    pub fn get_vcp(&self, code: &str, target: Target) -> Result<FeatureValue> {
        let mut args = target.args();
        args.extend(["getvcp".to_string(), code.to_string()]);

        let res = self.runner.run(&args, self.timeouts.vcp)?;
        let value = parse_feature_value(code, &res.stdout)?;
        debug!(
            "{} on {}: current={}, max={}",
            value.code, target, value.current, value.maximum
        );
        Ok(value)
    }

    /// Run `ddcutil setvcp <code> <value>` against `target`.
    ///
    /// `sleep_multiplier` scales ddcutil's inter-step delays; values below 1
    /// make the write return sooner.
    pub fn set_vcp(
        &self,
        code: &str,
        value: u32,
        target: Target,
        sleep_multiplier: Option<f32>,
    ) -> Result<()> {
        let mut args = Vec::new();
        if let Some(multiplier) = sleep_multiplier {
            args.push(format!("--sleep-multiplier={multiplier}"));
        }
        args.extend(target.args());
        args.extend(["setvcp".to_string(), code.to_string(), value.to_string()]);

        self.runner.run(&args, self.timeouts.vcp)?;
        debug!("{} on {} set to {}", code, target, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdcError;
    use crate::mock::MockRunner;

    #[test]
    fn test_get_vcp_builds_target_args() {
        let mock = MockRunner::new();
        mock.push_output("VCP code 0x10 (Brightness): current value = 30, max value = 100");

        let ddc = Ddcutil::new(&mock);
        let value = ddc.get_vcp("10", Target::Bus(6)).unwrap();
        assert_eq!(value.current, 30);

        let calls = mock.calls();
        assert_eq!(calls[0].args, ["--bus=6", "getvcp", "10"]);
        assert_eq!(calls[0].timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_set_vcp_puts_sleep_multiplier_first() {
        let mock = MockRunner::new();
        mock.push_output("");

        let ddc = Ddcutil::new(&mock);
        ddc.set_vcp("10", 50, Target::Display(2), Some(0.2)).unwrap();
        assert_eq!(
            mock.calls()[0].args,
            ["--sleep-multiplier=0.2", "--display=2", "setvcp", "10", "50"]
        );
    }

    #[test]
    fn test_detect_uses_detect_timeout() {
        let mock = MockRunner::new();
        mock.push_output("");

        let timeouts = Timeouts {
            detect: Duration::from_secs(20),
            vcp: Duration::from_secs(2),
        };
        let ddc = Ddcutil::with_timeouts(&mock, timeouts);
        assert!(ddc.detect().unwrap().is_empty());

        let calls = mock.calls();
        assert_eq!(calls[0].args, ["detect"]);
        assert_eq!(calls[0].timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_command_failure_is_not_parsed() {
        let mock = MockRunner::new();
        mock.push_failure("ddcutil command failed with return code 1.", "Display 9 not found");

        let ddc = Ddcutil::new(&mock);
        let err = ddc.get_vcp("10", Target::Display(9)).unwrap_err();
        assert!(matches!(err, DdcError::Command { .. }));
        assert_eq!(err.stderr(), Some("Display 9 not found"));
    }
}
