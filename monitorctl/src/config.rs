use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use monitorctl_core::{
    DEFAULT_PROGRAM, DEFAULT_SLEEP_MULTIPLIER, DdcutilRunner, MAX_TIMEOUT, MonitorController,
    Timeouts,
};
use serde::Deserialize;

const CONFIG_DIR: &str = "monitor_control";
const CONFIG_FILE: &str = "config.yaml";

/// User settings, read from `~/.config/monitor_control/config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// ddcutil executable, looked up on `PATH` unless absolute.
    pub ddcutil_path: PathBuf,
    pub detect_timeout_secs: u64,
    pub vcp_timeout_secs: u64,
    /// Passed as `--sleep-multiplier` on brightness writes; `null` keeps ddcutil's default.
    pub sleep_multiplier: Option<f32>,
    /// Display used when a command gets neither `--display` nor `--bus`;
    /// `null` lets ddcutil pick.
    pub default_display: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        let timeouts = Timeouts::default();
        Self {
            ddcutil_path: PathBuf::from(DEFAULT_PROGRAM),
            detect_timeout_secs: timeouts.detect.as_secs(),
            vcp_timeout_secs: timeouts.vcp.as_secs(),
            sleep_multiplier: Some(DEFAULT_SLEEP_MULTIPLIER),
            default_display: Some(1),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load `path`, or the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.detect_timeout_secs == 0 || self.vcp_timeout_secs == 0 {
            bail!("timeouts must be at least one second");
        }
        let max = MAX_TIMEOUT.as_secs();
        if self.detect_timeout_secs > max || self.vcp_timeout_secs > max {
            bail!("timeouts must be at most {max} seconds");
        }
        if let Some(multiplier) = self.sleep_multiplier {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                bail!("sleep_multiplier must be a positive number, got {multiplier}");
            }
        }
        if self.default_display == Some(0) {
            bail!("default_display is 1-based");
        }
        Ok(())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            detect: Duration::from_secs(self.detect_timeout_secs),
            vcp: Duration::from_secs(self.vcp_timeout_secs),
        }
    }

    pub fn controller(&self) -> MonitorController {
        let runner = DdcutilRunner::with_program(&self.ddcutil_path);
        MonitorController::with_timeouts(runner, self.timeouts())
            .sleep_multiplier(self.sleep_multiplier)
    }
}
