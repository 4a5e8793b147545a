use crate::adapters::sysfs::DEFAULT_SYSFS_ROOT;
use crate::adapters::ECHO_PORT;
use crate::domain::{BandwidthPolicy, ConnectivityError, Result, DEFAULT_PORT, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "netreach";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Probe timeout in milliseconds
    pub timeout_ms: u32,
    /// Port used by remote reachability probes when none is given
    pub port: u16,
    /// Port targeted by liveness checks. Defaults to the TCP echo port, which
    /// answers (or refuses) on LANs but is silently dropped by most public
    /// hosts, so `reach` against them times out to `false`. Set it to 80 or
    /// 443 to check internet hosts.
    pub liveness_port: u16,
    pub bandwidth_policy: BandwidthPolicy,
    pub sysfs_root: PathBuf,
    /// Polling period of `watch`, in milliseconds
    pub watch_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u32,
            port: DEFAULT_PORT,
            liveness_port: ECHO_PORT,
            bandwidth_policy: BandwidthPolicy::default(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            watch_interval_ms: 2000,
        }
    }
}

impl Config {
    /// Load from `path`, or from the per-user config location when `None`.
    /// A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let loaded: std::result::Result<Self, confy::ConfyError> = match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, None),
        };
        loaded.map_err(|e| ConnectivityError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}
