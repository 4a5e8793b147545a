use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::classifier::classify;
use super::probe::race_deadline;
use super::{
    normalize_host, BandwidthPolicy, ConnectionType, ConnectivityError, NetworkInterfaceSnapshot, ProbeRequest,
    Result,
};
use crate::ports::PlatformPort;

/// Connectivity queries and reachability probes over a platform port.
///
/// Nothing is cached: every call goes back to the platform, so results
/// always reflect the current OS state.
#[derive(Clone)]
pub struct Connectivity {
    platform: Arc<dyn PlatformPort>,
    bandwidth_policy: BandwidthPolicy,
}

impl Connectivity {
    pub fn new(platform: Arc<dyn PlatformPort>, bandwidth_policy: BandwidthPolicy) -> Self {
        Self {
            platform,
            bandwidth_policy,
        }
    }

    pub fn bandwidth_policy(&self) -> BandwidthPolicy {
        self.bandwidth_policy
    }

    /// True iff at least one interface is both available and connected
    pub fn is_connected(&self) -> bool {
        self.snapshots().any(|iface| iface.is_online())
    }

    /// Active connection types, derived from a fresh snapshot on each call
    pub fn connection_types(&self) -> impl Iterator<Item = ConnectionType> + '_ {
        self.available_interfaces()
            .map(|iface| classify(iface.type_code, &iface.type_name))
    }

    /// Link speeds in bits per second, reported according to the configured policy
    pub fn bandwidths(&self) -> Vec<u64> {
        match self.bandwidth_policy {
            BandwidthPolicy::WifiLinkOnly => {
                let wifi = self
                    .available_interfaces()
                    .find(|iface| classify(iface.type_code, &iface.type_name) == ConnectionType::WiFi);

                match wifi {
                    Some(iface) => match iface.link_speed_bps {
                        Some(speed) => vec![speed],
                        None => {
                            debug!("Wi-Fi interface {} reports no link speed", iface.name);
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                }
            }
            BandwidthPolicy::PerInterface => self
                .available_interfaces()
                .map(|iface| iface.link_speed_bps.unwrap_or(0))
                .collect(),
        }
    }

    /// Liveness check of `host`, bounded by `timeout`.
    ///
    /// Only an empty host is an error; every other failure reads as `false`.
    pub async fn is_reachable(&self, host: &str, timeout: Duration) -> Result<bool> {
        if host.is_empty() {
            return Err(ConnectivityError::InvalidArgument("host must not be empty".to_string()));
        }

        if !self.is_connected() {
            debug!("Not probing {}: device is offline", host);
            return Ok(false);
        }

        let platform = self.platform.clone();
        let target = host.to_string();
        let reached = race_deadline(host, timeout, move || {
            platform.raw_reachability_check(&target, timeout)
        })
        .await;

        Ok(reached)
    }

    /// Stream connection check of `host:port`, bounded by `timeout`.
    ///
    /// `host` may be a URL; scheme, `www.` and trailing slashes are stripped.
    pub async fn is_remote_reachable(&self, host: &str, port: u16, timeout: Duration) -> Result<bool> {
        if host.is_empty() {
            return Err(ConnectivityError::InvalidArgument("host must not be empty".to_string()));
        }

        if !self.is_connected() {
            debug!("Not probing {}:{}: device is offline", host, port);
            return Ok(false);
        }

        let target = normalize_host(host).to_string();
        let label = format!("{}:{}", target, port);
        let platform = self.platform.clone();
        let reached = race_deadline(&label, timeout, move || platform.raw_connect(&target, port, timeout)).await;

        Ok(reached)
    }

    pub async fn probe(&self, request: &ProbeRequest) -> Result<bool> {
        self.is_remote_reachable(&request.host, request.port, request.timeout)
            .await
    }

    fn snapshots(&self) -> impl Iterator<Item = NetworkInterfaceSnapshot> + '_ {
        let interfaces = match self.platform.interfaces() {
            Ok(iter) => Some(iter),
            Err(e) => {
                warn!("Unable to enumerate network interfaces: {}", e);
                None
            }
        };

        interfaces.into_iter().flatten().filter_map(|item| match item {
            Ok(iface) => Some(iface),
            Err(e) => {
                debug!("Skipping network interface: {}", e);
                None
            }
        })
    }

    fn available_interfaces(&self) -> impl Iterator<Item = NetworkInterfaceSnapshot> + '_ {
        self.snapshots().filter(|iface| iface.is_available)
    }
}
