use super::SysfsInterfaces;
use crate::adapters::SocketProbe;
use crate::domain::Result;
use crate::ports::{InterfaceIter, PlatformPort};
use std::time::Duration;

/// Linux backend: sysfs for interfaces, plain TCP sockets for probes
#[derive(Debug, Clone, Default)]
pub struct LinuxPlatform {
    interfaces: SysfsInterfaces,
    sockets: SocketProbe,
}

impl LinuxPlatform {
    pub fn new(interfaces: SysfsInterfaces, sockets: SocketProbe) -> Self {
        Self { interfaces, sockets }
    }
}

impl PlatformPort for LinuxPlatform {
    fn interfaces(&self) -> Result<InterfaceIter<'_>> {
        self.interfaces.enumerate()
    }

    fn raw_connect(&self, host: &str, port: u16, timeout_hint: Duration) -> Result<()> {
        self.sockets.connect(host, port, timeout_hint)
    }

    fn raw_reachability_check(&self, host: &str, timeout_hint: Duration) -> Result<()> {
        self.sockets.check_liveness(host, timeout_hint)
    }
}
