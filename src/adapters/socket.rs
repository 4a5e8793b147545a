use crate::domain::{ConnectivityError, Result};
use std::io::ErrorKind;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// TCP echo port, used as the liveness target when ICMP is not available
pub const ECHO_PORT: u16 = 7;

/// Blocking socket primitives built on `std::net`.
///
/// Name resolution goes through the system resolver and ignores
/// `timeout`; only the connect step is bounded.
#[derive(Debug, Clone)]
pub struct SocketProbe {
    liveness_port: u16,
}

impl SocketProbe {
    pub fn new(liveness_port: u16) -> Self {
        Self { liveness_port }
    }

    pub fn liveness_port(&self) -> u16 {
        self.liveness_port
    }

    fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| ConnectivityError::Resolution(format!("{}: {}", host, e)))?
            .collect();

        if addrs.is_empty() {
            return Err(ConnectivityError::Resolution(format!("{}: no addresses", host)));
        }
        Ok(addrs)
    }

    /// Open (and immediately close) a TCP connection to `host:port`
    pub fn connect(&self, host: &str, port: u16, timeout: Duration) -> Result<()> {
        let timeout = timeout.max(Duration::from_millis(1));
        let mut last_error = ConnectivityError::ConnectionFailed(format!("{}:{}", host, port));

        for addr in Self::resolve(host, port)? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(_stream) => return Ok(()),
                Err(e) => {
                    log::debug!("Failed to connect to {}: {}", addr, e);
                    last_error = e.into();
                }
            }
        }

        Err(last_error)
    }

    /// Check that `host` answers at all.
    ///
    /// A refused connection on the liveness port still proves the host is
    /// up, so it counts as reachable.
    pub fn check_liveness(&self, host: &str, timeout: Duration) -> Result<()> {
        let timeout = timeout.max(Duration::from_millis(1));
        let mut last_error = ConnectivityError::ConnectionFailed(host.to_string());

        for addr in Self::resolve(host, self.liveness_port)? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(_stream) => return Ok(()),
                Err(e) if e.kind() == ErrorKind::ConnectionRefused => {
                    log::debug!("{} refused the liveness probe, host is up", addr);
                    return Ok(());
                }
                Err(e) => {
                    log::debug!("Liveness probe to {} failed: {}", addr, e);
                    last_error = e.into();
                }
            }
        }

        Err(last_error)
    }
}

impl Default for SocketProbe {
    fn default() -> Self {
        Self::new(ECHO_PORT)
    }
}
