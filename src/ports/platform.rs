use crate::domain::{NetworkInterfaceSnapshot, Result};
use std::time::Duration;

/// Lazily enumerated interfaces; a failing item does not abort the scan.
pub type InterfaceIter<'a> = Box<dyn Iterator<Item = Result<NetworkInterfaceSnapshot>> + Send + 'a>;

/// Port for OS network introspection, one implementation per platform
pub trait PlatformPort: Send + Sync {
    /// Fresh query of the current interfaces
    fn interfaces(&self) -> Result<InterfaceIter<'_>>;

    /// Resolve `host` and open a stream connection to `port`.
    ///
    /// Blocking. `timeout_hint` is passed down to the OS but resolution may
    /// not honor it, so callers must not rely on it.
    fn raw_connect(&self, host: &str, port: u16, timeout_hint: Duration) -> Result<()>;

    /// OS-level liveness check of `host`. Blocking, same caveat as `raw_connect`.
    fn raw_reachability_check(&self, host: &str, timeout_hint: Duration) -> Result<()>;
}
