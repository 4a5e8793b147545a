#![cfg(test)]
#![allow(dead_code)]

use netreach::ports::{InterfaceIter, PlatformPort};
use netreach::{ConnectivityError, NetworkInterfaceSnapshot, Result, TypeCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Online platform whose connect primitive ignores its timeout and blocks
pub struct StallingPlatform {
    stall: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl StallingPlatform {
    pub fn new(stall: Duration) -> Self {
        Self {
            stall,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    fn stall(&self) -> Result<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.stall);
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl PlatformPort for StallingPlatform {
    fn interfaces(&self) -> Result<InterfaceIter<'_>> {
        let eth = NetworkInterfaceSnapshot::new("eth0", TypeCode::Ethernet, "eth0")
            .available(true)
            .connected(true);
        Ok(Box::new(std::iter::once(Ok::<_, ConnectivityError>(eth))))
    }

    fn raw_connect(&self, _host: &str, _port: u16, _timeout_hint: Duration) -> Result<()> {
        self.stall()
    }

    fn raw_reachability_check(&self, _host: &str, _timeout_hint: Duration) -> Result<()> {
        self.stall()
    }
}
