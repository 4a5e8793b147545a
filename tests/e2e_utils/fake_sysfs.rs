#![cfg(test)]
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Throwaway `/sys/class/net` lookalike
pub struct FakeSysfs {
    dir: TempDir,
}

impl FakeSysfs {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, attrs: &[(&str, &str)]) {
        let iface = self.dir.path().join(name);
        fs::create_dir_all(&iface).expect("Failed to create interface dir");
        for (attr, value) in attrs {
            fs::write(iface.join(attr), format!("{}\n", value)).expect("Failed to write attribute");
        }
    }

    pub fn loopback(&self) {
        self.write("lo", &[("flags", "0x9"), ("type", "772"), ("operstate", "unknown"), ("carrier", "1")]);
    }

    pub fn ethernet(&self, name: &str, up: bool) {
        let (flags, operstate) = if up { ("0x1003", "up") } else { ("0x1002", "down") };
        self.write(
            name,
            &[("flags", flags), ("type", "1"), ("operstate", operstate), ("speed", "1000")],
        );
        fs::create_dir_all(self.dir.path().join(name).join("device")).expect("Failed to create device link");
    }

    /// Host-local bridge such as the one a container runtime creates
    pub fn bridge(&self, name: &str) {
        self.write(
            name,
            &[("flags", "0x1003"), ("type", "1"), ("operstate", "up"), ("uevent", "DEVTYPE=bridge")],
        );
    }

    pub fn wlan(&self, name: &str, up: bool) {
        let (flags, operstate) = if up { ("0x1003", "up") } else { ("0x1002", "down") };
        self.write(
            name,
            &[
                ("flags", flags),
                ("type", "1"),
                ("operstate", operstate),
                ("uevent", "DEVTYPE=wlan"),
            ],
        );
    }

    pub fn remove(&self, name: &str) {
        fs::remove_dir_all(self.dir.path().join(name)).expect("Failed to remove interface dir");
    }
}
