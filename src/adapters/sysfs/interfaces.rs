use crate::domain::{ConnectivityError, NetworkInterfaceSnapshot, Result, TypeCode};
use crate::ports::InterfaceIter;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";

const IFF_UP: u32 = 0x1;
const IFF_LOOPBACK: u32 = 0x8;
const ARPHRD_ETHER: u16 = 1;

/// Interface enumeration over `/sys/class/net`
#[derive(Debug, Clone)]
pub struct SysfsInterfaces {
    root: PathBuf,
}

impl SysfsInterfaces {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily read every interface directory. Loopback and host-local
    /// virtual links (bridges, veth pairs) are left out since they never
    /// carry outside traffic by themselves.
    pub fn enumerate(&self) -> Result<InterfaceIter<'static>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            ConnectivityError::Platform(format!("Cannot list {}: {}", self.root.display(), e))
        })?;

        Ok(Box::new(entries.filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(ConnectivityError::Platform(e.to_string()))),
            };
            read_interface(&entry.path()).transpose()
        })))
    }
}

impl Default for SysfsInterfaces {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    fs::read_to_string(dir.join(attr)).ok().map(|s| s.trim().to_string())
}

fn parse_flags(raw: &str) -> Option<u32> {
    let hex = raw.trim_start_matches("0x");
    u32::from_str_radix(hex, 16).ok()
}

fn devtype(dir: &Path) -> Option<String> {
    let uevent = read_attr(dir, "uevent")?;
    let value = uevent.lines().find_map(|line| line.strip_prefix("DEVTYPE="))?;
    Some(value.to_string())
}

/// Software links with no hardware behind them. Wireless, cellular and
/// tunnel interfaces are kept even when they lack a `device` link.
fn is_host_local(dir: &Path, devtype: Option<&str>, arphrd: u16) -> bool {
    if devtype == Some("bridge") || dir.join("bridge").is_dir() {
        return true;
    }
    arphrd == ARPHRD_ETHER && devtype.is_none() && !dir.join("device").exists()
}

fn type_code(dir: &Path, devtype: Option<&str>, arphrd: u16) -> TypeCode {
    match devtype {
        Some("wlan") => return TypeCode::Wifi,
        Some("wwan") => return TypeCode::Mobile,
        Some("bluetooth") => return TypeCode::Bluetooth,
        Some("wimax") => return TypeCode::Wimax,
        _ => {}
    }

    if dir.join("wireless").is_dir() || dir.join("phy80211").exists() {
        return TypeCode::Wifi;
    }

    TypeCode::from_arphrd(arphrd)
}

/// `Ok(None)` for interfaces that are deliberately skipped
fn read_interface(dir: &Path) -> Result<Option<NetworkInterfaceSnapshot>> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| ConnectivityError::Platform(format!("Invalid interface path {}", dir.display())))?;

    let flags = read_attr(dir, "flags")
        .as_deref()
        .and_then(parse_flags)
        .ok_or_else(|| ConnectivityError::Platform(format!("{}: unreadable flags", name)))?;

    if flags & IFF_LOOPBACK != 0 {
        return Ok(None);
    }

    let arphrd = read_attr(dir, "type")
        .and_then(|raw| raw.parse::<u16>().ok())
        .ok_or_else(|| ConnectivityError::Platform(format!("{}: unreadable type", name)))?;

    let devtype = devtype(dir);
    if is_host_local(dir, devtype.as_deref(), arphrd) {
        return Ok(None);
    }

    let code = type_code(dir, devtype.as_deref(), arphrd);
    let type_name = devtype.unwrap_or_else(|| name.clone());

    let operstate = read_attr(dir, "operstate").unwrap_or_default();
    // Reading carrier fails with EINVAL while the interface is down.
    let carrier = read_attr(dir, "carrier").as_deref() == Some("1");

    let is_available = flags & IFF_UP != 0 && operstate != "notpresent";
    let is_connected = match operstate.as_str() {
        "up" => true,
        "unknown" => carrier,
        _ => false,
    };

    let mut snapshot = NetworkInterfaceSnapshot::new(name, code, type_name)
        .available(is_available)
        .connected(is_connected);

    // Megabits per second as a kernel int, -1 when unknown.
    if let Some(mbps) = read_attr(dir, "speed").and_then(|raw| raw.parse::<i32>().ok()) {
        if let Ok(mbps) = u64::try_from(mbps) {
            if mbps > 0 {
                snapshot = snapshot.with_link_speed(mbps * 1_000_000);
            }
        }
    }

    Ok(Some(snapshot))
}
