use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    WiFi,
    Cellular,
    /// Wired ethernet
    Desktop,
    Wimax,
    Bluetooth,
    Other,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionType::WiFi => "wifi",
            ConnectionType::Cellular => "cellular",
            ConnectionType::Desktop => "desktop",
            ConnectionType::Wimax => "wimax",
            ConnectionType::Bluetooth => "bluetooth",
            ConnectionType::Other => "other",
        };
        f.write_str(name)
    }
}

/// Interface type as reported by the OS, normalized to the enumerators the
/// classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    Ethernet,
    Wimax,
    Wifi,
    Bluetooth,
    Mobile,
    MobileDun,
    MobileHipri,
    MobileMms,
    Dummy,
    Unrecognized(i64),
}

impl TypeCode {
    /// Android `ConnectivityManager.TYPE_*` values.
    pub fn from_android(code: i32) -> Self {
        match code {
            0 => TypeCode::Mobile,
            1 => TypeCode::Wifi,
            2 => TypeCode::MobileMms,
            4 => TypeCode::MobileDun,
            5 => TypeCode::MobileHipri,
            6 => TypeCode::Wimax,
            7 => TypeCode::Bluetooth,
            8 => TypeCode::Dummy,
            9 => TypeCode::Ethernet,
            other => TypeCode::Unrecognized(i64::from(other)),
        }
    }

    /// IANA ifType values, as exposed by Windows network adapters.
    pub fn from_iana(code: u32) -> Self {
        match code {
            6 => TypeCode::Ethernet,
            24 => TypeCode::Dummy,
            71 => TypeCode::Wifi,
            243 | 244 => TypeCode::Mobile,
            other => TypeCode::Unrecognized(i64::from(other)),
        }
    }

    /// Linux `ARPHRD_*` hardware types from `/sys/class/net/<if>/type`.
    pub fn from_arphrd(code: u16) -> Self {
        match code {
            1 => TypeCode::Ethernet,
            772 => TypeCode::Dummy,
            801..=803 => TypeCode::Wifi,
            other => TypeCode::Unrecognized(i64::from(other)),
        }
    }
}

/// Point-in-time view of one interface. Never cached: OS state can change
/// between two queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaceSnapshot {
    pub name: String,
    pub is_available: bool,
    pub is_connected: bool,
    pub type_code: TypeCode,
    pub type_name: String,
    pub link_speed_bps: Option<u64>,
}

impl NetworkInterfaceSnapshot {
    pub fn new(name: impl Into<String>, type_code: TypeCode, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_available: false,
            is_connected: false,
            type_code,
            type_name: type_name.into(),
            link_speed_bps: None,
        }
    }

    pub fn available(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.is_connected = connected;
        self
    }

    pub fn with_link_speed(mut self, bps: u64) -> Self {
        self.link_speed_bps = Some(bps);
        self
    }

    pub fn is_online(&self) -> bool {
        self.is_available && self.is_connected
    }
}

/// How `bandwidths()` reports link speeds. The two conventions are not
/// equivalent and are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandwidthPolicy {
    /// A single Wi-Fi link speed, reported only while Wi-Fi is active.
    WifiLinkOnly,
    /// One entry per available interface, `0` when the speed is unknown.
    #[default]
    PerInterface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ProbeRequest {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host with any scheme, `www.` prefix and trailing slashes removed.
    pub fn normalized_host(&self) -> &str {
        normalize_host(&self.host)
    }
}

/// Strips `http://www.`, `http://`, `https://www.`, `https://` and
/// trailing `/` so that a pasted URL can be used as a socket host.
pub fn normalize_host(host: &str) -> &str {
    const PREFIXES: [&str; 4] = ["http://www.", "http://", "https://www.", "https://"];

    let stripped = PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host);

    stripped.trim_end_matches('/')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityEvent {
    ConnectivityChanged {
        is_connected: bool,
    },
    ConnectionTypeChanged {
        is_connected: bool,
        connection_types: BTreeSet<ConnectionType>,
    },
}

impl fmt::Display for ConnectivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityEvent::ConnectivityChanged { is_connected } => {
                write!(f, "connectivity changed: connected={}", is_connected)
            }
            ConnectivityEvent::ConnectionTypeChanged {
                is_connected,
                connection_types,
            } => {
                let types: Vec<String> = connection_types.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "connection types changed: connected={} types=[{}]",
                    is_connected,
                    types.join(", ")
                )
            }
        }
    }
}
