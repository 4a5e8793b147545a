use super::{ConnectionType, TypeCode};

/// Substring fallback, checked in order. `mobile` must stay ahead of `wifi`.
const NAME_HINTS: [(&str, ConnectionType); 5] = [
    ("mobile", ConnectionType::Cellular),
    ("wifi", ConnectionType::WiFi),
    ("wimax", ConnectionType::Wimax),
    ("ethernet", ConnectionType::Desktop),
    ("bluetooth", ConnectionType::Bluetooth),
];

/// Map a platform interface descriptor to a connection category.
///
/// Known type codes win; otherwise the free-text type name is searched for
/// well-known keywords, since vendors report codes the OS enumerations do
/// not cover.
pub fn classify(type_code: TypeCode, type_name: &str) -> ConnectionType {
    match type_code {
        TypeCode::Ethernet => ConnectionType::Desktop,
        TypeCode::Wimax => ConnectionType::Wimax,
        TypeCode::Wifi => ConnectionType::WiFi,
        TypeCode::Bluetooth => ConnectionType::Bluetooth,
        TypeCode::Mobile | TypeCode::MobileDun | TypeCode::MobileHipri | TypeCode::MobileMms => {
            ConnectionType::Cellular
        }
        TypeCode::Dummy => ConnectionType::Other,
        TypeCode::Unrecognized(_) => classify_name(type_name),
    }
}

fn classify_name(type_name: &str) -> ConnectionType {
    if type_name.trim().is_empty() {
        return ConnectionType::Other;
    }

    let lower = type_name.to_lowercase();
    NAME_HINTS
        .iter()
        .find(|(hint, _)| lower.contains(hint))
        .map(|(_, kind)| *kind)
        .unwrap_or(ConnectionType::Other)
}
