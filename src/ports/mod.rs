pub mod events;
pub mod platform;

pub use events::NetworkEventsPort;
pub use platform::{InterfaceIter, PlatformPort};
