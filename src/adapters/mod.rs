pub mod events;
pub mod socket;
pub mod sysfs;

pub use events::{ChannelEvents, IntervalEvents};
pub use socket::{SocketProbe, ECHO_PORT};
pub use sysfs::{LinuxPlatform, SysfsInterfaces};
