mod interfaces;
mod platform;

pub use interfaces::{SysfsInterfaces, DEFAULT_SYSFS_ROOT};
pub use platform::LinuxPlatform;
