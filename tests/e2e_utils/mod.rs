#![cfg(test)]
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_sysfs;
pub mod stalling_platform;

pub use fake_sysfs::FakeSysfs;
pub use stalling_platform::StallingPlatform;
