pub mod classifier;
pub mod errors;
pub mod models;
pub mod monitor;
pub mod probe;
pub mod service;

pub use classifier::classify;
pub use errors::*;
pub use models::*;
pub use monitor::{ConnectivityMonitor, MonitorHandle, Subscription};
pub use probe::{race_deadline, ResultSlot};
pub use service::Connectivity;
