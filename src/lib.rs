pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use config::Config;
pub use domain::{
    classify, ConnectionType, Connectivity, ConnectivityError, ConnectivityEvent, ConnectivityMonitor,
    NetworkInterfaceSnapshot, ProbeRequest, Result, TypeCode,
};
