use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::future::join_all;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use netreach::adapters::{IntervalEvents, LinuxPlatform, SocketProbe, SysfsInterfaces};
use netreach::{Config, ConnectionType, Connectivity, ConnectivityMonitor};

#[derive(Parser, Debug)]
#[clap(version = env!("NETREACH_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
pub struct Opts {
    /// Configuration file (defaults to the per-user netreach config)
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// Probe timeout in milliseconds
    #[clap(long, short = 't')]
    timeout: Option<u32>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show connectivity, active connection types and bandwidths
    Status,
    /// Check whether hosts are alive
    Reach {
        #[clap(required = true)]
        hosts: Vec<String>,
    },
    /// Check whether hosts accept TCP connections (URLs are accepted)
    Remote {
        #[clap(long, short = 'p')]
        port: Option<u16>,
        #[clap(required = true)]
        hosts: Vec<String>,
    },
    /// Print connectivity changes until interrupted
    Watch,
}

fn format_types(types: &[ConnectionType]) -> String {
    let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    names.join(", ")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let mut config = Config::load(opts.config.as_deref())?;
    if let Some(timeout) = opts.timeout {
        config.timeout_ms = timeout;
    }
    debug!("Using configuration {:?}", config);

    // Probes that miss their deadline keep their socket until the OS gives up.
    match rlimit::increase_nofile_limit(u64::MAX) {
        Ok(limit) => debug!("File descriptor limit raised to {}", limit),
        Err(e) => warn!("Cannot raise file descriptor limit: {}", e),
    }

    let platform = LinuxPlatform::new(
        SysfsInterfaces::new(config.sysfs_root.clone()),
        SocketProbe::new(config.liveness_port),
    );
    let connectivity = Connectivity::new(Arc::new(platform), config.bandwidth_policy);

    match opts.command {
        Command::Status => {
            let types: Vec<ConnectionType> = connectivity.connection_types().collect();
            let bandwidths: Vec<String> = connectivity.bandwidths().iter().map(|b| b.to_string()).collect();

            println!("connected: {}", connectivity.is_connected());
            println!("types: [{}]", format_types(&types));
            println!("bandwidths: [{}]", bandwidths.join(", "));
        }
        Command::Reach { hosts } => {
            let timeout = config.timeout();
            let probes = hosts.iter().map(|host| connectivity.is_reachable(host, timeout));
            let results = join_all(probes).await;

            let mut all_reached = true;
            for (host, result) in hosts.iter().zip(results) {
                let reached = result?;
                all_reached &= reached;
                println!("{}: {}", host, if reached { "reachable" } else { "unreachable" });
            }
            if !all_reached {
                std::process::exit(1);
            }
        }
        Command::Remote { port, hosts } => {
            let timeout = config.timeout();
            let port = port.unwrap_or(config.port);
            let probes = hosts
                .iter()
                .map(|host| connectivity.is_remote_reachable(host, port, timeout));
            let results = join_all(probes).await;

            let mut all_reached = true;
            for (host, result) in hosts.iter().zip(results) {
                let reached = result?;
                all_reached &= reached;
                println!("{}:{}: {}", host, port, if reached { "reachable" } else { "unreachable" });
            }
            if !all_reached {
                std::process::exit(1);
            }
        }
        Command::Watch => {
            let monitor = Arc::new(ConnectivityMonitor::new(connectivity.clone()));
            let types: Vec<ConnectionType> = connectivity.connection_types().collect();
            println!(
                "connected: {} types: [{}]",
                connectivity.is_connected(),
                format_types(&types)
            );

            let subscription = monitor.subscribe(|event| println!("{}", event));
            let handle = monitor.watch(Arc::new(IntervalEvents::new(config.watch_interval())));

            tokio::signal::ctrl_c().await?;

            handle.stop();
            subscription.unsubscribe();
        }
    }

    Ok(())
}
