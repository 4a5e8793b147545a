use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use super::{ConnectionType, Connectivity, ConnectivityEvent};
use crate::ports::NetworkEventsPort;

type Observer = Arc<dyn Fn(&ConnectivityEvent) + Send + Sync>;
type ObserverMap = Mutex<HashMap<Uuid, Observer>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkState {
    is_connected: bool,
    connection_types: BTreeSet<ConnectionType>,
}

impl LinkState {
    fn current(connectivity: &Connectivity) -> Self {
        Self {
            is_connected: connectivity.is_connected(),
            connection_types: connectivity.connection_types().collect(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Emits change events when connectivity or the set of active connection
/// types differs from the last observed state.
pub struct ConnectivityMonitor {
    connectivity: Connectivity,
    last: Mutex<Option<LinkState>>,
    observers: Arc<ObserverMap>,
}

impl ConnectivityMonitor {
    /// Create a monitor seeded with the current state
    pub fn new(connectivity: Connectivity) -> Self {
        let seed = LinkState::current(&connectivity);
        debug!(
            "Seeding connectivity monitor: connected={} types={:?}",
            seed.is_connected, seed.connection_types
        );

        Self {
            connectivity,
            last: Mutex::new(Some(seed)),
            observers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Register an observer. It stays registered until the returned handle
    /// is dropped or unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&ConnectivityEvent) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        lock(&self.observers).insert(id, Arc::new(observer));

        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }

    /// Re-query the platform and notify observers of what changed.
    ///
    /// Returns the emitted events. Without a previous state (after `reset`)
    /// the current state becomes the new baseline and nothing is emitted.
    pub fn refresh(&self) -> Vec<ConnectivityEvent> {
        let mut events = Vec::new();

        {
            let mut last = lock(&self.last);
            let current = LinkState::current(&self.connectivity);

            if let Some(previous) = last.as_ref() {
                if previous.is_connected != current.is_connected {
                    events.push(ConnectivityEvent::ConnectivityChanged {
                        is_connected: current.is_connected,
                    });
                }

                if previous.connection_types != current.connection_types {
                    events.push(ConnectivityEvent::ConnectionTypeChanged {
                        is_connected: current.is_connected,
                        connection_types: current.connection_types.clone(),
                    });
                }
            }

            *last = Some(current);
        }

        if !events.is_empty() {
            let observers: Vec<Observer> = lock(&self.observers).values().cloned().collect();
            for event in &events {
                debug!("{}", event);
                for observer in &observers {
                    observer(event);
                }
            }
        }

        events
    }

    /// Forget the last observed state
    pub fn reset(&self) {
        *lock(&self.last) = None;
    }

    /// Refresh on every change reported by `events`, in the background
    pub fn watch(self: Arc<Self>, events: Arc<dyn NetworkEventsPort>) -> MonitorHandle {
        let monitor = self.clone();
        let active = Arc::new(Mutex::new(true));
        let gate = active.clone();
        let task = tokio::spawn(async move {
            while events.wait_for_change().await {
                if !monitor.refresh_if_active(&gate) {
                    return;
                }
            }
            debug!("Network event source closed");
        });

        MonitorHandle {
            task: Some(task),
            active,
            monitor: self,
        }
    }

    /// The gate stays locked for the whole refresh, notifications included.
    fn refresh_if_active(&self, gate: &Mutex<bool>) -> bool {
        let active = lock(gate);
        if *active {
            self.refresh();
        }
        *active
    }
}

/// Observer registration. Dropping it unsubscribes.
pub struct Subscription {
    id: Uuid,
    observers: Weak<ObserverMap>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            lock(&observers).remove(&self.id);
        }
    }
}

/// Background watch started by [`ConnectivityMonitor::watch`].
///
/// Stopping (or dropping) it detaches from the event source and drops the
/// monitor's last observed state. A refresh already running on another
/// thread is waited for, so no observer is called once `stop` returns.
pub struct MonitorHandle {
    task: Option<JoinHandle<()>>,
    active: Arc<Mutex<bool>>,
    monitor: Arc<ConnectivityMonitor>,
}

impl MonitorHandle {
    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            *lock(&self.active) = false;
            task.abort();
            self.monitor.reset();
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BandwidthPolicy, ConnectivityError, NetworkInterfaceSnapshot, Result, TypeCode};
    use crate::ports::{InterfaceIter, PlatformPort};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SwitchablePlatform {
        interfaces: Mutex<Vec<NetworkInterfaceSnapshot>>,
    }

    impl SwitchablePlatform {
        fn new(interfaces: Vec<NetworkInterfaceSnapshot>) -> Self {
            Self {
                interfaces: Mutex::new(interfaces),
            }
        }

        fn set(&self, interfaces: Vec<NetworkInterfaceSnapshot>) {
            *self.interfaces.lock().unwrap() = interfaces;
        }
    }

    impl PlatformPort for SwitchablePlatform {
        fn interfaces(&self) -> Result<InterfaceIter<'_>> {
            let current = self.interfaces.lock().unwrap().clone();
            Ok(Box::new(current.into_iter().map(Ok::<_, ConnectivityError>)))
        }

        fn raw_connect(&self, _: &str, _: u16, _: Duration) -> Result<()> {
            Ok(())
        }

        fn raw_reachability_check(&self, _: &str, _: Duration) -> Result<()> {
            Ok(())
        }
    }

    fn wifi() -> NetworkInterfaceSnapshot {
        NetworkInterfaceSnapshot::new("wlan0", TypeCode::Wifi, "WIFI")
            .available(true)
            .connected(true)
    }

    fn cellular() -> NetworkInterfaceSnapshot {
        NetworkInterfaceSnapshot::new("rmnet0", TypeCode::Mobile, "MOBILE")
            .available(true)
            .connected(true)
    }

    fn monitor_over(platform: Arc<SwitchablePlatform>) -> ConnectivityMonitor {
        ConnectivityMonitor::new(Connectivity::new(platform, BandwidthPolicy::default()))
    }

    #[test]
    fn test_unchanged_state_emits_nothing() {
        let platform = Arc::new(SwitchablePlatform::new(vec![wifi()]));
        let monitor = monitor_over(platform);

        assert!(monitor.refresh().is_empty());
        assert!(monitor.refresh().is_empty());
    }

    #[test]
    fn test_type_change_fires_once() {
        let platform = Arc::new(SwitchablePlatform::new(vec![wifi()]));
        let monitor = monitor_over(platform.clone());

        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();
        let _subscription = monitor.subscribe(move |event| {
            if matches!(event, ConnectivityEvent::ConnectionTypeChanged { .. }) {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        platform.set(vec![cellular()]);
        let events = monitor.refresh();
        assert_eq!(
            events,
            vec![ConnectivityEvent::ConnectionTypeChanged {
                is_connected: true,
                connection_types: BTreeSet::from([ConnectionType::Cellular]),
            }]
        );

        assert!(monitor.refresh().is_empty());
        assert_eq!(received.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_connectivity_flip() {
        let platform = Arc::new(SwitchablePlatform::new(vec![wifi()]));
        let monitor = monitor_over(platform.clone());

        platform.set(vec![wifi().connected(false)]);
        let events = monitor.refresh();

        assert_eq!(
            events,
            vec![ConnectivityEvent::ConnectivityChanged { is_connected: false }]
        );
    }

    #[test]
    fn test_dropped_subscription_is_not_notified() {
        let platform = Arc::new(SwitchablePlatform::new(vec![wifi()]));
        let monitor = monitor_over(platform.clone());

        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();
        let subscription = monitor.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(monitor.observer_count(), 1);

        subscription.unsubscribe();
        assert_eq!(monitor.observer_count(), 0);

        platform.set(vec![]);
        assert_eq!(monitor.refresh().len(), 2);
        assert_eq!(received.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_reseeds_without_events() {
        let platform = Arc::new(SwitchablePlatform::new(vec![wifi()]));
        let monitor = monitor_over(platform.clone());

        monitor.reset();
        platform.set(vec![cellular()]);

        assert!(monitor.refresh().is_empty());
        platform.set(vec![wifi()]);
        assert_eq!(monitor.refresh().len(), 1);
    }
}
