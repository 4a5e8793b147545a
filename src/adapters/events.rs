use crate::ports::NetworkEventsPort;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Reports a possible change on a fixed period, for platforms without a
/// push notification the process can subscribe to.
pub struct IntervalEvents {
    ticker: Mutex<Interval>,
}

impl IntervalEvents {
    pub fn new(period: Duration) -> Self {
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            ticker: Mutex::new(ticker),
        }
    }
}

#[async_trait]
impl NetworkEventsPort for IntervalEvents {
    async fn wait_for_change(&self) -> bool {
        self.ticker.lock().await.tick().await;
        true
    }
}

/// Change signals pushed by an OS callback through a channel
pub struct ChannelEvents {
    receiver: Mutex<mpsc::Receiver<()>>,
}

impl ChannelEvents {
    pub fn new(capacity: usize) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                receiver: Mutex::new(rx),
            },
            tx,
        )
    }
}

#[async_trait]
impl NetworkEventsPort for ChannelEvents {
    async fn wait_for_change(&self) -> bool {
        self.receiver.lock().await.recv().await.is_some()
    }
}
