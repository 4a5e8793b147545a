use async_trait::async_trait;

/// Port for OS network change notifications
#[async_trait]
pub trait NetworkEventsPort: Send + Sync {
    /// Wait until the OS reports a network change.
    ///
    /// Returns `false` once the source is closed and no more changes will come.
    async fn wait_for_change(&self) -> bool;
}
