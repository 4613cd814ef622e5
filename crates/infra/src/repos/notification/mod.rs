mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use upkeep_domain::Notification;

/// Append only feed of notification intents
#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Inserting a notification whose id is already stored is a no-op
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Notifications created at or after `since`, oldest first
    async fn find_since(&self, since: i64) -> anyhow::Result<Vec<Notification>>;
}
