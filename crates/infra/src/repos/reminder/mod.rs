mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use thiserror::Error;
use upkeep_domain::{Reminder, ID};

#[derive(Error, Debug)]
pub enum SaveReminderError {
    /// The stored reminder has another version than the one that was read,
    /// or it no longer exists
    #[error("The reminder was modified or removed concurrently")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Inserts `reminder` unless its property and service type already have
    /// an active reminder. Returns whether it was inserted.
    async fn insert_if_no_active(&self, reminder: &Reminder) -> anyhow::Result<bool>;
    /// Stores `reminder` if the stored version still equals `reminder.version`
    /// and bumps the stored version by one.
    async fn save(&self, reminder: &Reminder) -> Result<(), SaveReminderError>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_property_service(
        &self,
        property_id: &ID,
        service_type: &str,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Every reminder that is not completed
    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn find_completed_since(&self, since: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<Reminder>>;
}
