mod inmemory;
mod postgres;

pub use inmemory::InMemoryServiceEntryRepo;
pub use postgres::PostgresServiceEntryRepo;
use upkeep_domain::{ServiceEntry, ID};

#[async_trait::async_trait]
pub trait IServiceEntryRepo: Send + Sync {
    async fn insert(&self, entry: &ServiceEntry) -> anyhow::Result<()>;
    /// Entries of a property, most recent visit first
    async fn find_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<ServiceEntry>>;
    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<()>;
}
