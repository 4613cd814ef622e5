use super::IServiceEntryRepo;
use crate::repos::shared::inmemory_repo::*;
use upkeep_domain::{ServiceEntry, ID};

pub struct InMemoryServiceEntryRepo {
    entries: std::sync::Mutex<Vec<ServiceEntry>>,
}

impl InMemoryServiceEntryRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IServiceEntryRepo for InMemoryServiceEntryRepo {
    async fn insert(&self, entry: &ServiceEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<ServiceEntry>> {
        let mut entries = find_by(&self.entries, |e| e.property_id == *property_id);
        entries.sort_by(|a, b| {
            b.completion_date
                .cmp(&a.completion_date)
                .then(b.created.cmp(&a.created))
        });
        Ok(entries)
    }

    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<()> {
        find_and_delete_by(&self.entries, |e| e.property_id == *property_id);
        Ok(())
    }
}
