use super::IPropertyRepo;
use crate::repos::shared::inmemory_repo::*;
use upkeep_domain::{Property, ID};

pub struct InMemoryPropertyRepo {
    properties: std::sync::Mutex<Vec<Property>>,
}

impl InMemoryPropertyRepo {
    pub fn new() -> Self {
        Self {
            properties: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPropertyRepo for InMemoryPropertyRepo {
    async fn insert(&self, property: &Property) -> anyhow::Result<()> {
        insert(property, &self.properties);
        Ok(())
    }

    async fn save(&self, property: &Property) -> anyhow::Result<()> {
        save(property, &self.properties);
        Ok(())
    }

    async fn find(&self, property_id: &ID) -> anyhow::Result<Option<Property>> {
        Ok(find(property_id, &self.properties))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Property>> {
        Ok(find_by(&self.properties, |_| true))
    }

    async fn delete(&self, property_id: &ID) -> anyhow::Result<Option<Property>> {
        Ok(delete(property_id, &self.properties))
    }
}
