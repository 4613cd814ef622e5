mod inmemory;
mod postgres;

pub use inmemory::InMemoryPropertyRepo;
pub use postgres::PostgresPropertyRepo;
use upkeep_domain::{Property, ID};

#[async_trait::async_trait]
pub trait IPropertyRepo: Send + Sync {
    async fn insert(&self, property: &Property) -> anyhow::Result<()>;
    async fn save(&self, property: &Property) -> anyhow::Result<()>;
    async fn find(&self, property_id: &ID) -> anyhow::Result<Option<Property>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Property>>;
    async fn delete(&self, property_id: &ID) -> anyhow::Result<Option<Property>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use upkeep_domain::{NaiveDate, Property};

    #[tokio::test]
    async fn crud() {
        let ctx = setup_context().await;
        let mut property = Property::new("Maple Apartments".into(), "Pest Control".into(), 0);

        // Insert
        assert!(ctx.repos.properties.insert(&property).await.is_ok());
        let res = ctx.repos.properties.find(&property.id).await.unwrap();
        assert_eq!(res, Some(property.clone()));

        // Save
        property.service_date = NaiveDate::from_ymd_opt(2025, 4, 1);
        property.is_on_hold = false;
        assert!(ctx.repos.properties.save(&property).await.is_ok());
        let res = ctx.repos.properties.find(&property.id).await.unwrap();
        assert_eq!(res, Some(property.clone()));
        let all = ctx.repos.properties.find_all().await.unwrap();
        assert!(all.iter().any(|p| p.id == property.id));

        // Delete
        let res = ctx.repos.properties.delete(&property.id).await.unwrap();
        assert_eq!(res, Some(property.clone()));
        assert!(ctx.repos.properties.find(&property.id).await.unwrap().is_none());
    }
}
