use super::IPropertyRepo;
use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use upkeep_domain::{Property, ID};

pub struct PostgresPropertyRepo {
    pool: PgPool,
}

impl PostgresPropertyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PropertyRaw {
    property_uid: Uuid,
    name: String,
    key_person: String,
    contact: String,
    location: String,
    service_type: String,
    service_details: String,
    service_date: Option<NaiveDate>,
    is_on_hold: bool,
    created: i64,
    updated: i64,
}

impl From<PropertyRaw> for Property {
    fn from(p: PropertyRaw) -> Self {
        Self {
            id: p.property_uid.into(),
            name: p.name,
            key_person: p.key_person,
            contact: p.contact,
            location: p.location,
            service_type: p.service_type,
            service_details: p.service_details,
            service_date: p.service_date,
            is_on_hold: p.is_on_hold,
            created: p.created,
            updated: p.updated,
        }
    }
}

#[async_trait::async_trait]
impl IPropertyRepo for PostgresPropertyRepo {
    async fn insert(&self, property: &Property) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties
            (property_uid, name, key_person, contact, location, service_type,
             service_details, service_date, is_on_hold, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(property.id.inner_ref())
        .bind(&property.name)
        .bind(&property.key_person)
        .bind(&property.contact)
        .bind(&property.location)
        .bind(&property.service_type)
        .bind(&property.service_details)
        .bind(property.service_date)
        .bind(property.is_on_hold)
        .bind(property.created)
        .bind(property.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to insert property: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn save(&self, property: &Property) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE properties
            SET name = $2,
            key_person = $3,
            contact = $4,
            location = $5,
            service_type = $6,
            service_details = $7,
            service_date = $8,
            is_on_hold = $9,
            updated = $10
            WHERE property_uid = $1
            "#,
        )
        .bind(property.id.inner_ref())
        .bind(&property.name)
        .bind(&property.key_person)
        .bind(&property.contact)
        .bind(&property.location)
        .bind(&property.service_type)
        .bind(&property.service_details)
        .bind(property.service_date)
        .bind(property.is_on_hold)
        .bind(property.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to update property: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn find(&self, property_id: &ID) -> anyhow::Result<Option<Property>> {
        let property: Option<PropertyRaw> = sqlx::query_as(
            r#"
            SELECT * FROM properties AS p
            WHERE p.property_uid = $1
            "#,
        )
        .bind(property_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(property.map(|p| p.into()))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Property>> {
        let properties: Vec<PropertyRaw> = sqlx::query_as(
            r#"
            SELECT * FROM properties
            ORDER BY created
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(properties.into_iter().map(|p| p.into()).collect())
    }

    async fn delete(&self, property_id: &ID) -> anyhow::Result<Option<Property>> {
        let property: Option<PropertyRaw> = sqlx::query_as(
            r#"
            DELETE FROM properties AS p
            WHERE p.property_uid = $1
            RETURNING *
            "#,
        )
        .bind(property_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(property.map(|p| p.into()))
    }
}
