use super::IServiceEntryRepo;
use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use upkeep_domain::{ServiceEntry, ID};

pub struct PostgresServiceEntryRepo {
    pool: PgPool,
}

impl PostgresServiceEntryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ServiceEntryRaw {
    service_entry_uid: Uuid,
    property_uid: Uuid,
    service_type: String,
    completion_date: NaiveDate,
    amount: f64,
    next_service_date: Option<NaiveDate>,
    notes: Option<String>,
    created: i64,
}

impl From<ServiceEntryRaw> for ServiceEntry {
    fn from(e: ServiceEntryRaw) -> Self {
        Self {
            id: e.service_entry_uid.into(),
            property_id: e.property_uid.into(),
            service_type: e.service_type,
            completion_date: e.completion_date,
            amount: e.amount,
            next_service_date: e.next_service_date,
            notes: e.notes,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl IServiceEntryRepo for PostgresServiceEntryRepo {
    async fn insert(&self, entry: &ServiceEntry) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO service_entries
            (service_entry_uid, property_uid, service_type, completion_date, amount,
             next_service_date, notes, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.inner_ref())
        .bind(entry.property_id.inner_ref())
        .bind(&entry.service_type)
        .bind(entry.completion_date)
        .bind(entry.amount)
        .bind(entry.next_service_date)
        .bind(&entry.notes)
        .bind(entry.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<ServiceEntry>> {
        let entries: Vec<ServiceEntryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM service_entries AS s
            WHERE s.property_uid = $1
            ORDER BY s.completion_date DESC, s.created DESC
            "#,
        )
        .bind(property_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM service_entries AS s
            WHERE s.property_uid = $1
            "#,
        )
        .bind(property_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
