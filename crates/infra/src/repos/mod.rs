mod notification;
mod property;
mod reminder;
mod service_entry;
mod shared;

pub use notification::{INotificationRepo, InMemoryNotificationRepo};
use notification::PostgresNotificationRepo;
use property::{IPropertyRepo, InMemoryPropertyRepo, PostgresPropertyRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, SaveReminderError};
use reminder::PostgresReminderRepo;
use service_entry::{IServiceEntryRepo, InMemoryServiceEntryRepo, PostgresServiceEntryRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub properties: Arc<dyn IPropertyRepo>,
    pub service_entries: Arc<dyn IServiceEntryRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            properties: Arc::new(PostgresPropertyRepo::new(pool.clone())),
            service_entries: Arc::new(PostgresServiceEntryRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            properties: Arc::new(InMemoryPropertyRepo::new()),
            service_entries: Arc::new(InMemoryServiceEntryRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
