mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    INotificationRepo, IReminderRepo, InMemoryNotificationRepo, InMemoryReminderRepo, Repos,
    SaveReminderError,
};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};
use upkeep_domain::{date, NaiveDate};

#[derive(Clone)]
pub struct UpkeepContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl UpkeepContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("DATABASE_URL is not set, reminders are only kept in memory.");
                Repos::create_inmemory()
            }
        };
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    /// The current calendar day in the business timezone
    pub fn today(&self) -> NaiveDate {
        date::today(self.sys.get_timestamp_millis(), &self.config.timezone)
    }
}

/// Will setup the infrastructure context given the environment.
/// Postgres is used when `DATABASE_URL` is present, otherwise everything is
/// kept in memory.
pub async fn try_setup_context() -> anyhow::Result<UpkeepContext> {
    let ctx = UpkeepContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await?;
    info!("Business timezone: {}", ctx.config.timezone);
    Ok(ctx)
}

/// Same as `try_setup_context` but panics if the database is unreachable
pub async fn setup_context() -> UpkeepContext {
    try_setup_context()
        .await
        .expect("Postgres credentials must be valid when DATABASE_URL is set")
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}
