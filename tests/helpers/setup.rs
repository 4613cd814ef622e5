use chrono::{TimeZone, Utc};
use std::sync::Arc;
use upkeep_api::Application;
use upkeep_domain::{NaiveDate, Tz};
use upkeep_infra::{setup_context, Config, StaticTimeSys};
use upkeep_sdk::UpkeepSDK;

pub struct TestApp {
    pub config: Config,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, UpkeepSDK, String) {
    spawn_app_with_today(None).await
}

/// Same as `spawn_app` but with the clock frozen at noon UTC of `today`
pub async fn spawn_app_at(today: NaiveDate) -> (TestApp, UpkeepSDK, String) {
    spawn_app_with_today(Some(today)).await
}

async fn spawn_app_with_today(today: Option<NaiveDate>) -> (TestApp, UpkeepSDK, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    if let Some(today) = today {
        ctx.config.timezone = Tz::UTC;
        let noon = Utc.from_utc_datetime(&today.and_hms_opt(12, 0, 0).unwrap());
        ctx.sys = Arc::new(StaticTimeSys(noon.timestamp_millis()));
    }

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config };
    let sdk = UpkeepSDK::new(address.clone());
    (app, sdk, address)
}
