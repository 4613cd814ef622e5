mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use upkeep_api::Application;
use upkeep_infra::try_setup_context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("upkeep_server".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = try_setup_context().await?;

    let app = Application::new(context).await?;
    app.start().await?;
    Ok(())
}
