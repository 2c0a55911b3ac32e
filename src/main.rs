use alumni_registry::{settings::AppConfig, Database};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing("info", false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level, config.is_production());
    tracing::info!("Loaded configuration: {:?}", config);

    tracing::info!(
        "Preparing {} schema v{} ({})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        config.env
    );

    let database = Database::connect(&config).await?;
    let report = database.migrate().await?;

    if !report.is_complete() {
        tracing::error!(%report, "Schema verification failed");
        anyhow::bail!("schema verification failed: {report}");
    }

    tracing::info!("Schema verified: all tables, constraints and indexes present.");
    database.pool.close().await;

    Ok(())
}
