use std::sync::Arc;

use anyhow::Context;
use libris_app::modules;
use libris_app::modules::books::repository::{BookRepository, PgBookRepository};
use libris_kernel::settings::Settings;
use libris_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load libris settings")?;

    libris_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "libris bootstrap starting"
    );

    let client = libris_db::connect(&settings.database).await?;
    let repo: Arc<dyn BookRepository> = Arc::new(PgBookRepository::new(Arc::clone(&client)));

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, repo)?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;

    libris_db::run_migrations(&client, &registry.collect_migrations()).await?;

    tracing::info!("libris bootstrap complete");

    libris_http::start_server(&registry, &settings).await
}
