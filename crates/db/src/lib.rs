//! Postgres connectivity for the libris service.
//!
//! Owns the client handed to repositories and applies the migrations
//! collected from registered modules.

use std::sync::Arc;

use anyhow::Context;
use libris_kernel::Migration;
use tokio_postgres::{Client, NoTls};

/// Establish a Postgres connection and spawn its driver task.
///
/// The returned client is shared; repositories receive it at construction
/// rather than reaching for a global.
pub async fn connect(settings: &libris_kernel::settings::DatabaseSettings) -> anyhow::Result<Arc<Client>> {
    let (client, connection) = tokio_postgres::connect(&settings.url, NoTls)
        .await
        .with_context(|| "failed to connect to Postgres")?;

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::error!(error = %err, "database connection terminated");
        }
    });

    tracing::info!("database connection established");

    Ok(Arc::new(client))
}

/// Apply module migrations in the order collected by the registry.
///
/// Statements are expected to be idempotent (`CREATE TABLE IF NOT EXISTS`
/// and friends); each migration runs as a single batch.
pub async fn run_migrations(
    client: &Client,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    for (module, migration) in migrations {
        tracing::info!(module = %module, id = migration.id, "applying migration");

        client.batch_execute(migration.up).await.with_context(|| {
            format!(
                "failed to apply migration '{}' from module '{}'",
                migration.id, module
            )
        })?;
    }

    Ok(())
}
