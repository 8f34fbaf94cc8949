//! Book catalogue application.
//!
//! Wires the book resource module onto a record store chosen by settings and
//! drives it through the shelf module lifecycle.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use shelf_kernel::{
    settings::{Settings, StoreBackend},
    InitCtx, ModuleRegistry,
};

use modules::books::routes::SharedStore;
use modules::books::store::{MemoryBookStore, PgBookStore};

/// Build the module registry over the configured record store and
/// initialize its modules.
///
/// For the postgres backend this connects and applies pending migrations
/// before any module is initialized.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();

    let applied = match settings.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory book store; records are lost on restart");
            let store: SharedStore = Arc::new(MemoryBookStore::new());
            modules::register_all(&mut registry, store);
            0
        }
        StoreBackend::Postgres => {
            let pool = shelf_db::connect(&settings.database).await?;
            let store: SharedStore = Arc::new(PgBookStore::new(pool.clone()));
            modules::register_all(&mut registry, store);

            let applied = shelf_db::run_migrations(&pool, &registry.collect_migrations())
                .await
                .context("failed to apply migrations")?;
            tracing::info!(applied, "migrations up to date");
            applied
        }
    };

    registry.init_all(&InitCtx::new(settings, applied)).await?;
    Ok(registry)
}

/// Apply pending migrations against the configured postgres database.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let pool = shelf_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, Arc::new(PgBookStore::new(pool.clone())));

    shelf_db::run_migrations(&pool, &registry.collect_migrations()).await
}

/// Run the full application until a shutdown signal arrives.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = bootstrap(settings).await?;

    let served = shelf_http::start_server(&registry, settings).await;

    registry.shutdown_all().await?;
    served
}
