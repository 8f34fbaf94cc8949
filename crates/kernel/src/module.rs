//! The unit an application is composed of.
//!
//! A module contributes a router mounted under `{api_prefix}/{name}`, an
//! OpenAPI fragment and the SQL migrations its store needs. The registry
//! applies migrations first, then calls [`Module::init`], and calls
//! [`Module::shutdown`] once the server has drained.

use async_trait::async_trait;
use axum::Router;

use crate::settings::{Settings, StoreBackend};

/// What a module gets to see while booting.
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
    /// Migrations applied by this boot. Always zero on the memory backend.
    pub applied_migrations: usize,
}

impl<'a> InitCtx<'a> {
    pub fn new(settings: &'a Settings, applied_migrations: usize) -> Self {
        Self {
            settings,
            applied_migrations,
        }
    }

    pub fn backend(&self) -> StoreBackend {
        self.settings.database.backend
    }
}

/// A forward-only SQL migration, identified within its module by `id`.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

#[async_trait]
pub trait Module: Sync + Send {
    /// Mount segment and migration namespace. Must be unique in a registry.
    fn name(&self) -> &'static str;

    /// Runs after migrations. An error aborts startup.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes relative to the mount point.
    fn routes(&self) -> Router;

    /// OpenAPI `paths` and `components` with paths relative to the mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Applied in `id` order, once per database.
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
