//! Bookstore application library
//!
//! In-memory book catalog, author directory and order placement, exposed as
//! kernel modules mounted by the HTTP crate.

pub mod catalog;
pub mod modules;

use anyhow::Context;
use axum::Router;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use catalog::{Catalog, SharedCatalog};

/// Build the starting catalog according to settings.
pub fn initial_catalog(settings: &Settings) -> Catalog {
    if settings.catalog.seed_demo_data {
        Catalog::seeded()
    } else {
        Catalog::new()
    }
}

/// A registry with every module registered against `catalog`.
pub fn build_registry(
    catalog: &SharedCatalog,
    settings: &Settings,
) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog, settings)
        .context("failed to register modules")?;
    Ok(registry)
}

/// The complete HTTP application over `catalog`, without starting module lifecycles.
pub fn build_app(catalog: &SharedCatalog, settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(catalog, settings)?;
    Ok(bookstore_http::build_router(&registry, settings))
}

/// Run the service until ctrl-c: init and start modules, serve, then stop modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let catalog = initial_catalog(&settings).into_shared();
    let registry = build_registry(&catalog, &settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookstore_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_modules().await?;
    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(%err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
