pub mod authors;
pub mod books;
pub mod orders;

use bookstore_kernel::{settings::Settings, ModuleRegistry};

use crate::catalog::SharedCatalog;

/// Register every catalog module against one shared catalog
pub fn register_all(
    registry: &mut ModuleRegistry,
    catalog: &SharedCatalog,
    settings: &Settings,
) -> anyhow::Result<()> {
    let default_limit = settings.pagination.default_limit;
    registry.register(books::create_module(catalog.clone(), default_limit))?;
    registry.register(authors::create_module(catalog.clone()))?;
    registry.register(orders::create_module(catalog.clone()))?;
    Ok(())
}
