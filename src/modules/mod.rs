pub mod books;

use std::sync::Arc;

use libris_kernel::ModuleRegistry;

use books::repository::BookRepository;

/// Register all application modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    repo: Arc<dyn BookRepository>,
) -> anyhow::Result<()> {
    registry.register(books::create_module(repo)?);
    Ok(())
}
