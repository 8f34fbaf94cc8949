pub mod books;

use shelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: books::routes::SharedStore) {
    registry.register(books::create_module(store));
}
