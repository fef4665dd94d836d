// SelectionsSaver services
// Stateless logic around the store: scope resolution, restoring into the editor, settings.

pub mod restore_engine;
pub mod scope_resolver;
pub mod settings_engine;
