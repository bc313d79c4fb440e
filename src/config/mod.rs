//! Configuration storage, persistence, and typed access.

pub mod loader;
pub mod paths;
pub mod store;
pub mod value;

use std::sync::Arc;

use tracing::debug;

pub use loader::Document;
pub use store::{ConfigStore, StoreState};

/// A store shared by every component that reads or writes configuration.
pub type SharedConfig = Arc<ConfigStore>;

/// Creates a shared store for `path` and loads it.
///
/// A missing file is not an error: the store starts empty and the file is
/// created on the first save. Other load failures are returned.
pub fn open_shared(path: &str) -> Result<SharedConfig, crate::error::ConfigError> {
    let store = ConfigStore::new(path);

    match store.try_load() {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            debug!(path = %store.path().display(), "Config file not found, starting empty");
        }
        Err(e) => return Err(e),
    }

    Ok(Arc::new(store))
}
