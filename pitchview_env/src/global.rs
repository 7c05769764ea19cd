//! Process-wide store handle.
//!
//! A binary installs its store once at startup and hands the resulting
//! `Arc` to whoever needs it. Initialization is guarded explicitly: a second
//! `install` is an error, and [`get_or_install`] is the idempotent variant for
//! callers that only want "the store, creating it if nobody has yet".

use crate::error::EnvError;
use crate::store::PitchStore;
use std::sync::{Arc, OnceLock};
use tracing::info;

static STORE: OnceLock<Arc<dyn PitchStore>> = OnceLock::new();

/// Installs the process-wide store.
///
/// # Errors
/// `EnvError::AlreadyInitialized` if a store was installed before. The
/// previously installed store stays in place.
pub fn install(store: Arc<dyn PitchStore>) -> Result<Arc<dyn PitchStore>, EnvError> {
    let description = store.describe();
    STORE
        .set(store)
        .map_err(|_| EnvError::AlreadyInitialized)?;

    info!("Store installed: {}", description);
    handle()
}

/// Returns the installed store, installing the one built by `init` if none
/// is present. `init` runs at most once per process.
pub fn get_or_install<F>(init: F) -> Arc<dyn PitchStore>
where
    F: FnOnce() -> Arc<dyn PitchStore>,
{
    STORE.get_or_init(init).clone()
}

/// Returns the installed store.
///
/// # Errors
/// `EnvError::NotInitialized` if nothing was installed yet.
pub fn handle() -> Result<Arc<dyn PitchStore>, EnvError> {
    STORE.get().cloned().ok_or(EnvError::NotInitialized)
}

/// Returns true once a store has been installed.
pub fn is_initialized() -> bool {
    STORE.get().is_some()
}
