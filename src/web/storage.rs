//! `localStorage`-backed preference store.

use crate::error::{FxError, Result};
use crate::theme::PreferenceStore;

/// Preference store over `window.localStorage`.
///
/// Browsers can deny storage access (private modes, disabled cookies); every
/// such failure surfaces as [`FxError::Storage`].
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Opens the window's local storage, remembering if it is unavailable.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; theme preference will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| FxError::Storage("localStorage unavailable".into()))
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FxError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FxError::Storage(format!("{e:?}")))
    }
}
