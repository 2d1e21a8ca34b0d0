//! Theme preference storage and the theme controller.
//!
//! The controller owns the active [`Theme`], persists it through a
//! [`PreferenceStore`], and bumps a shared [`ThemeSignal`] on every toggle.
//! Renderers poll the signal once per frame instead of listening for a
//! broadcast event.

use crate::constants::THEME_KEY;
use crate::error::Result;
use crate::types::{Theme, ThemeIcon};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// A process-wide string key-value store.
pub trait PreferenceStore {
    /// Reads a value. Storage failures are reported as errors; callers treat
    /// them the same as an absent key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store used by the preview harness and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Shared change counter observed by every renderer.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ThemeSignal(Rc<Cell<u64>>);

impl ThemeSignal {
    /// Creates a counter at version zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.0.get()
    }

    /// Marks the theme as changed.
    pub fn notify(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }
}

/// Owns the active theme and its persistence.
pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
    signal: ThemeSignal,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Reads the stored preference and starts in that mode.
    ///
    /// A missing, unreadable or unrecognized value falls back to dark.
    pub fn init(store: S, signal: ThemeSignal) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_preference(&value).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("Reading theme preference failed, using dark: {err}");
                Theme::default()
            }
        };
        log::debug!("Initial theme: {}", theme.as_preference());
        Self { store, theme, signal }
    }

    /// Flips the mode, persists it, and notifies observers.
    ///
    /// # Returns
    ///
    /// The newly active theme.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(err) = self.store.set(THEME_KEY, self.theme.as_preference()) {
            log::warn!("Saving theme preference failed: {err}");
        }
        self.signal.notify();
        log::debug!("Theme toggled to {}", self.theme.as_preference());
        self.theme
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The icon the toggle control should show.
    pub fn icon(&self) -> ThemeIcon {
        self.theme.icon()
    }

    /// The signal bumped on every toggle.
    pub fn signal(&self) -> &ThemeSignal {
        &self.signal
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
