//! # Locale State
//!
//! The active UI language. Rendering only; no other state depends on it.

use std::sync::{Arc, Mutex, PoisonError};

use till_core::{Label, Locale};

/// Thread-safe active locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleState {
    locale: Arc<Mutex<Locale>>,
}

impl LocaleState {
    pub fn new(locale: Locale) -> Self {
        LocaleState {
            locale: Arc::new(Mutex::new(locale)),
        }
    }

    pub fn get(&self) -> Locale {
        *self.locale.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches locale; returns the previous one.
    pub fn set(&self, locale: Locale) -> Locale {
        let mut current = self.locale.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, locale)
    }

    /// Looks up a label in the active locale.
    pub fn text(&self, label: Label) -> &'static str {
        self.get().text(label)
    }
}
