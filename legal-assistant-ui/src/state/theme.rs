//! Theme State
//!
//! Light/dark preference kept in `localStorage` and applied as the `dark`
//! class on the document root.

use leptos::*;
use legal_assistant::{Theme, ThemeError, ThemePreference, ThemeStore, THEME_STORAGE_KEY};
use std::cell::RefCell;
use std::rc::Rc;

/// [`ThemeStore`] backed by the browser's local storage
pub struct LocalStorageThemeStore;

impl LocalStorageThemeStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<Theme> {
        Self::storage()?
            .get_item(THEME_STORAGE_KEY)
            .ok()??
            .parse()
            .ok()
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        Self::storage()
            .ok_or(ThemeError::Unavailable)?
            .set_item(THEME_STORAGE_KEY, theme.as_str())
            .map_err(|_| ThemeError::Unavailable)
    }
}

/// Theme handle provided to components
#[derive(Clone)]
pub struct ThemeContext {
    preference: Rc<RefCell<ThemePreference<LocalStorageThemeStore>>>,
    theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// Current theme (reactive)
    pub fn get(&self) -> Theme {
        self.theme.get()
    }

    /// Persist and apply a theme
    pub fn set(&self, theme: Theme) {
        if let Err(e) = self.preference.borrow_mut().set(theme) {
            web_sys::console::warn_1(&format!("Theme not saved: {}", e).into());
        }
        apply_theme(theme);
        self.theme.set(theme);
    }

    pub fn toggle(&self) {
        self.set(self.theme.get_untracked().toggled());
    }
}

/// Load the stored theme, apply it and provide it to the component tree
pub fn provide_theme() {
    let preference = ThemePreference::load(LocalStorageThemeStore);
    let theme = preference.current();
    apply_theme(theme);

    provide_context(ThemeContext {
        preference: Rc::new(RefCell::new(preference)),
        theme: create_rw_signal(theme),
    });
}

/// Theme handle from context
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not provided")
}

/// Toggle the `dark` class on `<html>`
fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());

    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
    }
}
