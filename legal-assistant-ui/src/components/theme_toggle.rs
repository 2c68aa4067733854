//! Theme Toggle Component

use leptos::*;

use crate::state::use_theme;

/// Button switching between light and dark
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = use_theme();
    let toggle = theme.clone();

    view! {
        <button
            type="button"
            on:click=move |_| toggle.toggle()
            class="w-9 h-9 rounded-md border border-gray-300 dark:border-gray-700"
            title="Toggle theme"
        >
            {move || if theme.get().is_dark() { "☀" } else { "☾" }}
        </button>
    }
}
