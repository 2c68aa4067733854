//! App Root Component
//!
//! Single chat page with the theme and conversation providers.

use leptos::*;

use crate::components::{ChatInput, MessageList, ThemeToggle};
use crate::state::{provide_chat_state, provide_theme};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_theme();
    provide_chat_state();

    view! {
        <div class="flex flex-col h-screen md:px-20 mx-auto p-4 dark:bg-gray-900 dark:text-white">
            <header class="flex justify-between items-center mb-4">
                <h1 class="text-2xl font-bold">"Legal Assistant"</h1>
                <ThemeToggle />
            </header>

            <MessageList />

            <ChatInput />
        </div>
    }
}
