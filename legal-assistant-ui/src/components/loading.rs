//! Loading Component
//!
//! Placeholder shown while the assistant is answering.

use leptos::*;
use legal_assistant::Role;

/// Assistant card with three pulsing dots
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="p-4 bg-white dark:bg-gray-800">
            <div class="font-semibold mb-2">{Role::Assistant.label()}</div>
            <div class="flex items-center space-x-2">
                {(0..3).map(|_| view! {
                    <div class="animate-pulse h-2 w-2 bg-gray-400 rounded-full" />
                }).collect_view()}
            </div>
        </div>
    }
}
