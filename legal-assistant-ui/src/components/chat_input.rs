//! Chat Input Component
//!
//! Question box and send button, disabled while a request is in flight.

use leptos::*;

use crate::state::use_chat_state;

#[component]
pub fn ChatInput() -> impl IntoView {
    let state = use_chat_state();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    view! {
        <form on:submit=on_submit class="flex gap-2">
            <input
                type="text"
                placeholder="Type your legal question..."
                prop:value=move || state.input.get()
                on:input=move |ev| state.input.set(event_target_value(&ev))
                disabled=move || state.loading.get()
                class="flex-1 rounded-md border border-gray-300 px-3 py-2
                       dark:bg-gray-800 dark:border-gray-700 focus:outline-none"
            />
            <button
                type="submit"
                disabled=move || state.loading.get()
                class="px-4 py-2 rounded-md bg-gray-900 text-white disabled:opacity-50
                       dark:bg-gray-800 dark:border-gray-700"
            >
                "Send"
            </button>
        </form>
    }
}
