//! Message Components
//!
//! The conversation list and a single message card.

use leptos::*;
use legal_assistant::{Message, Role};

use crate::components::loading::TypingIndicator;
use crate::components::markdown::Markdown;
use crate::state::use_chat_state;

/// Conversation list with the empty-state placeholder and typing indicator
#[component]
pub fn MessageList() -> impl IntoView {
    let state = use_chat_state();

    view! {
        <div class="flex-1 overflow-y-auto my-1">
            {move || {
                let messages = state.messages.get();
                if messages.is_empty() {
                    view! {
                        <div class="text-center text-gray-500 dark:text-gray-400 mt-10">
                            <p>"Ask a legal question to get started"</p>
                        </div>
                    }.into_view()
                } else {
                    messages
                        .into_iter()
                        .map(|message| view! { <MessageCard message=message /> })
                        .collect_view()
                }
            }}

            {move || state.loading.get().then(|| view! { <TypingIndicator /> })}
        </div>
    }
}

/// One message: plain text for the user, Markdown for the assistant
#[component]
pub fn MessageCard(message: Message) -> impl IntoView {
    let body = match message.role {
        Role::User => view! { <p class="whitespace-pre-wrap">{message.content}</p> }.into_view(),
        Role::Assistant => view! { <Markdown content=message.content /> }.into_view(),
    };

    view! {
        <div class=card_class(message.role)>
            <div class="font-semibold mb-2">{message.role.label()}</div>
            {body}
        </div>
    }
}

/// Card background per author
pub fn card_class(role: Role) -> &'static str {
    match role {
        Role::User => "p-4 border-y border-gray-200 dark:border-gray-600 bg-blue-50 dark:bg-blue-900/30",
        Role::Assistant => "p-4 border-y border-gray-200 dark:border-gray-600 bg-white dark:bg-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_class_per_role() {
        assert!(card_class(Role::User).contains("bg-blue-50"));
        assert!(card_class(Role::Assistant).contains("bg-white"));
    }
}
