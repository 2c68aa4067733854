//! Chat State
//!
//! Reactive conversation state using Leptos signals.

use leptos::*;
use legal_assistant::{format_results, LegalResult, Message, DEFAULT_TOP_K, ERROR_REPLY};

use crate::api;

/// Conversation state provided to all components
#[derive(Clone, Copy)]
pub struct ChatState {
    /// Messages exchanged so far, oldest first
    pub messages: RwSignal<Vec<Message>>,
    /// Text currently in the input box
    pub input: RwSignal<String>,
    /// A request is in flight
    pub loading: RwSignal<bool>,
}

/// Provide chat state to the component tree
pub fn provide_chat_state() {
    let state = ChatState {
        messages: create_rw_signal(Vec::new()),
        input: create_rw_signal(String::new()),
        loading: create_rw_signal(false),
    };

    provide_context(state);
}

/// Chat state from context
pub fn use_chat_state() -> ChatState {
    use_context::<ChatState>().expect("ChatState not provided")
}

impl ChatState {
    /// Submit the current input.
    ///
    /// Does nothing for blank input or while a request is pending.
    pub fn submit(&self) {
        let query = self.input.get_untracked();
        if !accepts(&query, self.loading.get_untracked()) {
            return;
        }

        self.push(Message::user(query.clone()));
        self.input.set(String::new());
        self.loading.set(true);

        let state = *self;
        spawn_local(async move {
            let result = api::fetch_completions(&query, DEFAULT_TOP_K).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error: {}", e).into());
            }
            state.push(Message::assistant(reply_text(&result)));
            state.loading.set(false);
        });
    }

    fn push(&self, message: Message) {
        self.messages.update(|messages| messages.push(message));
    }
}

/// A query is sent only when it has non-blank text and nothing is pending
fn accepts(query: &str, loading: bool) -> bool {
    !loading && !query.trim().is_empty()
}

/// Assistant text for a finished request
fn reply_text(result: &Result<Vec<LegalResult>, String>) -> String {
    match result {
        Ok(results) => format_results(results),
        Err(_) => ERROR_REPLY.to_string(),
    }
}
