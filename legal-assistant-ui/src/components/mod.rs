//! UI Components
//!
//! Reusable Leptos components for the chat page.

pub mod chat_input;
pub mod loading;
pub mod markdown;
pub mod message;
pub mod theme_toggle;

pub use chat_input::ChatInput;
pub use loading::TypingIndicator;
pub use markdown::Markdown;
pub use message::{MessageCard, MessageList};
pub use theme_toggle::ThemeToggle;
