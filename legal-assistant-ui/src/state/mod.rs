//! State Management
//!
//! Conversation state and the theme preference.

pub mod global;
pub mod theme;

pub use global::{provide_chat_state, use_chat_state, ChatState};
pub use theme::{provide_theme, use_theme, ThemeContext};
