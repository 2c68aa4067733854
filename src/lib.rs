//! # Legal Assistant
//!
//! Chat client for a legal provision search service. A question is sent to
//! the service, and the matching articles come back as structured citation
//! records that are formatted as Markdown for display.
//!
//! ## Modules
//!
//! - [`models`]: Messages, citation records and the wire format
//! - [`format`]: Citation records to Markdown
//! - [`theme`]: Persisted light/dark preference
//! - [`client`]: HTTP client for the search service (`native`)
//! - [`conversation`]: Message list and request lifecycle (`native`)
//! - [`render`]: Markdown to styled terminal text (`native`)
//! - [`config`]: TOML configuration with environment overrides (`native`)
//!
//! Without the `native` feature only the platform-independent modules are
//! built, which is what the web front end in `legal-assistant-ui` uses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use legal_assistant::client::{ClientConfig, LegalSearchClient};
//! use legal_assistant::conversation::Conversation;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = LegalSearchClient::new(ClientConfig {
//!         api_key: std::env::var("LEGAL_ASSISTANT_API_KEY").ok(),
//!         ..Default::default()
//!     });
//!     let conversation = Conversation::new(Arc::new(client));
//!
//!     let outcome = conversation.submit("What counts as theft?").await;
//!     if let Some(reply) = outcome.reply() {
//!         println!("{}", reply.content);
//!     }
//! }
//! ```

pub mod format;
pub mod models;
pub mod theme;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod conversation;
#[cfg(feature = "native")]
pub mod render;

// Re-export top-level types for convenience
pub use format::{format_results, locator_line};
pub use models::{
    completions_url, ApiResponse, CompletionBody, CompletionRequest, LegalResult, Message, Role,
    DEFAULT_TOP_K, ERROR_REPLY, MAX_TOP_K,
};
pub use theme::{Theme, ThemeError, ThemePreference, ThemeStore, THEME_STORAGE_KEY};

#[cfg(feature = "native")]
pub use client::{ClientConfig, ClientError, CompletionBackend, LegalSearchClient};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig, SearchConfig, ThemeConfig};

#[cfg(feature = "native")]
pub use conversation::{Conversation, IgnoreReason, SubmitOutcome};

#[cfg(feature = "native")]
pub use theme::FileThemeStore;
