//! Conversation and search service types
//!
//! Shared by the terminal and web front ends. Nothing in here touches the
//! network or the filesystem.

use serde::{Deserialize, Deserializer, Serialize};

/// Reply shown to the user whenever a submission fails for any reason.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// Number of results requested per question.
pub const DEFAULT_TOP_K: u32 = 3;

/// Largest `top_k` the search service accepts.
pub const MAX_TOP_K: u32 = 3;

/// Path of the completion endpoint, relative to the service base URL.
pub const COMPLETIONS_PATH: &str = "/api/chat/completions";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Heading shown above a message
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Legal Assistant",
        }
    }
}

/// One entry of the conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One matched provision, located in the book/chapter/title/section hierarchy.
///
/// Titles and sections are missing from parts of the corpus, so those fields
/// accept `null` or an absent key and decode as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalResult {
    pub book_roman: String,
    pub book_name: String,
    pub chapter_roman: String,
    pub chapter_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title_roman: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub section_roman_or_arabic: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub section_name: String,
    pub article_number: String,
    pub article_name: String,
    pub content: String,
}

/// Decoded body of a successful query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub results: Vec<LegalResult>,
}

/// Body posted to the completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub top_k: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, top_k: u32) -> Self {
        Self {
            prompt: prompt.into(),
            top_k,
        }
    }
}

/// What a 2xx response body may contain.
///
/// The service reports some request problems (e.g. `top_k` above its limit)
/// with status 200 and an `error` object instead of results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CompletionBody {
    Results(ApiResponse),
    Rejected { error: String },
}

impl CompletionBody {
    /// Parse a response body, rejecting anything that is neither shape.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Split into the results or the service's rejection message
    pub fn into_results(self) -> Result<Vec<LegalResult>, String> {
        match self {
            CompletionBody::Results(response) => Ok(response.results),
            CompletionBody::Rejected { error } => Err(error),
        }
    }
}

/// Build the completion URL for a service base URL.
///
/// The key is percent-encoded and only appended when present.
pub fn completions_url(base_url: &str, api_key: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match api_key.filter(|key| !key.is_empty()) {
        Some(key) => format!(
            "{}{}?api_key={}",
            base,
            COMPLETIONS_PATH,
            urlencoding::encode(key)
        ),
        None => format!("{}{}", base, COMPLETIONS_PATH),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
