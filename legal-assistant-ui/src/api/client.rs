//! HTTP API Client
//!
//! Sends questions to the legal provision search service.

use gloo_net::http::Request;
use legal_assistant::{completions_url, CompletionBody, CompletionRequest, LegalResult};

/// Default service base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

const API_URL_KEY: &str = "legal_assistant_api_url";
const API_KEY_KEY: &str = "legal_assistant_api_key";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn stored(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Get the service base URL from local storage or use default
pub fn get_api_base() -> String {
    stored(API_URL_KEY)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Access key from local storage, else the one given at build time
pub fn get_api_key() -> Option<String> {
    stored(API_KEY_KEY)
        .or_else(|| option_env!("LEGAL_ASSISTANT_API_KEY").map(str::to_string))
        .filter(|key| !key.is_empty())
}

/// Ask the service for citations matching `prompt`
pub async fn fetch_completions(prompt: &str, top_k: u32) -> Result<Vec<LegalResult>, String> {
    let api_key = get_api_key();
    if api_key.is_none() {
        web_sys::console::warn_1(&"No API key configured; the request will be rejected".into());
    }
    let url = completions_url(&get_api_base(), api_key.as_deref());

    let response = Request::post(&url)
        .json(&CompletionRequest::new(prompt, top_k))
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("API error {}: {}", response.status(), text));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Read error: {}", e))?;

    CompletionBody::parse(&body)
        .map_err(|e| format!("Parse error: {}", e))?
        .into_results()
        .map_err(|e| format!("Request rejected: {}", e))
}
