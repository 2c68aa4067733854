//! API Client
//!
//! HTTP access to the search service.

mod client;

pub use client::{fetch_completions, get_api_base, get_api_key, DEFAULT_API_BASE};
