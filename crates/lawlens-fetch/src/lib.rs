//! # lawlens-fetch: Statute API Client and Document Cache
//!
//! Retrieves statute full text from the e-Gov Law API v2:
//!
//! ```text
//! GET {base_url}law_data/{statute_id}?response_format=json&law_full_text_format=json[&elm={element_path}]
//! ```
//!
//! ## Caching
//!
//! The API marks its responses `no-store`, but readers hover the same
//! reference again and again. [`StatuteFetcher`] therefore memoizes every
//! successful response in process memory, keyed by the canonical request URL:
//!
//! - Equal [`LawQuery`] values always build the identical URL.
//! - A hit returns the stored document without touching the network.
//! - Concurrent callers for one URL share a single in-flight request.
//! - Failures are never stored; the next identical call tries again.
//! - Entries live as long as the cache. Nothing is evicted or invalidated.
//!
//! The overlay controller depends on the [`StatuteSource`] trait rather than
//! on the concrete fetcher so it can be driven by in-memory sources in tests.
//!
//! [`LawQuery`]: lawlens_core::LawQuery

pub mod cache;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod source;

pub use cache::DocumentCache;
pub use client::LawApiClient;
pub use config::{ConfigError, LawApiConfig};
pub use document::StatuteDocument;
pub use error::FetchError;
pub use source::{StatuteFetcher, StatuteSource};
