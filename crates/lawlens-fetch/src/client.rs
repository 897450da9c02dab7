//! Typed client for the statute API `law_data` endpoint.
//!
//! | Method | Path | Query |
//! |--------|------|-------|
//! | GET | `law_data/{law_id_or_num_or_revision_id}` | `response_format=json`, `law_full_text_format=json`, optional `elm` |
//!
//! The client performs exactly one request per call. It does not retry and
//! it does not cache; both are decisions of the caller ([`crate::StatuteFetcher`]).

use std::time::Duration;

use url::Url;

use lawlens_core::LawQuery;

use crate::config::LawApiConfig;
use crate::document::StatuteDocument;
use crate::error::FetchError;

/// Endpoint segment for full-text retrieval.
const LAW_DATA_SEGMENT: &str = "law_data";

/// Client for the statute API.
#[derive(Debug, Clone)]
pub struct LawApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LawApiClient {
    /// Create a client from configuration.
    pub fn new(config: &LawApiConfig) -> Result<Self, FetchError> {
        let base_url = config.parsed_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lawlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Http {
                url: "client_init".into(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    /// The canonical request URL for a query.
    ///
    /// Equal queries produce byte-identical URLs; the fetcher relies on this
    /// to use the URL string as its cache key.
    pub fn request_url(&self, query: &LawQuery) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // The base URL was checked by `parsed_base_url`, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(LAW_DATA_SEGMENT)
                .push(query.statute_id().as_str());
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("response_format", "json")
                .append_pair("law_full_text_format", "json");
            if let Some(path) = query.element_path() {
                pairs.append_pair("elm", &path.to_string());
            }
        }
        url
    }

    /// Fetch and parse one statute document.
    ///
    /// Calls `GET {base_url}law_data/{id}?…`.
    pub async fn get(&self, url: &Url) -> Result<StatuteDocument, FetchError> {
        tracing::debug!(%url, "requesting statute document");

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|source| FetchError::Malformed {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawlens_core::{FragmentLocator, StatuteId};

    fn client(base: &str) -> LawApiClient {
        LawApiClient::new(&LawApiConfig::local_mock(base).unwrap()).unwrap()
    }

    fn query(fragment: Option<&str>) -> LawQuery {
        FragmentLocator::default()
            .query_for(StatuteId::new("405AC0000000089").unwrap(), fragment)
            .unwrap()
    }

    #[test]
    fn whole_statute_url() {
        let url = client("https://laws.e-gov.go.jp/api/2/").request_url(&query(None));
        assert_eq!(
            url.as_str(),
            "https://laws.e-gov.go.jp/api/2/law_data/405AC0000000089?response_format=json&law_full_text_format=json"
        );
    }

    #[test]
    fn scoped_url_carries_elm() {
        let url = client("https://laws.e-gov.go.jp/api/2/").request_url(&query(Some("#Mp-At_36-Pr_1")));
        assert_eq!(
            url.as_str(),
            "https://laws.e-gov.go.jp/api/2/law_data/405AC0000000089?response_format=json&law_full_text_format=json&elm=MainProvision-Article_36-Paragraph_1"
        );
    }

    #[test]
    fn base_without_trailing_slash_is_extended() {
        let url = client("http://127.0.0.1:9000/api/2").request_url(&query(None));
        assert_eq!(url.path(), "/api/2/law_data/405AC0000000089");
    }

    #[test]
    fn equal_queries_build_identical_urls() {
        let c = client("https://laws.e-gov.go.jp/api/2/");
        assert_eq!(
            c.request_url(&query(Some("Mp-At_1"))),
            c.request_url(&query(Some("#Mp-At_1")))
        );
        assert_ne!(
            c.request_url(&query(Some("Mp-At_1"))),
            c.request_url(&query(Some("Mp-At_2")))
        );
    }

    #[test]
    fn statute_id_is_percent_encoded() {
        let q = LawQuery::whole(StatuteId::new("a b/c").unwrap());
        let url = client("https://laws.e-gov.go.jp/api/2/").request_url(&q);
        assert_eq!(url.path(), "/api/2/law_data/a%20b%2Fc");
    }
}
