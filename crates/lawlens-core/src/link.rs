//! # Link Classification
//!
//! Decides whether an anchor reference is something we preview, and what it
//! points at. Two kinds qualify:
//!
//! - **Statute links**: same-origin references whose path starts with the
//!   statute prefix (`/law/` by default), e.g. `/law/405AC0000000089#Mp-At_1`.
//!   The first path segment after the prefix is the statute identifier.
//! - **Same-document links**: bare `#fragment` references.
//!
//! Everything else is rejected with [`LinkError::NotAStatuteLink`].

use url::Url;

use crate::error::LinkError;
use crate::identity::StatuteId;

/// Path prefix that marks a reference as a statute link.
pub const DEFAULT_STATUTE_LINK_PREFIX: &str = "/law/";

/// What a qualifying anchor points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A statute on the remote service, optionally narrowed by a fragment.
    Statute {
        /// The statute identifier from the link path.
        statute_id: StatuteId,
        /// Citation fragment without the leading `#`, if non-empty.
        fragment: Option<String>,
    },
    /// An element elsewhere in the current document.
    Local {
        /// Target element id without the leading `#`.
        fragment: String,
    },
}

/// Classifies anchor references relative to the hosting page.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    page_url: Url,
    prefix: String,
}

impl LinkClassifier {
    /// Create a classifier for links found on `page_url`.
    pub fn new(page_url: Url, prefix: impl Into<String>) -> Self {
        Self {
            page_url,
            prefix: prefix.into(),
        }
    }

    /// The page the links are resolved against.
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Classify a raw `href` value.
    ///
    /// # Errors
    ///
    /// - [`LinkError::EmptyFragment`] for a bare `#`.
    /// - [`LinkError::InvalidUrl`] when the reference cannot be joined.
    /// - [`LinkError::NotAStatuteLink`] for foreign origins or paths.
    /// - [`LinkError::MissingStatuteId`] for `/law/` with nothing after it.
    pub fn classify(&self, href: &str) -> Result<LinkTarget, LinkError> {
        let href = href.trim();
        if let Some(fragment) = href.strip_prefix('#') {
            if fragment.is_empty() {
                return Err(LinkError::EmptyFragment);
            }
            return Ok(LinkTarget::Local {
                fragment: fragment.to_string(),
            });
        }

        let resolved = self.page_url.join(href).map_err(|source| LinkError::InvalidUrl {
            href: href.to_string(),
            source,
        })?;

        if resolved.origin() != self.page_url.origin() {
            return Err(LinkError::NotAStatuteLink(href.to_string()));
        }

        let Some(rest) = resolved.path().strip_prefix(self.prefix.as_str()) else {
            return Err(LinkError::NotAStatuteLink(href.to_string()));
        };

        let raw_id = rest.split('/').next().unwrap_or_default();
        let statute_id =
            StatuteId::new(raw_id).map_err(|_| LinkError::MissingStatuteId(href.to_string()))?;

        let fragment = resolved
            .fragment()
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        Ok(LinkTarget::Statute {
            statute_id,
            fragment,
        })
    }
}
