//! # Fragment Locator
//!
//! Translates a page-anchor fragment into the element path the statute API
//! accepts as its `elm` parameter.
//!
//! ```text
//! #Mp-Pa_1-Ch_3-Se_1-At_36-Pr_1
//!   └─▶ MainProvision-Part_1-Chapter_3-Section_1-Article_36-Paragraph_1
//! ```
//!
//! ## Rules
//!
//! - A leading `#` is stripped; the rest splits on `-` into segments and each
//!   segment splits on `_` into a code and its qualifiers.
//! - Every code must be in the [`AbbreviationTable`]. One unknown code fails
//!   the whole call. A partial path would address the wrong excerpt.
//! - A segment with more than one qualifier (a branch number such as
//!   `At_36_2`) keeps its first qualifier and ends the path there. The API
//!   cannot address branch numbers directly; anything finer would have to be
//!   refined client-side from the coarser node, which we do not do.
//! - Segment order is preserved. No reordering, no deduplication.

use std::sync::Arc;

use crate::abbreviation::AbbreviationTable;
use crate::error::LocateError;
use crate::identity::StatuteId;
use crate::query::LawQuery;

/// One de-abbreviated step of an element path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Full element name from the abbreviation table.
    pub name: String,
    /// First qualifier of the segment, if any (`"36"` in `At_36`).
    pub index: Option<String>,
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.index {
            Some(index) => write!(f, "{}_{}", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// De-abbreviated structural address of a statute sub-element.
///
/// Always non-empty when produced by [`FragmentLocator`]. Displays in the
/// API's `elm` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementPath {
    segments: Vec<PathSegment>,
}

impl ElementPath {
    /// The segments in address order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for ElementPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Resolves citation fragments against an injected abbreviation table.
#[derive(Debug, Clone)]
pub struct FragmentLocator {
    table: Arc<AbbreviationTable>,
}

impl FragmentLocator {
    /// Create a locator over the given table.
    pub fn new(table: Arc<AbbreviationTable>) -> Self {
        Self { table }
    }

    /// The table this locator resolves against.
    pub fn table(&self) -> &AbbreviationTable {
        &self.table
    }

    /// Resolve a fragment, returning `None` when any code is unknown.
    pub fn resolve(&self, fragment: &str) -> Option<ElementPath> {
        self.try_resolve(fragment).ok()
    }

    /// Resolve a fragment, reporting which code failed.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::UnknownCode`] for the first segment whose code
    /// is not in the table. An empty fragment fails on its empty code.
    pub fn try_resolve(&self, fragment: &str) -> Result<ElementPath, LocateError> {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut segments = Vec::new();

        for raw in body.split('-') {
            let mut parts = raw.split('_');
            let code = parts.next().unwrap_or_default();
            let Some(name) = self.table.full_name(code) else {
                tracing::warn!(code, fragment, "unknown structural code in fragment");
                return Err(LocateError::UnknownCode {
                    code: code.to_string(),
                    fragment: fragment.to_string(),
                });
            };

            let index = parts.next().map(str::to_string);
            let branched = parts.next().is_some();
            segments.push(PathSegment {
                name: name.to_string(),
                index,
            });

            if branched {
                tracing::debug!(segment = raw, "branch number truncated; ignoring remaining segments");
                break;
            }
        }

        Ok(ElementPath { segments })
    }

    /// Build the query for a statute link, resolving its fragment if present.
    ///
    /// A link without a fragment (or with an empty one) addresses the whole
    /// statute.
    ///
    /// # Errors
    ///
    /// Propagates [`LocateError`] when the fragment does not resolve.
    pub fn query_for(
        &self,
        statute_id: StatuteId,
        fragment: Option<&str>,
    ) -> Result<LawQuery, LocateError> {
        match fragment.map(|f| f.strip_prefix('#').unwrap_or(f)) {
            Some(f) if !f.is_empty() => {
                let path = self.try_resolve(f)?;
                Ok(LawQuery::new(statute_id, Some(path)))
            }
            _ => Ok(LawQuery::whole(statute_id)),
        }
    }
}

impl Default for FragmentLocator {
    fn default() -> Self {
        Self::new(AbbreviationTable::shared_standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> FragmentLocator {
        FragmentLocator::default()
    }

    fn resolved(fragment: &str) -> Option<String> {
        locator().resolve(fragment).map(|p| p.to_string())
    }

    #[test]
    fn resolves_full_main_provision_path() {
        assert_eq!(
            resolved("#Mp-Pa_1-Ch_3-Se_1-At_36-Pr_1").as_deref(),
            Some("MainProvision-Part_1-Chapter_3-Section_1-Article_36-Paragraph_1")
        );
    }

    #[test]
    fn leading_hash_is_optional() {
        assert_eq!(resolved("Pa_1-Ch_2-At_5").as_deref(), Some("Part_1-Chapter_2-Article_5"));
    }

    #[test]
    fn bare_codes_have_no_index() {
        assert_eq!(resolved("#ES").as_deref(), Some("EnactStatement"));
        assert_eq!(resolved("#Prmb-Ch_1").as_deref(), Some("Preamble-Chapter_1"));
    }

    #[test]
    fn unknown_code_fails_whole_path() {
        assert_eq!(resolved("#Xx_1"), None);
        assert_eq!(resolved("#Mp-At_3-Xx_1"), None);
        let err = locator().try_resolve("#Mp-Zz").unwrap_err();
        assert_eq!(
            err,
            LocateError::UnknownCode {
                code: "Zz".into(),
                fragment: "#Mp-Zz".into(),
            }
        );
    }

    #[test]
    fn empty_fragment_fails() {
        assert_eq!(resolved(""), None);
        assert_eq!(resolved("#"), None);
        assert_eq!(resolved("#Mp--At_1"), None);
    }

    #[test]
    fn branch_number_truncates_and_stops() {
        assert_eq!(resolved("#At_36_2").as_deref(), Some("Article_36"));
        assert_eq!(resolved("#Mp-At_36-Pr_1_2-It_3").as_deref(), Some("MainProvision-Article_36-Paragraph_1"));
        // Segments after the branch are never looked up, even unknown ones.
        assert_eq!(resolved("#At_36_2-Xx_9").as_deref(), Some("Article_36"));
    }

    #[test]
    fn order_and_repeats_preserved() {
        assert_eq!(resolved("#At_2-At_1").as_deref(), Some("Article_2-Article_1"));
    }

    #[test]
    fn custom_table_is_honoured() {
        let table = AbbreviationTable::from_pairs([("A", "Alpha")]).unwrap();
        let custom = FragmentLocator::new(Arc::new(table));
        assert_eq!(custom.resolve("#A_1").map(|p| p.to_string()).as_deref(), Some("Alpha_1"));
        assert!(custom.resolve("#At_1").is_none());
    }

    #[test]
    fn query_for_handles_missing_and_empty_fragment() {
        let id = StatuteId::new("405AC0000000089").unwrap();
        let whole = locator().query_for(id.clone(), None).unwrap();
        assert!(whole.element_path().is_none());
        let empty = locator().query_for(id.clone(), Some("#")).unwrap();
        assert!(empty.element_path().is_none());
        let scoped = locator().query_for(id.clone(), Some("#Mp-At_1")).unwrap();
        assert_eq!(scoped.element_path().map(ToString::to_string).as_deref(), Some("MainProvision-Article_1"));
        assert!(locator().query_for(id, Some("#Nope")).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const CODES: &[(&str, &str)] = &[
        ("Mp", "MainProvision"),
        ("Sp", "SupplProvision"),
        ("Pa", "Part"),
        ("Ch", "Chapter"),
        ("Se", "Section"),
        ("At", "Article"),
        ("Pr", "Paragraph"),
        ("It", "Item"),
        ("Si3", "Subitem3"),
        ("TbSt", "TableStruct"),
    ];

    fn segment() -> impl Strategy<Value = (usize, Option<u32>)> {
        (0..CODES.len(), proptest::option::of(1u32..500))
    }

    proptest! {
        /// Known codes with at most one qualifier resolve to the joined full names.
        #[test]
        fn known_segments_resolve_in_order(segs in prop::collection::vec(segment(), 1..8)) {
            let fragment: Vec<String> = segs
                .iter()
                .map(|(i, n)| match n {
                    Some(n) => format!("{}_{}", CODES[*i].0, n),
                    None => CODES[*i].0.to_string(),
                })
                .collect();
            let expected: Vec<String> = segs
                .iter()
                .map(|(i, n)| match n {
                    Some(n) => format!("{}_{}", CODES[*i].1, n),
                    None => CODES[*i].1.to_string(),
                })
                .collect();

            let path = FragmentLocator::default()
                .resolve(&format!("#{}", fragment.join("-")))
                .map(|p| p.to_string());
            prop_assert_eq!(path, Some(expected.join("-")));
        }

        /// Resolution never panics on arbitrary input.
        #[test]
        fn arbitrary_input_never_panics(s in ".{0,64}") {
            let _ = FragmentLocator::default().resolve(&s);
        }

        /// A result, when present, never has more segments than the input.
        #[test]
        fn never_grows(s in "[A-Za-z0-9_#-]{0,40}") {
            if let Some(path) = FragmentLocator::default().resolve(&s) {
                let input_segments = s.trim_start_matches('#').split('-').count();
                prop_assert!(path.len() <= input_segments);
                prop_assert!(!path.is_empty());
            }
        }
    }
}
