//! # Trigger Registry
//!
//! Tracks which anchors have been examined and which of them are triggers.
//! Registration is idempotent: an element is examined at most once for as
//! long as it stays registered, no matter how many scans or mutation
//! batches report it. Elements inside a closed overlay are released along
//! with it; page elements are released when a mutation batch reports them
//! removed.

use std::collections::HashMap;

use lawlens_core::{LinkClassifier, LinkTarget};

use crate::host::LinkCandidate;
use crate::ids::{ElementId, OverlayId};

/// A registered trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// The anchor element.
    pub element: ElementId,
    /// What the anchor points at.
    pub target: LinkTarget,
    /// Overlay whose content holds the anchor; `None` for page anchors.
    pub owner: Option<OverlayId>,
    /// The trigger's own overlay, while one exists.
    pub overlay: Option<OverlayId>,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Newly registered triggers.
    pub registered: usize,
    /// Candidates skipped because they were already examined.
    pub already_known: usize,
    /// Candidates examined and rejected.
    pub ignored: usize,
}

impl ScanReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: ScanReport) {
        self.registered += other.registered;
        self.already_known += other.already_known;
        self.ignored += other.ignored;
    }
}

/// One added subtree reported by the host's mutation observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedSubtree {
    /// The overlay containing the subtree, if any.
    pub container: Option<OverlayId>,
    /// Anchors inside the subtree, including its root if it is one.
    pub links: Vec<LinkCandidate>,
}

/// A batch of document mutations delivered together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Subtrees added to the document.
    pub records: Vec<AddedSubtree>,
    /// Elements that left the document, anchors and their ancestors alike.
    pub removed: Vec<ElementId>,
}

impl MutationBatch {
    /// A batch with a single record.
    pub fn single(container: Option<OverlayId>, links: Vec<LinkCandidate>) -> Self {
        Self {
            records: vec![AddedSubtree { container, links }],
            removed: Vec::new(),
        }
    }

    /// A batch reporting only removals.
    pub fn removal(removed: Vec<ElementId>) -> Self {
        Self {
            records: Vec::new(),
            removed,
        }
    }
}

/// Registered triggers keyed by element.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    /// Every examined element and the overlay it was found in.
    examined: HashMap<ElementId, Option<OverlayId>>,
    triggers: HashMap<ElementId, Trigger>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Examine candidates and register every qualifying one.
    pub fn scan(
        &mut self,
        candidates: &[LinkCandidate],
        owner: Option<OverlayId>,
        classifier: &LinkClassifier,
    ) -> ScanReport {
        let mut report = ScanReport::default();
        for candidate in candidates {
            if self.examined.contains_key(&candidate.element) {
                report.already_known += 1;
                continue;
            }
            self.examined.insert(candidate.element, owner);
            match classifier.classify(&candidate.href) {
                Ok(target) => {
                    tracing::trace!(element = %candidate.element, href = %candidate.href, "trigger registered");
                    self.triggers.insert(
                        candidate.element,
                        Trigger {
                            element: candidate.element,
                            target,
                            owner,
                            overlay: None,
                        },
                    );
                    report.registered += 1;
                }
                Err(_) => report.ignored += 1,
            }
        }
        report
    }

    pub fn get(&self, element: ElementId) -> Option<&Trigger> {
        self.triggers.get(&element)
    }

    pub(crate) fn get_mut(&mut self, element: ElementId) -> Option<&mut Trigger> {
        self.triggers.get_mut(&element)
    }

    /// Whether the element has been examined.
    pub fn is_examined(&self, element: ElementId) -> bool {
        self.examined.contains_key(&element)
    }

    /// Number of registered triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Forget every element examined inside `owner`'s content.
    ///
    /// Returns how many triggers were released.
    pub fn release_owned(&mut self, owner: OverlayId) -> usize {
        self.examined.retain(|_, found_in| *found_in != Some(owner));
        let before = self.triggers.len();
        self.triggers.retain(|_, t| t.owner != Some(owner));
        before - self.triggers.len()
    }

    /// Forget elements that left the document.
    ///
    /// A forgotten element is examined afresh if it is reported again.
    /// Returns the released triggers.
    pub fn forget(&mut self, elements: &[ElementId]) -> Vec<Trigger> {
        elements
            .iter()
            .filter_map(|element| {
                self.examined.remove(element);
                self.triggers.remove(element)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn classifier() -> LinkClassifier {
        LinkClassifier::new(
            Url::parse("https://laws.example.jp/law/405AC0000000088").unwrap(),
            "/law/",
        )
    }

    fn links() -> Vec<LinkCandidate> {
        vec![
            LinkCandidate::new(ElementId(1), "/law/405AC0000000088#Mp-At_1"),
            LinkCandidate::new(ElementId(2), "https://elsewhere.example/law/X"),
            LinkCandidate::new(ElementId(3), "#Mp-At_2"),
        ]
    }

    #[test]
    fn scan_registers_qualifying_links() {
        let mut registry = TriggerRegistry::new();
        let report = registry.scan(&links(), None, &classifier());
        assert_eq!(
            report,
            ScanReport {
                registered: 2,
                already_known: 0,
                ignored: 1
            }
        );
        assert!(registry.get(ElementId(1)).is_some());
        assert!(registry.get(ElementId(2)).is_none());
        assert!(registry.is_examined(ElementId(2)));
    }

    #[test]
    fn scan_is_idempotent() {
        let mut registry = TriggerRegistry::new();
        registry.scan(&links(), None, &classifier());
        let again = registry.scan(&links(), None, &classifier());
        assert_eq!(again.registered, 0);
        assert_eq!(again.already_known, 3);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn release_forgets_owned_elements() {
        let mut registry = TriggerRegistry::new();
        let owner = OverlayId(7);
        registry.scan(&links()[..2], Some(owner), &classifier());
        registry.scan(&links()[2..], None, &classifier());

        assert_eq!(registry.release_owned(owner), 1);
        assert!(!registry.is_examined(ElementId(1)));
        assert!(!registry.is_examined(ElementId(2)));
        assert!(registry.get(ElementId(3)).is_some());
    }

    #[test]
    fn forgotten_elements_are_examined_again() {
        let mut registry = TriggerRegistry::new();
        registry.scan(&links(), None, &classifier());

        let released = registry.forget(&[ElementId(1), ElementId(2), ElementId(99)]);
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].element, ElementId(1));
        assert!(!registry.is_examined(ElementId(2)));
        assert_eq!(registry.len(), 1);

        let report = registry.scan(&links(), None, &classifier());
        assert_eq!(report.registered, 1);
        assert_eq!(report.ignored, 1);
        assert_eq!(report.already_known, 1);
    }

    #[test]
    fn merge_sums_counts() {
        let mut total = ScanReport::default();
        total.merge(ScanReport {
            registered: 1,
            already_known: 2,
            ignored: 3,
        });
        total.merge(ScanReport {
            registered: 1,
            already_known: 0,
            ignored: 0,
        });
        assert_eq!(total.registered, 2);
        assert_eq!(total.already_known, 2);
        assert_eq!(total.ignored, 3);
    }
}
