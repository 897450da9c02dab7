//! # Citation Abbreviation Table
//!
//! Statute pages anchor every provision with an abbreviated structural path
//! (`Mp-At_36-Pr_1`). The statute API's `elm` parameter expects the full
//! element names of the statute XML schema (`MainProvision-Article_36-Paragraph_1`).
//! This table is the only bridge between the two vocabularies.
//!
//! The table is immutable after construction. Share it between locators with
//! `Arc<AbbreviationTable>`; [`AbbreviationTable::shared_standard`] hands out
//! one process-wide instance of the standard table.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::TableError;

/// The standard e-Gov statute XML schema abbreviations, in schema order.
const STANDARD_CODES: &[(&str, &str)] = &[
    // Document frame
    ("Law", "Law"),
    ("ES", "EnactStatement"),
    ("Prmb", "Preamble"),
    ("Mp", "MainProvision"),
    ("Sp", "SupplProvision"),
    ("Ss", "Subsection"),
    // Structural hierarchy
    ("Pa", "Part"),
    ("PaT", "PartTitle"),
    ("Ch", "Chapter"),
    ("ChT", "ChapterTitle"),
    ("Se", "Section"),
    ("SeT", "SectionTitle"),
    ("Su", "Subsection"),
    ("SuT", "SubsectionTitle"),
    ("Di", "Division"),
    ("DiT", "DivisionTitle"),
    ("At", "Article"),
    ("AtT", "ArticleTitle"),
    ("AtC", "ArticleCaption"),
    ("Pr", "Paragraph"),
    ("PrC", "ParagraphCaption"),
    ("PrN", "ParagraphNum"),
    ("PrS", "ParagraphSentence"),
    // Supplementary and amendment provisions
    ("SpN", "SupplNote"),
    ("AmdP", "AmendProvision"),
    ("AmdPS", "AmendProvisionSentence"),
    ("NwP", "NewProvision"),
    ("Cl", "Class"),
    ("ClT", "ClassTitle"),
    ("ClS", "ClassSentence"),
    // Items
    ("It", "Item"),
    ("ItT", "ItemTitle"),
    ("ItS", "ItemSentence"),
    // Subitems 1 through 10
    ("Si1", "Subitem1"),
    ("Si1T", "Subitem1Title"),
    ("Si1S", "Subitem1Sentence"),
    ("Si2", "Subitem2"),
    ("Si2T", "Subitem2Title"),
    ("Si2S", "Subitem2Sentence"),
    ("Si3", "Subitem3"),
    ("Si3T", "Subitem3Title"),
    ("Si3S", "Subitem3Sentence"),
    ("Si4", "Subitem4"),
    ("Si4T", "Subitem4Title"),
    ("Si4S", "Subitem4Sentence"),
    ("Si5", "Subitem5"),
    ("Si5T", "Subitem5Title"),
    ("Si5S", "Subitem5Sentence"),
    ("Si6", "Subitem6"),
    ("Si6T", "Subitem6Title"),
    ("Si6S", "Subitem6Sentence"),
    ("Si7", "Subitem7"),
    ("Si7T", "Subitem7Title"),
    ("Si7S", "Subitem7Sentence"),
    ("Si8", "Subitem8"),
    ("Si8T", "Subitem8Title"),
    ("Si8S", "Subitem8Sentence"),
    ("Si9", "Subitem9"),
    ("Si9T", "Subitem9Title"),
    ("Si9S", "Subitem9Sentence"),
    ("Si10", "Subitem10"),
    ("Si10T", "Subitem10Title"),
    ("Si10S", "Subitem10Sentence"),
    // Appendices
    ("ApT", "AppdxTable"),
    ("ApTT", "AppdxTableTitle"),
    ("ApN", "AppdxNote"),
    ("ApNT", "AppdxNoteTitle"),
    ("ApS", "AppdxStyle"),
    ("ApST", "AppdxStyleTitle"),
    ("ApF", "AppdxFormat"),
    ("ApFT", "AppdxFormatTitle"),
    ("Ap", "Appdx"),
    ("AFN", "ArithFormulaNum"),
    ("AF", "ArithFormula"),
    ("ApFi", "AppdxFig"),
    ("ApFiT", "AppdxFigTitle"),
    // Tables and figures
    ("TbSt", "TableStruct"),
    ("TbStT", "TableStructTitle"),
    ("Tb", "Table"),
    ("TbR", "TableRow"),
    ("TbHR", "TableHeaderRow"),
    ("TbHC", "TableHeaderColumn"),
    ("TbC", "TableColumn"),
    ("FgSt", "FigStruct"),
    ("FgStT", "FigStructTitle"),
    ("Fg", "Fig"),
    // Remarks and inline markup
    ("Rm", "Remarks"),
    ("RmL", "RemarksLabel"),
    ("Qs", "QuoteStruct"),
    ("Rb", "Ruby"),
    ("Rt", "Rt"),
    ("LnEl", "Line"),
    ("SupEl", "Sup"),
    ("SubEl", "Sub"),
];

/// Immutable mapping from abbreviation code to full element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: HashMap<String, String>,
}

impl AbbreviationTable {
    /// Build the standard statute-schema table.
    pub fn standard() -> Self {
        let entries = STANDARD_CODES
            .iter()
            .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
            .collect();
        Self { entries }
    }

    /// A process-wide shared instance of [`AbbreviationTable::standard`].
    pub fn shared_standard() -> Arc<Self> {
        static STANDARD: OnceLock<Arc<AbbreviationTable>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| Arc::new(Self::standard())))
    }

    /// Build a custom table from `(code, full name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateCode`] if a code appears twice and
    /// [`TableError::EmptyEntry`] if a code or name is empty.
    pub fn from_pairs<I, C, N>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let mut entries = HashMap::new();
        for (code, name) in pairs {
            let code = code.into();
            let name = name.into();
            if code.is_empty() || name.is_empty() {
                return Err(TableError::EmptyEntry);
            }
            if entries.contains_key(&code) {
                return Err(TableError::DuplicateCode(code));
            }
            entries.insert(code, name);
        }
        Ok(Self { entries })
    }

    /// Look up the full element name for an abbreviation code.
    ///
    /// Codes are case-sensitive: `At` is Article, `at` is unknown.
    pub fn full_name(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Whether the table knows this code.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(code, full name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::standard()
    }
}
