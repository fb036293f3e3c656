use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

/// Layout category of a page region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    AppCrit,
    Appendix,
    Bibliography,
    Commentary,
    Footnote,
    IndexSiglorum,
    Introduction,
    LineNumberText,
    LineNumberCommentary,
    PrintedMarginalia,
    HandwrittenMarginalia,
    PageNumber,
    Preface,
    PrimaryText,
    RunningHeader,
    TableOfContents,
    Title,
    Translation,
    Other,
    Undefined,
}

impl RegionType {
    /// Every region type, in vocabulary order.
    pub const ALL: [RegionType; 20] = [
        Self::AppCrit,
        Self::Appendix,
        Self::Bibliography,
        Self::Commentary,
        Self::Footnote,
        Self::IndexSiglorum,
        Self::Introduction,
        Self::LineNumberText,
        Self::LineNumberCommentary,
        Self::PrintedMarginalia,
        Self::HandwrittenMarginalia,
        Self::PageNumber,
        Self::Preface,
        Self::PrimaryText,
        Self::RunningHeader,
        Self::TableOfContents,
        Self::Title,
        Self::Translation,
        Self::Other,
        Self::Undefined,
    ];

    /// Region types ordered by editorial importance, used for display and export.
    pub const ORDERED: [RegionType; 20] = [
        Self::Commentary,
        Self::PrimaryText,
        Self::Preface,
        Self::Translation,
        Self::Introduction,
        Self::LineNumberText,
        Self::LineNumberCommentary,
        Self::PageNumber,
        Self::Appendix,
        Self::AppCrit,
        Self::Bibliography,
        Self::Footnote,
        Self::IndexSiglorum,
        Self::RunningHeader,
        Self::TableOfContents,
        Self::Title,
        Self::PrintedMarginalia,
        Self::HandwrittenMarginalia,
        Self::Other,
        Self::Undefined,
    ];

    // @returns: Persisted identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppCrit => "app_crit",
            Self::Appendix => "appendix",
            Self::Bibliography => "bibliography",
            Self::Commentary => "commentary",
            Self::Footnote => "footnote",
            Self::IndexSiglorum => "index_siglorum",
            Self::Introduction => "introduction",
            Self::LineNumberText => "line_number_text",
            Self::LineNumberCommentary => "line_number_commentary",
            Self::PrintedMarginalia => "printed_marginalia",
            Self::HandwrittenMarginalia => "handwritten_marginalia",
            Self::PageNumber => "page_number",
            Self::Preface => "preface",
            Self::PrimaryText => "primary_text",
            Self::RunningHeader => "running_header",
            Self::TableOfContents => "table_of_contents",
            Self::Title => "title",
            Self::Translation => "translation",
            Self::Other => "other",
            Self::Undefined => "undefined",
        }
    }

    // @returns: Position in the display ordering
    pub fn display_rank(&self) -> usize {
        Self::ORDERED
            .iter()
            .position(|t| t == self)
            .unwrap_or(Self::ORDERED.len())
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RegionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| ModelError::MalformedDocument(format!("Unknown region type: {}", s)))
    }
}
