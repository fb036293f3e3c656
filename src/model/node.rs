/*!
 * Node kinds, persisted records and the text-container node.
 *
 * Every node of a commentary is a `TextContainer`: its minimal persisted
 * record (a `NodeData` variant) plus the slots caching its derived
 * attributes. Relations between nodes are never stored in the record.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::geometry::BoundingBox;
use super::lazy::LazyAttr;
use super::range::{Shifts, WordRange};
use super::region_type::RegionType;
use crate::errors::ModelError;

/// Number of node kinds living in a commentary's flat lists.
pub const CHILD_KIND_COUNT: usize = 7;

/// Kind of a text container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Commentary,
    Page,
    Region,
    Line,
    Word,
    Entity,
    Sentence,
    Hyphenation,
}

impl NodeKind {
    /// Kinds stored in the commentary's flat lists, in load order.
    pub const CHILD_KINDS: [NodeKind; CHILD_KIND_COUNT] = [
        Self::Page,
        Self::Region,
        Self::Line,
        Self::Word,
        Self::Entity,
        Self::Sentence,
        Self::Hyphenation,
    ];

    /// Annotation kinds, which carry character shifts.
    pub const ANNOTATION_KINDS: [NodeKind; 3] = [Self::Entity, Self::Sentence, Self::Hyphenation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commentary => "commentary",
            Self::Page => "page",
            Self::Region => "region",
            Self::Line => "line",
            Self::Word => "word",
            Self::Entity => "entity",
            Self::Sentence => "sentence",
            Self::Hyphenation => "hyphenation",
        }
    }

    /// Name of the kind's flat list in the persisted document.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Commentary => "commentaries",
            Self::Page => "pages",
            Self::Region => "regions",
            Self::Line => "lines",
            Self::Word => "words",
            Self::Entity => "entities",
            Self::Sentence => "sentences",
            Self::Hyphenation => "hyphenations",
        }
    }

    pub fn from_plural(name: &str) -> Option<NodeKind> {
        Self::CHILD_KINDS
            .iter()
            .find(|kind| kind.plural() == name)
            .copied()
    }

    pub fn is_annotation(&self) -> bool {
        Self::ANNOTATION_KINDS.contains(self)
    }

    /// Position of the kind's flat list, `None` for the commentary itself.
    pub(crate) fn slot(&self) -> Option<usize> {
        match self {
            Self::Commentary => None,
            Self::Page => Some(0),
            Self::Region => Some(1),
            Self::Line => Some(2),
            Self::Word => Some(3),
            Self::Entity => Some(4),
            Self::Sentence => Some(5),
            Self::Hyphenation => Some(6),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Accepts both the singular and the plural form
impl FromStr for NodeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        [NodeKind::Commentary]
            .iter()
            .chain(Self::CHILD_KINDS.iter())
            .find(|kind| kind.as_str() == lowered || kind.plural() == lowered)
            .copied()
            .ok_or_else(|| ModelError::MalformedDocument(format!("Unknown node kind: {}", s)))
    }
}

/// Persisted fields of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub word_range: WordRange,
}

/// Persisted fields of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub word_range: WordRange,
    pub region_type: RegionType,
}

/// Persisted fields of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub word_range: WordRange,
}

/// Persisted fields of a word. Its range is its own position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub bbox: BoundingBox,
    pub text: String,
}

/// Persisted fields of a named entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub word_range: WordRange,
    pub shifts: Shifts,
    pub transcript: Option<String>,
    pub entity_type: String,
    pub wikidata_id: Option<String>,
}

/// Persisted fields of a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub word_range: WordRange,
    pub shifts: Shifts,
    pub corrupted: Option<bool>,
    pub incomplete_continuing: bool,
    pub incomplete_truncated: Option<bool>,
}

/// Persisted fields of a hyphenation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyphenationRecord {
    pub word_range: WordRange,
    pub shifts: Shifts,
}

/// The persisted payload of a node, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Page(PageRecord),
    Region(RegionRecord),
    Line(LineRecord),
    Word(WordRecord),
    Entity(EntityRecord),
    Sentence(SentenceRecord),
    Hyphenation(HyphenationRecord),
}

impl NodeData {
    /// Parse a flat-list record of the given kind.
    ///
    /// This is the exhaustive mapping from kind to constructor used while loading.
    pub fn from_json(kind: NodeKind, value: Value) -> Result<NodeData, serde_json::Error> {
        Ok(match kind {
            NodeKind::Page => NodeData::Page(serde_json::from_value(value)?),
            NodeKind::Region => NodeData::Region(serde_json::from_value(value)?),
            NodeKind::Line => NodeData::Line(serde_json::from_value(value)?),
            NodeKind::Word => NodeData::Word(serde_json::from_value(value)?),
            NodeKind::Entity => NodeData::Entity(serde_json::from_value(value)?),
            NodeKind::Sentence => NodeData::Sentence(serde_json::from_value(value)?),
            NodeKind::Hyphenation => NodeData::Hyphenation(serde_json::from_value(value)?),
            NodeKind::Commentary => {
                return Err(serde::de::Error::custom(
                    "a commentary cannot be stored in a flat list",
                ));
            }
        })
    }

    /// Minimal persisted fields of the node.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            NodeData::Page(record) => serde_json::to_value(record),
            NodeData::Region(record) => serde_json::to_value(record),
            NodeData::Line(record) => serde_json::to_value(record),
            NodeData::Word(record) => serde_json::to_value(record),
            NodeData::Entity(record) => serde_json::to_value(record),
            NodeData::Sentence(record) => serde_json::to_value(record),
            NodeData::Hyphenation(record) => serde_json::to_value(record),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Page(_) => NodeKind::Page,
            NodeData::Region(_) => NodeKind::Region,
            NodeData::Line(_) => NodeKind::Line,
            NodeData::Word(_) => NodeKind::Word,
            NodeData::Entity(_) => NodeKind::Entity,
            NodeData::Sentence(_) => NodeKind::Sentence,
            NodeData::Hyphenation(_) => NodeKind::Hyphenation,
        }
    }

    /// The stored word range. Words have none: theirs is derived from their index.
    pub fn stored_word_range(&self) -> Option<WordRange> {
        match self {
            NodeData::Page(r) => Some(r.word_range),
            NodeData::Region(r) => Some(r.word_range),
            NodeData::Line(r) => Some(r.word_range),
            NodeData::Word(_) => None,
            NodeData::Entity(r) => Some(r.word_range),
            NodeData::Sentence(r) => Some(r.word_range),
            NodeData::Hyphenation(r) => Some(r.word_range),
        }
    }

    pub fn shifts(&self) -> Option<Shifts> {
        match self {
            NodeData::Entity(r) => Some(r.shifts),
            NodeData::Sentence(r) => Some(r.shifts),
            NodeData::Hyphenation(r) => Some(r.shifts),
            _ => None,
        }
    }
}

impl From<PageRecord> for NodeData {
    fn from(record: PageRecord) -> Self {
        NodeData::Page(record)
    }
}

impl From<RegionRecord> for NodeData {
    fn from(record: RegionRecord) -> Self {
        NodeData::Region(record)
    }
}

impl From<LineRecord> for NodeData {
    fn from(record: LineRecord) -> Self {
        NodeData::Line(record)
    }
}

impl From<WordRecord> for NodeData {
    fn from(record: WordRecord) -> Self {
        NodeData::Word(record)
    }
}

impl From<EntityRecord> for NodeData {
    fn from(record: EntityRecord) -> Self {
        NodeData::Entity(record)
    }
}

impl From<SentenceRecord> for NodeData {
    fn from(record: SentenceRecord) -> Self {
        NodeData::Sentence(record)
    }
}

impl From<HyphenationRecord> for NodeData {
    fn from(record: HyphenationRecord) -> Self {
        NodeData::Hyphenation(record)
    }
}

/// Derived attributes of a node, each computed at most once.
///
/// Relation slots are indexed by `NodeKind::slot` and hold positions in the
/// corresponding flat list.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeCache {
    pub(crate) id: LazyAttr<String>,
    pub(crate) bbox: LazyAttr<Option<BoundingBox>>,
    pub(crate) parents: [LazyAttr<Option<usize>>; CHILD_KIND_COUNT],
    pub(crate) children: [LazyAttr<Vec<usize>>; CHILD_KIND_COUNT],
}

/// A node of a commentary's flat lists.
#[derive(Debug, Clone)]
pub struct TextContainer {
    data: NodeData,
    pub(crate) cache: NodeCache,
}

impl TextContainer {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            cache: NodeCache::default(),
        }
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        self.data.to_json()
    }
}
