/*!
 * Borrowed views of text containers.
 *
 * A `TextContainerRef` addresses one node by `(kind, index)` inside its
 * commentary. It implements, once for every kind, the derived attributes of
 * a text container: id, word range, children, parents, box, text and image.
 * Derived values are cached in the node itself, so each is computed at most
 * once per loaded commentary.
 */

use log::trace;
use serde_json::Value;
use std::fmt;

use super::children::Children;
use super::commentary::{Commentary, Image};
use super::geometry::BoundingBox;
use super::imaging::ImageBackend;
use super::node::{NodeData, NodeKind, TextContainer, WordRecord};
use super::range::WordRange;
use super::region_type::RegionType;
use crate::errors::ModelError;

/// A node seen from its owning commentary.
#[derive(Clone, Copy)]
pub struct TextContainerRef<'a> {
    commentary: &'a Commentary,
    children: &'a Children,
    kind: NodeKind,
    index: usize,
    node: &'a TextContainer,
}

impl<'a> TextContainerRef<'a> {
    pub(crate) fn new(
        commentary: &'a Commentary,
        children: &'a Children,
        kind: NodeKind,
        index: usize,
    ) -> Option<Self> {
        let node = children.of_kind(kind).get(index)?;
        Some(Self {
            commentary,
            children,
            kind,
            index,
            node,
        })
    }

    /// The commentary owning this node.
    pub fn commentary(&self) -> &'a Commentary {
        self.commentary
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Position of the node in its kind's flat list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn data(&self) -> &'a NodeData {
        self.node.data()
    }

    /// The node's id: explicit for pages, `<kind>_<index>` otherwise.
    pub fn id(&self) -> &'a str {
        let node = self.node;
        match node.data() {
            NodeData::Page(page) => page.id.as_str(),
            _ => node
                .cache
                .id
                .get_or_compute(|| format!("{}_{}", self.kind, self.index))
                .as_str(),
        }
    }

    pub fn word_range(&self) -> WordRange {
        self.node
            .data()
            .stored_word_range()
            .unwrap_or_else(|| WordRange::single(self.index))
    }

    pub fn region_type(&self) -> Option<RegionType> {
        match self.node.data() {
            NodeData::Region(region) => Some(region.region_type),
            _ => None,
        }
    }

    /// The literal text of a word, `None` for other kinds.
    pub fn word_text(&self) -> Option<&'a str> {
        match self.node.data() {
            NodeData::Word(word) => Some(&word.text),
            _ => None,
        }
    }

    fn same_node(&self, kind: NodeKind, index: usize) -> bool {
        self.kind == kind && self.index == index
    }

    fn word_record(&self, index: usize) -> Option<&'a WordRecord> {
        match self.children.of_kind(NodeKind::Word).get(index)?.data() {
            NodeData::Word(word) => Some(word),
            _ => None,
        }
    }

    fn view(&self, kind: NodeKind, index: usize) -> Option<TextContainerRef<'a>> {
        TextContainerRef::new(self.commentary, self.children, kind, index)
    }

    fn check_children_query(&self, kind: NodeKind) -> Result<usize, ModelError> {
        if self.kind == NodeKind::Word {
            return Err(ModelError::UnsupportedOperation {
                kind: NodeKind::Word,
                operation: "children",
            });
        }
        kind.slot().ok_or(ModelError::UnsupportedOperation {
            kind: self.kind,
            operation: "children(commentary)",
        })
    }

    /// Children of `kind`: nodes whose word range lies within this node's.
    ///
    /// Words are a contiguous slice of the word list. Other kinds are found
    /// by scanning their flat list once, then cached. Words have no children.
    pub fn children(&self, kind: NodeKind) -> Result<Vec<TextContainerRef<'a>>, ModelError> {
        let slot = self.check_children_query(kind)?;

        if kind == NodeKind::Word {
            let range = self.word_range();
            return Ok((range.start()..=range.end())
                .filter_map(|index| self.view(NodeKind::Word, index))
                .collect());
        }

        let node = self.node;
        let indices = node.cache.children[slot].get_or_compute(|| {
            trace!("Resolving {} of {}", kind.plural(), self.id());
            self.scan_child_indices(kind)
        });
        Ok(indices
            .iter()
            .filter_map(|&index| self.view(kind, index))
            .collect())
    }

    /// Children of `kind` found by the generic containment scan, bypassing
    /// both the word slice and the cache.
    pub fn scan_children(&self, kind: NodeKind) -> Result<Vec<TextContainerRef<'a>>, ModelError> {
        self.check_children_query(kind)?;
        Ok(self
            .scan_child_indices(kind)
            .into_iter()
            .filter_map(|index| self.view(kind, index))
            .collect())
    }

    fn scan_child_indices(&self, kind: NodeKind) -> Vec<usize> {
        let range = self.word_range();
        (0..self.children.len_of(kind))
            .filter_map(|index| self.view(kind, index))
            .filter(|candidate| {
                candidate.word_range().is_within(&range) && !self.same_node(kind, candidate.index)
            })
            .map(|candidate| candidate.index)
            .collect()
    }

    /// Words of the node. A word's only word is itself.
    pub fn words(&self) -> Result<Vec<TextContainerRef<'a>>, ModelError> {
        if self.kind == NodeKind::Word {
            return Ok(vec![*self]);
        }
        self.children(NodeKind::Word)
    }

    /// First node of `kind` whose word range contains this node's.
    ///
    /// Ties are broken by document order. `Ok(None)` means no such node. The
    /// commentary is not reachable this way, see `commentary()`.
    pub fn parent(&self, kind: NodeKind) -> Result<Option<TextContainerRef<'a>>, ModelError> {
        let Some(slot) = kind.slot() else {
            return Err(ModelError::UnderivableParent(self.id().to_string()));
        };

        let node = self.node;
        let index = node.cache.parents[slot].get_or_compute(|| {
            trace!("Resolving {} parent of {}", kind, self.id());
            let range = self.word_range();
            (0..self.children.len_of(kind))
                .filter_map(|index| self.view(kind, index))
                .find(|candidate| {
                    range.is_within(&candidate.word_range())
                        && !self.same_node(kind, candidate.index)
                })
                .map(|candidate| candidate.index)
        });
        Ok(index.and_then(|index| self.view(kind, index)))
    }

    pub fn page(&self) -> Result<Option<TextContainerRef<'a>>, ModelError> {
        if self.kind == NodeKind::Page {
            return Ok(Some(*self));
        }
        self.parent(NodeKind::Page)
    }

    /// Bounding box of the node.
    ///
    /// Words return their stored box; other kinds the smallest box enclosing
    /// all of their words. A container without words has no geometry.
    pub fn bbox(&self) -> Result<BoundingBox, ModelError> {
        if let NodeData::Word(word) = self.node.data() {
            return Ok(word.bbox);
        }

        let node = self.node;
        let bbox = node.cache.bbox.get_or_compute(|| {
            let range = self.word_range();
            let boxes: Vec<BoundingBox> = (range.start()..=range.end())
                .filter_map(|index| self.word_record(index))
                .map(|word| word.bbox)
                .collect();
            BoundingBox::enclosing(&boxes)
        });
        bbox.ok_or_else(|| ModelError::NoGeometry {
            id: self.id().to_string(),
        })
    }

    /// Text of the words spanned by the node, joined by single spaces.
    pub fn joined_text(&self) -> String {
        let range = self.word_range();
        self.joined_words(range.start(), range.end())
    }

    /// The node's text.
    ///
    /// Annotations refine the joined text of their words with their shifts.
    pub fn text(&self) -> String {
        if let Some(text) = self.word_text() {
            return text.to_string();
        }
        let joined = self.joined_text();
        match self.node.data().shifts() {
            Some(shifts) => shifts.apply(&joined),
            None => joined,
        }
    }

    /// Text of the node's words with `window` extra words on each side.
    pub fn text_window(&self, window: usize) -> String {
        let range = self.word_range();
        let last = self.children.word_count().saturating_sub(1);
        let start = range.start().saturating_sub(window);
        let end = range.end().saturating_add(window).min(last);
        self.joined_words(start, end)
    }

    fn joined_words(&self, start: usize, end: usize) -> String {
        (start..=end)
            .filter_map(|index| self.word_record(index))
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The image of the page this node is printed on.
    pub fn page_image(&self) -> Result<&'a Image, ModelError> {
        let commentary = self.commentary;
        match self.page()? {
            Some(page) => commentary
                .image(page.id())?
                .ok_or_else(|| ModelError::MissingImage(page.id().to_string())),
            None => Err(ModelError::MissingImage(self.id().to_string())),
        }
    }

    /// Pixels of the node: the whole image for a page, a crop of its page's
    /// image to the node's box otherwise.
    pub fn image<B: ImageBackend>(&self, backend: &B) -> Result<B::Matrix, ModelError> {
        let page_image = self.page_image()?;
        let matrix = backend.load(&page_image.path)?;
        if self.kind == NodeKind::Page {
            return Ok(matrix);
        }
        Ok(backend.crop(&matrix, &self.bbox()?, 0))
    }

    /// Minimal persisted fields of the node.
    pub fn to_json(&self) -> Result<Value, ModelError> {
        Ok(self.node.to_json()?)
    }
}

impl PartialEq for TextContainerRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.commentary, other.commentary)
            && self.kind == other.kind
            && self.index == other.index
    }
}

impl Eq for TextContainerRef<'_> {}

impl fmt::Debug for TextContainerRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextContainerRef")
            .field("id", &self.id())
            .field("word_range", &self.word_range())
            .field("data", self.node.data())
            .finish()
    }
}
