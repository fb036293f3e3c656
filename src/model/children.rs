/*!
 * The flat, per-kind node lists owned by a commentary.
 */

use super::node::{CHILD_KIND_COUNT, NodeData, NodeKind, TextContainer};
use crate::errors::ModelError;

/// Flat ordered lists of every node of a commentary, one per kind.
///
/// Lists are appended to while assembling a commentary and become read-only
/// once handed to `Commentary::set_children`.
#[derive(Debug, Clone, Default)]
pub struct Children {
    lists: [Vec<TextContainer>; CHILD_KIND_COUNT],
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node at the end of its kind's list.
    pub fn push(&mut self, data: impl Into<NodeData>) {
        let data = data.into();
        let slot = Self::slot_of(data.kind());
        self.lists[slot].push(TextContainer::new(data));
    }

    /// Builder-style `push` for several nodes.
    pub fn with<I, D>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeData>,
    {
        for node in nodes {
            self.push(node);
        }
        self
    }

    /// The flat list of `kind`. The commentary kind has no list and yields an empty slice.
    pub fn of_kind(&self, kind: NodeKind) -> &[TextContainer] {
        match kind.slot() {
            Some(slot) => &self.lists[slot],
            None => &[],
        }
    }

    pub fn len_of(&self, kind: NodeKind) -> usize {
        self.of_kind(kind).len()
    }

    pub fn word_count(&self) -> usize {
        self.len_of(NodeKind::Word)
    }

    /// Whether no list holds any node.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Check that every stored word range points into the word list.
    pub fn validate(&self) -> Result<(), ModelError> {
        let word_count = self.word_count();
        for kind in NodeKind::CHILD_KINDS {
            for (position, node) in self.of_kind(kind).iter().enumerate() {
                if let Some(range) = node.data().stored_word_range() {
                    if range.end() >= word_count {
                        return Err(ModelError::WordRangeOutOfBounds {
                            owner: format!("{}_{}", kind, position),
                            start: range.start(),
                            end: range.end(),
                            word_count,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn slot_of(kind: NodeKind) -> usize {
        // NodeData never carries the commentary kind
        kind.slot().unwrap_or(0)
    }
}
