/*!
 * The commentary: root aggregate of the text-container model.
 *
 * A commentary owns the flat per-kind node lists and the page images. Nodes
 * are only ever reached through `TextContainerRef` views borrowing the
 * commentary, which plays the role of every node's back-reference.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::children::Children;
use super::container::TextContainerRef;
use super::node::{NodeData, NodeKind};
use super::range::WordRange;
use crate::errors::ModelError;

// @const: Generated node id pattern, `<kind>_<index>`
static NODE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(region|line|word|entity|sentence|hyphenation)_(\d+)$").unwrap()
});

/// A scanned page image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image id, shared with the page it depicts
    pub id: String,
    /// Location of the image file
    pub path: PathBuf,
    /// Words printed on the image
    pub word_range: WordRange,
}

impl Image {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, word_range: WordRange) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            word_range,
        }
    }
}

/// Root of the text-container hierarchy.
///
/// `id`, `children` and `images` cannot be derived and are given at
/// construction; children and images may be deferred and set afterwards.
#[derive(Debug, Clone)]
pub struct Commentary {
    id: Option<String>,
    info: Map<String, Value>,
    base_dir: Option<PathBuf>,
    children: Option<Children>,
    images: Option<Vec<Image>>,
}

impl Commentary {
    /// Create a commentary, validating the children and images that are given.
    pub fn new(
        id: Option<String>,
        children: Option<Children>,
        images: Option<Vec<Image>>,
        info: Map<String, Value>,
    ) -> Result<Self, ModelError> {
        let mut commentary = Self {
            id,
            info,
            base_dir: None,
            children: None,
            images: None,
        };
        if let Some(images) = images {
            commentary.set_images(images)?;
        }
        if let Some(children) = children {
            commentary.set_children(children)?;
        }
        Ok(commentary)
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::Commentary
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Free-form metadata, as found in the document's `metadata` object.
    pub fn info(&self) -> &Map<String, Value> {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.info
    }

    /// Identifier of the OCR run the commentary was produced from.
    pub fn ocr_run(&self) -> Option<&str> {
        self.info.get("ocr_run").and_then(Value::as_str)
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = Some(base_dir.into());
    }

    /// Replace every flat list at once.
    ///
    /// Taking `&mut self` guarantees no node view is alive, and the new nodes
    /// come with empty caches, so no previously derived attribute survives.
    pub fn set_children(&mut self, children: Children) -> Result<(), ModelError> {
        children.validate()?;
        if let Some(images) = &self.images {
            Self::validate_images(images, &children)?;
        }
        debug!(
            "Setting children of {}: {} pages, {} regions, {} lines, {} words",
            self.id().unwrap_or("commentary"),
            children.len_of(NodeKind::Page),
            children.len_of(NodeKind::Region),
            children.len_of(NodeKind::Line),
            children.word_count()
        );
        self.children = Some(children);
        Ok(())
    }

    pub fn set_images(&mut self, images: Vec<Image>) -> Result<(), ModelError> {
        if let Some(children) = &self.children {
            Self::validate_images(&images, children)?;
        }
        self.images = Some(images);
        Ok(())
    }

    pub fn children(&self) -> Result<&Children, ModelError> {
        self.children.as_ref().ok_or(ModelError::ChildrenNotSet)
    }

    pub fn images(&self) -> Result<&[Image], ModelError> {
        self.images.as_deref().ok_or(ModelError::ImagesNotSet)
    }

    pub fn has_images(&self) -> bool {
        self.images.is_some()
    }

    /// Find the image with the given id.
    pub fn image(&self, id: &str) -> Result<Option<&Image>, ModelError> {
        Ok(self.images()?.iter().find(|image| image.id == id))
    }

    /// Every node of `kind`, in document order.
    pub fn nodes(&self, kind: NodeKind) -> Result<Vec<TextContainerRef<'_>>, ModelError> {
        if kind == NodeKind::Commentary {
            return Err(ModelError::UnsupportedOperation {
                kind: NodeKind::Commentary,
                operation: "nodes(commentary)",
            });
        }
        let children = self.children()?;
        Ok((0..children.len_of(kind))
            .filter_map(|index| TextContainerRef::new(self, children, kind, index))
            .collect())
    }

    /// The node of `kind` at `index` in its flat list.
    pub fn node(&self, kind: NodeKind, index: usize) -> Result<Option<TextContainerRef<'_>>, ModelError> {
        let children = self.children()?;
        Ok(TextContainerRef::new(self, children, kind, index))
    }

    pub fn pages(&self) -> Result<Vec<TextContainerRef<'_>>, ModelError> {
        self.nodes(NodeKind::Page)
    }

    pub fn regions(&self) -> Result<Vec<TextContainerRef<'_>>, ModelError> {
        self.nodes(NodeKind::Region)
    }

    pub fn lines(&self) -> Result<Vec<TextContainerRef<'_>>, ModelError> {
        self.nodes(NodeKind::Line)
    }

    pub fn words(&self) -> Result<Vec<TextContainerRef<'_>>, ModelError> {
        self.nodes(NodeKind::Word)
    }

    /// Look a node up by id.
    ///
    /// Pages are matched on their explicit ids; other kinds on their generated
    /// `<kind>_<index>` id.
    pub fn find(&self, id: &str) -> Result<Option<TextContainerRef<'_>>, ModelError> {
        let children = self.children()?;

        if let Some(position) = children
            .of_kind(NodeKind::Page)
            .iter()
            .position(|page| matches!(page.data(), NodeData::Page(p) if p.id == id))
        {
            return Ok(TextContainerRef::new(self, children, NodeKind::Page, position));
        }

        let Some(caps) = NODE_ID_REGEX.captures(id) else {
            return Ok(None);
        };
        let kind: NodeKind = caps[1].parse()?;
        let Ok(index) = caps[2].parse::<usize>() else {
            return Ok(None);
        };
        Ok(TextContainerRef::new(self, children, kind, index))
    }

    /// Words of the whole commentary, joined by single spaces.
    pub fn text(&self) -> Result<String, ModelError> {
        Ok(self
            .words()?
            .iter()
            .filter_map(|word| word.word_text())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Eagerly compute ids, boxes and non-word children of every node.
    ///
    /// Lazy evaluation stays the default; this pass makes every later query a
    /// cache hit. It scans each flat list once per container, so its cost grows
    /// with the product of list sizes.
    pub fn warm_up(&self) -> Result<(), ModelError> {
        for kind in NodeKind::CHILD_KINDS {
            for node in self.nodes(kind)? {
                node.id();
                if kind == NodeKind::Word {
                    continue;
                }
                node.bbox()?;
                for child_kind in NodeKind::CHILD_KINDS {
                    if child_kind != NodeKind::Word {
                        node.children(child_kind)?;
                    }
                }
            }
        }
        debug!("Warmed up caches of {}", self.id().unwrap_or("commentary"));
        Ok(())
    }

    fn validate_images(images: &[Image], children: &Children) -> Result<(), ModelError> {
        let word_count = children.word_count();
        for image in images {
            if image.word_range.end() >= word_count {
                return Err(ModelError::WordRangeOutOfBounds {
                    owner: image.id.clone(),
                    start: image.word_range.start(),
                    end: image.word_range.end(),
                    word_count,
                });
            }
        }
        Ok(())
    }
}
