/*!
 * Canonical json (de)serialization of commentaries.
 *
 * The canonical document stores metadata, page images and one flat list per
 * node kind. Each record only holds the node's minimal fields; the hierarchy
 * is rebuilt from word ranges after loading.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use super::children::Children;
use super::commentary::{Commentary, Image};
use super::node::{NodeData, NodeKind};
use super::range::WordRange;
use crate::app_config::LayoutConfig;
use crate::errors::ModelError;
use crate::file_utils::FileManager;

/// Kinds always written, even when empty.
const ALWAYS_SAVED: [NodeKind; 4] = [NodeKind::Page, NodeKind::Region, NodeKind::Line, NodeKind::Word];

/// Top-level shape of a canonical document.
#[derive(Debug, Deserialize)]
struct CanonicalDocument {
    metadata: Map<String, Value>,
    images: Vec<Value>,
    textcontainers: Map<String, Value>,
}

/// Persisted fields of an image.
#[derive(Debug, Serialize, Deserialize)]
struct ImageRecord {
    id: String,
    word_range: WordRange,
}

impl Commentary {
    /// Load a commentary from a canonical json file, using the default folder layout.
    pub fn from_json_file<P: AsRef<Path>>(json_path: P) -> Result<Self, ModelError> {
        Self::from_json_file_with_layout(json_path, &LayoutConfig::default())
    }

    /// Load a commentary from a canonical json file.
    ///
    /// The base directory is inferred from the folder layout; a file stored
    /// elsewhere uses its own directory as base directory.
    pub fn from_json_file_with_layout<P: AsRef<Path>>(
        json_path: P,
        layout: &LayoutConfig,
    ) -> Result<Self, ModelError> {
        let json_path = json_path.as_ref();
        info!("Importing canonical commentary from {:?}", json_path);

        let content = fs::read_to_string(json_path).map_err(|source| ModelError::Io {
            path: json_path.to_path_buf(),
            source,
        })?;

        let base_dir = match FileManager::canonical_base_dir(json_path, &layout.canonical_dir) {
            Some(base_dir) => base_dir,
            None => {
                let fallback = json_path.parent().map(Path::to_path_buf).unwrap_or_default();
                warn!(
                    "{:?} is not stored in a `{}` folder, assuming {:?} as base directory",
                    json_path, layout.canonical_dir, fallback
                );
                fallback
            }
        };
        info!("Assuming {:?} as base directory", base_dir);

        Self::from_json_str(&content, Some(base_dir), layout)
    }

    /// Load a commentary from canonical json text.
    pub fn from_json_str(
        content: &str,
        base_dir: Option<PathBuf>,
        layout: &LayoutConfig,
    ) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_value(value, base_dir, layout)
    }

    /// Build a commentary from a parsed canonical document.
    ///
    /// Any malformed part aborts the whole load.
    pub fn from_json_value(
        value: Value,
        base_dir: Option<PathBuf>,
        layout: &LayoutConfig,
    ) -> Result<Self, ModelError> {
        let document: CanonicalDocument = serde_json::from_value(value)
            .map_err(|e| ModelError::MalformedDocument(e.to_string()))?;

        let id = match document.metadata.get("id") {
            Some(Value::String(id)) => id.clone(),
            _ => return Err(ModelError::MissingMetadata("id")),
        };
        if !matches!(document.metadata.get("ocr_run"), Some(Value::String(_))) {
            return Err(ModelError::MissingMetadata("ocr_run"));
        }

        // Shell first, children come last in a single assignment
        let mut commentary = Commentary::new(Some(id), None, None, document.metadata)?;
        if let Some(base_dir) = base_dir {
            commentary.set_base_dir(base_dir);
        }

        let images = document
            .images
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                let record: ImageRecord = serde_json::from_value(value).map_err(|e| {
                    ModelError::MalformedDocument(format!("image at position {}: {}", position, e))
                })?;
                let path = layout.image_path(commentary.base_dir(), &record.id);
                Ok(Image::new(record.id, path, record.word_range))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let mut textcontainers = document.textcontainers;
        let mut children = Children::new();
        for kind in NodeKind::CHILD_KINDS {
            let Some(list) = textcontainers.remove(kind.plural()) else {
                debug!("No {} in {}", kind.plural(), commentary.id().unwrap_or_default());
                continue;
            };
            let Value::Array(records) = list else {
                return Err(ModelError::MalformedDocument(format!(
                    "textcontainers.{} is not a list",
                    kind.plural()
                )));
            };
            for (position, record) in records.into_iter().enumerate() {
                let data = NodeData::from_json(kind, record).map_err(|e| ModelError::MalformedRecord {
                    kind,
                    position,
                    message: e.to_string(),
                })?;
                children.push(data);
            }
        }
        for unknown in textcontainers.keys() {
            warn!("Skipping unknown text container list `{}`", unknown);
        }

        commentary.set_images(images)?;
        commentary.set_children(children)?;

        info!(
            "Loaded {} ({} pages, {} words)",
            commentary.id().unwrap_or_default(),
            commentary.children()?.len_of(NodeKind::Page),
            commentary.children()?.word_count()
        );
        Ok(commentary)
    }

    /// The canonical document of this commentary.
    ///
    /// Pages, regions, lines and words are always written; annotation lists
    /// only when they hold nodes.
    pub fn to_json(&self) -> Result<Value, ModelError> {
        let id = self.id().ok_or(ModelError::MissingMetadata("id"))?;
        let ocr_run = self.ocr_run().ok_or(ModelError::MissingMetadata("ocr_run"))?;
        let children = self.children()?;

        let images = match self.images() {
            Ok(images) => images
                .iter()
                .map(|image| {
                    serde_json::to_value(ImageRecord {
                        id: image.id.clone(),
                        word_range: image.word_range,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Err(_) => {
                debug!("{} has no images set, writing an empty image list", id);
                Vec::new()
            }
        };

        let mut textcontainers = Map::new();
        for kind in NodeKind::CHILD_KINDS {
            let nodes = children.of_kind(kind);
            if nodes.is_empty() && !ALWAYS_SAVED.contains(&kind) {
                continue;
            }
            let records = nodes
                .iter()
                .map(|node| node.to_json())
                .collect::<Result<Vec<_>, _>>()?;
            textcontainers.insert(kind.plural().to_string(), Value::Array(records));
        }

        Ok(json!({
            "metadata": {"id": id, "ocr_run": ocr_run},
            "images": images,
            "textcontainers": textcontainers,
        }))
    }

    /// Write the canonical document, pretty-printed.
    ///
    /// Without `output_path`, the file goes to the canonical folder of the
    /// base directory, named after the OCR run. Returns the written path.
    pub fn save(&self, output_path: Option<&Path>) -> Result<PathBuf, ModelError> {
        self.save_with_layout(output_path, &LayoutConfig::default())
    }

    pub fn save_with_layout(
        &self,
        output_path: Option<&Path>,
        layout: &LayoutConfig,
    ) -> Result<PathBuf, ModelError> {
        let data = self.to_json()?;

        let output_path = match output_path {
            Some(path) => path.to_path_buf(),
            None => {
                let base_dir = self.base_dir().ok_or(ModelError::MissingBaseDir)?;
                let ocr_run = self.ocr_run().ok_or(ModelError::MissingMetadata("ocr_run"))?;
                layout.canonical_path(base_dir, ocr_run)
            }
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&data)?;
        fs::write(&output_path, content).map_err(|source| ModelError::Io {
            path: output_path.clone(),
            source,
        })?;

        info!("Saved {} to {:?}", self.id().unwrap_or_default(), output_path);
        Ok(output_path)
    }
}
