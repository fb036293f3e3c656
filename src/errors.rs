/*!
 * Error types for the canonical commentary model.
 *
 * This module contains the error types raised while loading, querying and
 * saving commentaries, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

use crate::model::NodeKind;

/// Errors raised by the commentary model
#[derive(Error, Debug)]
pub enum ModelError {
    /// The document does not have the expected top-level shape
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A single flat-list record could not be parsed
    #[error("Malformed {kind} record at position {position}: {message}")]
    MalformedRecord {
        /// Kind of the offending record
        kind: NodeKind,
        /// Position of the record in its flat list
        position: usize,
        /// Parser message
        message: String,
    },

    /// A required metadata field is absent
    #[error("Missing metadata field: {0}")]
    MissingMetadata(&'static str),

    /// A word range whose start lies after its end
    #[error("Invalid word range: start {start} > end {end}")]
    InvalidWordRange { start: usize, end: usize },

    /// A word range pointing past the end of the word list
    #[error("{owner} word range [{start}, {end}] is out of bounds for {word_count} words")]
    WordRangeOutOfBounds {
        owner: String,
        start: usize,
        end: usize,
        word_count: usize,
    },

    /// A bounding box whose corners are inverted
    #[error("Invalid bounding box: [[{x0}, {y0}], [{x1}, {y1}]]")]
    InvalidBoundingBox { x0: i64, y0: i64, x1: i64, y1: i64 },

    /// Children were queried before being set on the commentary
    #[error("Commentary children have not been set")]
    ChildrenNotSet,

    /// Images were queried before being set on the commentary
    #[error("Commentary images have not been set")]
    ImagesNotSet,

    /// The operation makes no sense for this kind of node
    #[error("Unsupported operation `{operation}` on {kind}")]
    UnsupportedOperation {
        kind: NodeKind,
        operation: &'static str,
    },

    /// The commentary cannot be found through word-range containment
    #[error("The commentary of {0} cannot be derived from word ranges, use `commentary()` instead")]
    UnderivableParent(String),

    /// A container without any word to aggregate a box from
    #[error("{id} has no geometry: it contains no words")]
    NoGeometry { id: String },

    /// No image is registered for a page
    #[error("No image found for {0}")]
    MissingImage(String),

    /// Saving to the default location requires a base directory
    #[error("Commentary has no base directory, an explicit output path is required")]
    MissingBaseDir,

    /// Error from a file operation
    #[error("File error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the commentary model
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
