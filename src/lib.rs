/*!
 * # Canonical Commentary
 *
 * A Rust library for the canonical text model of OCR'd historical commentaries.
 *
 * ## Features
 *
 * - Load and save canonical json documents
 * - Pages, regions, lines and words, plus entity, sentence and hyphenation annotations
 * - Parents and children rebuilt on demand from word ranges, then cached
 * - Bounding boxes aggregated from word boxes
 * - Page image access through a pluggable imaging backend
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `model`: The text-container model:
 *   - `model::commentary`: The root aggregate owning every flat node list
 *   - `model::container`: Node views resolving relations, boxes and text
 *   - `model::canonical`: Canonical json loading and saving
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod model;

// Re-export main types for easier usage
pub use app_config::{Config, LayoutConfig};
pub use errors::{AppError, ModelError};
pub use model::{BoundingBox, Children, Commentary, Image, NodeKind, TextContainerRef, WordRange};
