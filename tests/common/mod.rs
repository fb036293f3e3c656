/*!
 * Common test utilities for the canonical commentary test suite
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A two-page commentary with one region, line and annotation of each kind per page
pub fn sample_document() -> Value {
    json!({
        "metadata": {"id": "Wecklein1894", "ocr_run": "tess_base"},
        "images": [
            {"id": "Wecklein1894_0007", "word_range": [0, 3]},
            {"id": "Wecklein1894_0008", "word_range": [4, 6]}
        ],
        "textcontainers": {
            "pages": [
                {"id": "Wecklein1894_0007", "word_range": [0, 3]},
                {"id": "Wecklein1894_0008", "word_range": [4, 6]}
            ],
            "regions": [
                {"word_range": [0, 1], "region_type": "running_header"},
                {"word_range": [2, 3], "region_type": "commentary"},
                {"word_range": [4, 6], "region_type": "commentary"}
            ],
            "lines": [
                {"word_range": [0, 1]},
                {"word_range": [2, 3]},
                {"word_range": [4, 6]}
            ],
            "words": [
                {"bbox": [[100, 20], [180, 40]], "text": "ΑΙΑΣ"},
                {"bbox": [[190, 22], [210, 40]], "text": "7"},
                {"bbox": [[20, 80], [60, 100]], "text": "1."},
                {"bbox": [[70, 78], [150, 101]], "text": "Ἀθηνᾶς"},
                {"bbox": [[20, 30], [55, 52]], "text": "2."},
                {"bbox": [[60, 28], [120, 50]], "text": "πεῖραν"},
                {"bbox": [[125, 31], [170, 49]], "text": "ἐχθρῶν,"}
            ],
            "entities": [
                {
                    "word_range": [3, 3],
                    "shifts": [0, -1],
                    "transcript": null,
                    "entity_type": "pers",
                    "wikidata_id": "Q37122"
                }
            ],
            "sentences": [
                {
                    "word_range": [2, 6],
                    "shifts": [0, -1],
                    "corrupted": false,
                    "incomplete_continuing": false,
                    "incomplete_truncated": null
                }
            ],
            "hyphenations": [
                {"word_range": [5, 6], "shifts": [0, -1]}
            ]
        }
    })
}

/// Writes the sample document at the conventional `<base>/canonical/v2/<run>.json` location
pub fn write_sample_commentary(base_dir: &Path) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(&sample_document())?;
    create_test_file(base_dir, "canonical/v2/tess_base.json", &content)
}
