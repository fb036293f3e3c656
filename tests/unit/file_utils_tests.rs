/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use canonical_commentary::file_utils::FileManager;
use std::path::Path;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "tess_base.json", "{}")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.json"));
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("a/b/c/run.json");

    FileManager::write_to_file(&target, "{\"x\": 1}")?;

    assert_eq!(FileManager::read_to_string(&target)?, "{\"x\": 1}");
    Ok(())
}

#[test]
fn test_findFiles_shouldWalkRecursivelyInNameOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b/canonical/v2/run.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a/canonical/v2/run.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a/images/png/page.png", "")?;

    let files = FileManager::find_files(temp_dir.path(), "json")?;

    assert_eq!(files.len(), 2);
    assert!(files[0].starts_with(temp_dir.path().join("a")));
    assert!(files[1].starts_with(temp_dir.path().join("b")));
    Ok(())
}

#[test]
fn test_canonicalBaseDir_withCustomLayout_shouldStripAllComponents() {
    let base = FileManager::canonical_base_dir(Path::new("/srv/c/ocr/canonical/run.json"), "ocr/canonical");
    assert_eq!(base.as_deref(), Some(Path::new("/srv/c")));
}
