/*!
 * Parent, child and box resolution through the public API
 */

use anyhow::Result;
use canonical_commentary::errors::ModelError;
use canonical_commentary::model::{
    BoundingBox, Children, Commentary, ImageBackend, LineRecord, NodeKind, RegionRecord,
    RegionType, WordRange, WordRecord, crop_window,
};
use serde_json::Map;
use std::path::Path;
use crate::common;

fn range(start: usize, end: usize) -> WordRange {
    WordRange::new(start, end).unwrap()
}

fn word(text: &str, x0: i64, y0: i64, x1: i64, y1: i64) -> WordRecord {
    WordRecord {
        bbox: BoundingBox::new(x0, y0, x1, y1).unwrap(),
        text: text.to_string(),
    }
}

fn commentary_with(children: Children) -> Commentary {
    Commentary::new(Some("test".to_string()), Some(children), None, Map::new()).unwrap()
}

/// Three words on one line of one region
fn one_line_commentary() -> Commentary {
    commentary_with(
        Children::new()
            .with([word("a", 0, 0, 10, 10), word("b", 12, 0, 20, 10), word("c", 22, 0, 30, 12)])
            .with([LineRecord { word_range: range(0, 2) }])
            .with([RegionRecord {
                word_range: range(0, 2),
                region_type: RegionType::Commentary,
            }]),
    )
}

#[test]
fn test_oneLineCommentary_shouldResolveEveryRelation() -> Result<()> {
    let commentary = one_line_commentary();
    let region = commentary.regions()?[0];
    let line = commentary.lines()?[0];

    assert_eq!(region.children(NodeKind::Line)?, vec![line]);
    assert_eq!(line.parent(NodeKind::Region)?, Some(region));
    for word in commentary.words()? {
        assert_eq!(word.parent(NodeKind::Line)?, Some(line));
        assert_eq!(word.parent(NodeKind::Region)?, Some(region));
    }

    let ids: Vec<&str> = line.words()?.iter().map(|w| w.id()).collect();
    assert_eq!(ids, ["word_0", "word_1", "word_2"]);
    assert_eq!(line.bbox()?, BoundingBox::new(0, 0, 30, 12)?);
    assert_eq!(line.text(), "a b c");
    Ok(())
}

#[test]
fn test_parent_withNoEnclosingNode_shouldBeNone() -> Result<()> {
    let commentary = one_line_commentary();
    let line = commentary.lines()?[0];

    assert_eq!(line.parent(NodeKind::Page)?, None);
    assert_eq!(line.page()?, None);
    assert!(matches!(line.parent(NodeKind::Commentary), Err(ModelError::UnderivableParent(_))));
    Ok(())
}

#[test]
fn test_parent_withAmbiguousCandidates_shouldPickFirstInDocumentOrder() -> Result<()> {
    let commentary = commentary_with(
        Children::new()
            .with([word("a", 0, 0, 10, 10), word("b", 12, 0, 20, 10), word("c", 22, 0, 30, 12)])
            .with([
                RegionRecord { word_range: range(0, 2), region_type: RegionType::Other },
                RegionRecord { word_range: range(0, 1), region_type: RegionType::Title },
            ]),
    );
    let word = commentary.words()?[0];

    let first = word.parent(NodeKind::Region)?.map(|r| r.index());
    let second = word.parent(NodeKind::Region)?.map(|r| r.index());

    assert_eq!(first, Some(0));
    assert_eq!(second, Some(0));

    // The narrower region is still a child of the wider one
    let wide = commentary.regions()?[0];
    let nested: Vec<usize> = wide.children(NodeKind::Region)?.iter().map(|r| r.index()).collect();
    assert_eq!(nested, [1]);
    Ok(())
}

#[test]
fn test_children_shouldMatchContainmentAcrossSampleDocument() -> Result<()> {
    let commentary = Commentary::from_json_value(
        common::sample_document(),
        None,
        &Default::default(),
    )?;

    for container in commentary.pages()?.into_iter().chain(commentary.regions()?) {
        for kind in [NodeKind::Region, NodeKind::Line, NodeKind::Word, NodeKind::Entity] {
            let cached = container.children(kind)?;
            assert_eq!(cached, container.scan_children(kind)?);
            for child in &cached {
                assert!(child.word_range().is_within(&container.word_range()));
            }
        }
    }

    // A sentence spanning both pages belongs to neither
    let sentence = commentary.nodes(NodeKind::Sentence)?[0];
    assert_eq!(sentence.page()?, None);
    assert!(commentary.pages()?[1].children(NodeKind::Sentence)?.is_empty());
    Ok(())
}

#[test]
fn test_children_ofWord_shouldBeUnsupported() -> Result<()> {
    let commentary = one_line_commentary();
    let word = commentary.words()?[1];

    assert!(matches!(
        word.children(NodeKind::Line),
        Err(ModelError::UnsupportedOperation { kind: NodeKind::Word, .. })
    ));
    assert_eq!(word.words()?, vec![word]);
    Ok(())
}

#[test]
fn test_annotations_shouldSliceTextWithShifts() -> Result<()> {
    let commentary = Commentary::from_json_value(
        common::sample_document(),
        None,
        &Default::default(),
    )?;

    let hyphenation = commentary.nodes(NodeKind::Hyphenation)?[0];
    assert_eq!(hyphenation.joined_text(), "πεῖραν ἐχθρῶν,");
    assert_eq!(hyphenation.text(), "πεῖραν ἐχθρῶν");
    assert_eq!(hyphenation.page()?.map(|p| p.id()), Some("Wecklein1894_0008"));

    let entity = commentary.find("entity_0")?.expect("entity_0");
    assert_eq!(entity.text(), "Ἀθηνᾶ");
    assert_eq!(entity.text_window(1), "1. Ἀθηνᾶς 2.");
    assert_eq!(entity.parent(NodeKind::Sentence)?.map(|s| s.id()), Some("sentence_0"));
    Ok(())
}

/// Backend serving a single synthetic page as an in-memory matrix
struct GridBackend;

impl ImageBackend for GridBackend {
    type Matrix = Vec<Vec<u32>>;

    fn load(&self, path: &Path) -> Result<Self::Matrix, ModelError> {
        if !path.ends_with("Wecklein1894_0008.png") {
            return Err(ModelError::MissingImage(path.display().to_string()));
        }
        Ok((0..120).map(|y| (0..240).map(|x| (y * 1000 + x) as u32).collect()).collect())
    }

    fn crop(&self, matrix: &Self::Matrix, bbox: &BoundingBox, margin: i64) -> Self::Matrix {
        let height = matrix.len();
        let width = matrix.first().map_or(0, Vec::len);
        let (rows, cols) = crop_window(bbox, margin, width, height);
        matrix[rows].iter().map(|row| row[cols.clone()].to_vec()).collect()
    }
}

#[test]
fn test_image_ofLine_shouldCropPageImageToLineBox() -> Result<()> {
    let commentary = Commentary::from_json_value(
        common::sample_document(),
        None,
        &Default::default(),
    )?;
    let line = commentary.lines()?[2];

    let pixels = line.image(&GridBackend)?;

    // Line 2 spans [[20, 28], [170, 52]]
    assert_eq!(pixels.len(), 24);
    assert_eq!(pixels[0].len(), 150);
    assert_eq!(pixels[0][0], 28 * 1000 + 20);

    let page = commentary.pages()?[1];
    assert_eq!(page.image(&GridBackend)?.len(), 120);
    assert!(commentary.lines()?[0].image(&GridBackend).is_err());
    Ok(())
}
