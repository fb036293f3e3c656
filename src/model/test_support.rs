//! Small commentary shared by the model's unit tests.

use serde_json::{Map, Value, json};

use super::children::Children;
use super::commentary::{Commentary, Image};
use super::geometry::BoundingBox;
use super::node::{EntityRecord, HyphenationRecord, LineRecord, PageRecord, RegionRecord, SentenceRecord, WordRecord};
use super::range::{Shifts, WordRange};
use super::region_type::RegionType;

pub(crate) fn range(start: usize, end: usize) -> WordRange {
    WordRange::new(start, end).unwrap()
}

pub(crate) fn word(text: &str, x0: i64, y0: i64, x1: i64, y1: i64) -> WordRecord {
    WordRecord {
        bbox: BoundingBox::new(x0, y0, x1, y1).unwrap(),
        text: text.to_string(),
    }
}

pub(crate) fn info(id: &str, ocr_run: &str) -> Map<String, Value> {
    match json!({"id": id, "ocr_run": ocr_run}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// One page, two regions, three lines, six words and one annotation of each kind.
pub(crate) fn sample_children() -> Children {
    Children::new()
        .with([PageRecord {
            id: "sophokle1v3soph_0017".to_string(),
            word_range: range(0, 5),
        }])
        .with([
            RegionRecord {
                word_range: range(0, 2),
                region_type: RegionType::PrimaryText,
            },
            RegionRecord {
                word_range: range(3, 5),
                region_type: RegionType::Commentary,
            },
        ])
        .with([
            LineRecord { word_range: range(0, 2) },
            LineRecord { word_range: range(3, 4) },
            LineRecord { word_range: range(5, 5) },
        ])
        .with([
            word("Αἴας", 10, 10, 50, 30),
            word("v.", 60, 12, 80, 30),
            word("12", 90, 10, 110, 28),
            word("Ajax,", 10, 50, 60, 70),
            word("son", 70, 52, 100, 72),
            word("of", 10, 90, 40, 110),
        ])
        .with([EntityRecord {
            word_range: range(3, 3),
            shifts: Shifts::new(0, -1),
            transcript: Some("Ajax".to_string()),
            entity_type: "pers".to_string(),
            wikidata_id: Some("Q172725".to_string()),
        }])
        .with([SentenceRecord {
            word_range: range(3, 5),
            shifts: Shifts::new(0, 12),
            corrupted: Some(false),
            incomplete_continuing: true,
            incomplete_truncated: None,
        }])
        .with([HyphenationRecord {
            word_range: range(4, 5),
            shifts: Shifts::new(0, -1),
        }])
}

pub(crate) fn sample_commentary() -> Commentary {
    let images = vec![Image::new(
        "sophokle1v3soph_0017",
        "images/png/sophokle1v3soph_0017.png",
        range(0, 5),
    )];
    Commentary::new(
        Some("sophokle1v3soph".to_string()),
        Some(sample_children()),
        Some(images),
        info("sophokle1v3soph", "tess_base"),
    )
    .unwrap()
}
