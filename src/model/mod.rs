/*!
 * The canonical commentary model.
 *
 * - `interval`: interval containment predicates
 * - `lazy`: memoized attribute slots
 * - `geometry`: bounding boxes
 * - `range`: word ranges and character shifts
 * - `region_type`: region vocabulary
 * - `node`: node kinds, persisted records and nodes
 * - `children`: the flat per-kind node lists
 * - `commentary`: the root aggregate
 * - `container`: node views resolving parents, children and boxes
 * - `canonical`: canonical json loading and saving
 * - `imaging`: imaging collaborator seam
 */

pub mod interval;
pub mod lazy;
pub mod geometry;
pub mod range;
pub mod region_type;
pub mod node;
pub mod children;
pub mod commentary;
pub mod container;
pub mod canonical;
pub mod imaging;

pub use children::Children;
pub use commentary::{Commentary, Image};
pub use container::TextContainerRef;
pub use geometry::BoundingBox;
pub use imaging::{ImageBackend, crop_window};
pub use interval::{intervals_overlap, is_interval_within};
pub use lazy::LazyAttr;
pub use node::{
    EntityRecord, HyphenationRecord, LineRecord, NodeData, NodeKind, PageRecord, RegionRecord,
    SentenceRecord, TextContainer, WordRecord,
};
pub use range::{Shifts, WordRange};
pub use region_type::RegionType;

#[cfg(test)]
pub(crate) mod test_support;
