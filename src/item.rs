//! The unified item representation shared by every algorithm (§3).
//!
//! A given algorithm only reads a subset of these fields (RGA ignores
//! `origin_right`, the Yjs family and RGA ignore `insert_after`), but a
//! single shape keeps the document, merge driver, and wire format uniform.

use crate::id::Id;

/// A single sequence element.
///
/// `content: None` is the Sync9 "split marker": a zero-width, content-
/// absent anchor created when an existing item must be subdivided to
/// accept a child on its "before" side. Split markers participate in
/// traversal and origin lookups like any other item but are skipped when
/// computing visible length or visible position.
#[derive(Clone, Debug)]
pub struct Item<T> {
    pub content: Option<T>,
    pub id: Id,
    pub origin_left: Id,
    pub origin_right: Id,
    /// Monotonically increasing counter, strictly greater than every seq
    /// the author had observed at generation time. Used by RGA; ignored by
    /// the Yjs family and Sync9.
    pub seq: u64,
    /// Sync9 only: does this item attach to its parent's "after" anchor
    /// (true) or "before" anchor (false)?
    pub insert_after: bool,
    pub is_deleted: bool,
}

impl<T> Item<T> {
    pub fn new(
        content: Option<T>,
        id: Id,
        origin_left: Id,
        origin_right: Id,
        seq: u64,
    ) -> Self {
        Item {
            content,
            id,
            origin_left,
            origin_right,
            seq,
            insert_after: false,
            is_deleted: false,
        }
    }

    /// Visible iff not deleted and content-present.
    pub fn is_visible(&self) -> bool {
        !self.is_deleted && self.content.is_some()
    }
}

/// A language-independent wire record for an [`Item`] (§6), with agent
/// strings in place of interned indices. Convertible to/from `Item` given
/// a document's agent table via [`crate::document::Document::to_record`]
/// and [`crate::document::Document::from_record`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord<T> {
    pub agent: String,
    pub seq: u64,
    pub origin_left_agent: Option<String>,
    pub origin_left_seq: Option<u64>,
    pub origin_right_agent: Option<String>,
    pub origin_right_seq: Option<u64>,
    pub item_seq: Option<u64>,
    pub insert_after: Option<bool>,
    pub content_present: bool,
    pub content: Option<T>,
}
