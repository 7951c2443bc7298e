//! Local-insert generators (§4.3): map a user-visible position and a
//! content value into an [`Item`] with the right origin fields for the
//! selected algorithm. Generators never splice directly — they hand the
//! item to [`Document::integrate`], which runs the matching kernel.

use crate::algorithm::Algorithm;
use crate::document::Document;
use crate::error::Error;
use crate::id::Id;
use crate::item::Item;

/// Builds the item a local insert at `pos` should become, along with a
/// placement hint for the subsequent `integrate` call.
pub fn generate<T: Clone>(
    doc: &Document<T>,
    id: Id,
    pos: u64,
    content: T,
) -> Result<(Item<T>, Option<usize>), Error> {
    match doc.algorithm() {
        Algorithm::YjsClassic | Algorithm::YjsMod => {
            let (origin_left, origin_right) = doc.visible_neighbors(pos)?;
            let item = Item::new(Some(content), id, origin_left, origin_right, 0);
            let hint = doc.visible_index(pos, false).ok();
            Ok((item, hint))
        }
        Algorithm::Rga => {
            let (origin_left, _origin_right) = doc.visible_neighbors(pos)?;
            let seq = doc.max_seq + 1;
            let item = Item::new(Some(content), id, origin_left, Id::none(), seq);
            let hint = doc.visible_index(pos, false).ok();
            Ok((item, hint))
        }
        Algorithm::Sync9 => generate_sync9(doc, id, pos, content),
    }
}

/// Sync9's generator walks forward across children of the same parent
/// anchor (starting from the visible left neighbor) until it finds the
/// point where descending further would cross into the parent's other
/// subtree, toggling `insert_after` whenever it crosses a split point.
fn generate_sync9<T: Clone>(
    doc: &Document<T>,
    id: Id,
    pos: u64,
    content: T,
) -> Result<(Item<T>, Option<usize>), Error> {
    let (left, _right) = doc.visible_neighbors(pos)?;
    let idx = doc.visible_index(pos, true)?;

    // The new item attaches to the after-anchor of the visible left
    // neighbor if one exists; otherwise it attaches to the before-anchor
    // of whatever item currently sits at the insertion boundary (which may
    // itself force a split in the kernel).
    let (origin_left, insert_after) = if left.is_none() {
        if idx < doc.content().len() {
            (doc.content()[idx].origin_left, false)
        } else {
            (Id::none(), true)
        }
    } else {
        (left, true)
    };

    let mut item = Item::new(Some(content), id, origin_left, Id::none(), 0);
    item.insert_after = insert_after;
    Ok((item, Some(idx)))
}
