//! §4.4.4 — Sync9's split-marker ordering.
//!
//! A parent that already carries content gets cloned into a content-absent
//! "marker" sharing its id the first time a child wants to attach to its
//! before-anchor; the marker becomes that anchor from then on. After/before
//! children are otherwise ordered exactly like RGA siblings: agent
//! ascending.

use crate::document::Document;
use crate::error::Error;
use crate::id::Id;
use crate::item::Item;

pub fn integrate<T: Clone>(
    doc: &mut Document<T>,
    item: Item<T>,
    hint: Option<usize>,
) -> Result<usize, Error> {
    let origin_left = item.origin_left;
    let insert_after = item.insert_after;

    if !insert_after && !origin_left.is_none() {
        let anchor = doc.locate(origin_left, hint, false)?;
        if anchor >= 0 {
            let anchor_idx = anchor as usize;
            if doc.content()[anchor_idx].content.is_some() {
                let parent = doc.content()[anchor_idx].clone();
                let marker: Item<T> = Item {
                    content: None,
                    id: parent.id,
                    origin_left: parent.origin_left,
                    origin_right: Id::none(),
                    seq: 0,
                    insert_after: parent.insert_after,
                    is_deleted: false,
                };
                doc.content_mut().insert(anchor_idx, marker);
            }
        }
    }

    let anchor = doc.locate(origin_left, hint, insert_after)?;
    let mut i = (anchor + 1) as usize;

    while i < doc.content().len() {
        let o = doc.content()[i].clone();
        let o_anchor = doc.locate(o.origin_left, Some(i), o.insert_after)?;

        if o_anchor < anchor {
            break;
        }
        if o_anchor > anchor {
            i += 1;
            continue;
        }

        // o_anchor == anchor: direct sibling of the same unsplit parent (this
        // only arises for the virtual root, since a real split parent's
        // before/after sides have distinct marker/content anchor indices).
        // Before-siblings always sort ahead of after-siblings.
        if o.insert_after != insert_after {
            if insert_after {
                i += 1;
                continue;
            } else {
                break;
            }
        }
        if doc.agent(item.id.agent) < doc.agent(o.id.agent) {
            break;
        }
        i += 1;
    }

    doc.content_mut().insert(i, item);
    Ok(i)
}
