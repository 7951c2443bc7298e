//! §4.4.3 — RGA / Automerge ordering. Only `origin_left` is consulted;
//! concurrent siblings (same parent) are ordered by `seq` descending, then
//! `agent` ascending.

use crate::document::Document;
use crate::error::Error;
use crate::item::Item;

pub fn integrate<T: Clone>(
    doc: &mut Document<T>,
    item: Item<T>,
    hint: Option<usize>,
) -> Result<usize, Error> {
    let parent = doc.locate(item.origin_left, hint, false)?;
    let mut i = (parent + 1) as usize;

    while i < doc.content().len() {
        let o = doc.content()[i].clone();

        // Optimization (§4.4.3): the decision is already determined in
        // favor of stopping, skip computing oparent entirely.
        if item.seq > o.seq {
            break;
        }

        let oparent = doc.locate(o.origin_left, Some(i), false)?;
        if oparent < parent {
            break;
        }
        if oparent > parent {
            i += 1;
            continue;
        }

        // oparent == parent: concurrent siblings.
        if item.seq == o.seq && doc.agent(item.id.agent) < doc.agent(o.id.agent) {
            break;
        }
        i += 1;
    }

    doc.content_mut().insert(i, item);
    Ok(i)
}
