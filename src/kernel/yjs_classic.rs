//! §4.4.2 — reference-compatible Yjs/YATA ordering. Same scan structure as
//! [`crate::kernel::yjs_mod`], but the tie-break inside `oleft == left`
//! checks agents before right-origin position, reproducing upstream Yjs's
//! resolution of forward- and back-interleaving.

use crate::document::Document;
use crate::error::Error;
use crate::item::Item;

pub fn integrate<T: Clone>(
    doc: &mut Document<T>,
    item: Item<T>,
    hint: Option<usize>,
) -> Result<usize, Error> {
    let left = doc.locate(item.origin_left, hint, false)?;
    let right = doc.right_index(item.origin_right, hint)?;
    let scan_start = (left + 1) as usize;

    let mut dest = scan_start;
    let mut i = scan_start;
    let mut scanning = false;

    while (i as isize) < right && i < doc.content().len() {
        let o = doc.content()[i].clone();
        let oleft = doc.locate(o.origin_left, Some(i), false)?;

        if oleft < left {
            break;
        }
        if oleft > left {
            i += 1;
            continue;
        }

        // oleft == left: compare agents first.
        if doc.agent(item.id.agent) > doc.agent(o.id.agent) {
            scanning = false;
        } else {
            let oright = doc.right_index(o.origin_right, Some(i))?;
            if oright == right {
                break;
            }
            scanning = true;
        }

        i += 1;
        if !scanning {
            dest = i;
        }
    }

    doc.content_mut().insert(dest, item);
    Ok(dest)
}
