//! §4.4.1 — the modified Yjs tie-break used by this library by default.

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

        // oleft == left: o is a direct sibling of the new item.
        let oright = doc.right_index(o.origin_right, Some(i))?;
        if oright < right {
            scanning = true;
        } else if oright == right {
            if doc.agent(item.id.agent) < doc.agent(o.id.agent) {
                break;
            }
            scanning = false;
        } else {
            scanning = false;
        }

        i += 1;
        if !scanning {
            dest = i;
        }
    }

    doc.content_mut().insert(dest, item);
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::id::AgentId;

    #[test]
    fn sequential_inserts_stay_in_order() {
        let mut doc: Document<char> = Document::new(Algorithm::YjsMod);
        let a: AgentId = "a".into();
        doc.local_insert(&a, 0, 'a').unwrap();
        doc.local_insert(&a, 1, 'b').unwrap();
        doc.local_insert(&a, 2, 'c').unwrap();
        assert_eq!(doc.get_array(), vec![&'a', &'b', &'c']);
    }

    #[test]
    fn concurrent_inserts_at_same_position_tiebreak_ascending_agent() {
        let mut a_doc: Document<char> = Document::new(Algorithm::YjsMod);
        let a: AgentId = "a".into();
        let b: AgentId = "b".into();
        a_doc.local_insert(&a, 0, 'a').unwrap();

        let mut b_doc: Document<char> = Document::new(Algorithm::YjsMod);
        b_doc.local_insert(&b, 0, 'b').unwrap();

        crate::merge::merge_into(&mut a_doc, &b_doc).unwrap();
        assert_eq!(a_doc.get_array(), vec![&'a', &'b']);
    }

    #[test]
    fn backward_interleaving_chains_stay_contiguous() {
        // Each insert's right origin points to the previous one; left is absent.
        let mut a: Document<char> = Document::new(Algorithm::YjsMod);
        let agent_a: AgentId = "a".into();
        let id0 = a.local_insert(&agent_a, 0, 'a').unwrap();
        let _ = id0;
        // Simulate a chain a2<-a1<-a0 by inserting always at position 0.
        a.local_insert(&agent_a, 0, 'a').unwrap();
        a.local_insert(&agent_a, 0, 'a').unwrap();

        let mut b: Document<char> = Document::new(Algorithm::YjsMod);
        let agent_b: AgentId = "b".into();
        b.local_insert(&agent_b, 0, 'b').unwrap();
        b.local_insert(&agent_b, 0, 'b').unwrap();
        b.local_insert(&agent_b, 0, 'b').unwrap();

        crate::merge::merge_into(&mut a, &b).unwrap();
        let merged: String = a.get_array().into_iter().collect();
        assert!(merged == "aaabbb" || merged == "bbbaaa");
    }
}
