//! Save/load for [`FugueDoc`] (§4.4.5, closing paragraph): nodes are
//! already held in causal order inside the arena (every node's origins
//! were present before it was pushed), so saving is a straight walk and
//! loading is a straight replay through [`FugueDoc::integrate`].

use crate::error::Error;
use crate::fugue::tree::FugueDoc;
use crate::id::{AgentId, Id};
use crate::item::ItemRecord;

pub fn save<T: Clone>(doc: &FugueDoc<T>) -> Vec<ItemRecord<T>> {
    doc.items()
        .iter()
        .map(|item| {
            let agent_name = |id: Id| {
                if id.is_none() {
                    None
                } else {
                    doc.users().id(id.agent).map(|a| a.as_str().to_string())
                }
            };
            ItemRecord {
                agent: doc
                    .users()
                    .id(item.id.agent)
                    .map(|a| a.as_str().to_string())
                    .unwrap_or_default(),
                seq: item.id.seq,
                origin_left_agent: agent_name(item.origin_left),
                origin_left_seq: (!item.origin_left.is_none()).then_some(item.origin_left.seq),
                origin_right_agent: agent_name(item.origin_right),
                origin_right_seq: (!item.origin_right.is_none()).then_some(item.origin_right.seq),
                item_seq: None,
                insert_after: None,
                content_present: item.content.is_some(),
                content: item.content.clone(),
            }
        })
        .collect()
}

/// Rebuilds a document from records produced by [`save`]. `records` must
/// already be topologically ordered on `originLeft`/`originRight` — the
/// order [`save`] itself produces.
pub fn load<T: Clone>(records: &[ItemRecord<T>]) -> Result<FugueDoc<T>, Error> {
    let mut doc = FugueDoc::new();
    for record in records {
        let agent: AgentId = record.agent.clone().into();
        let agent_idx = doc.intern_agent(&agent);
        let origin_left = match (&record.origin_left_agent, record.origin_left_seq) {
            (Some(a), Some(seq)) => Id::new(doc.intern_agent(&a.clone().into()), seq),
            _ => Id::none(),
        };
        let origin_right = match (&record.origin_right_agent, record.origin_right_seq) {
            (Some(a), Some(seq)) => Id::new(doc.intern_agent(&a.clone().into()), seq),
            _ => Id::none(),
        };
        let item = crate::item::Item::new(
            record.content.clone(),
            Id::new(agent_idx, record.seq),
            origin_left,
            origin_right,
            0,
        );
        doc.integrate(item, None)?;
    }
    Ok(doc)
}
