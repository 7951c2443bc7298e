//! Cross-cutting tests for the Fugue tree backend (§4.4.5) that don't fit
//! naturally inside `fugue::tree`'s own `#[cfg(test)]` module: interleaving
//! avoidance, multi-peer convergence through `merge::merge_into`, and a
//! save/load round trip through a freshly-loaded document rather than the
//! same one that produced the snapshot.

use list_crdts::fugue::{self, FugueDoc};
use list_crdts::id::AgentId;
use list_crdts::merge::merge_into;

fn agent(name: &str) -> AgentId {
    name.into()
}

/// Forward interleaving: each peer's chain of inserts stays contiguous.
#[test]
fn forward_interleaving_chains_stay_contiguous() {
    let mut a: FugueDoc<char> = FugueDoc::new();
    let agent_a = agent("A");
    a.local_insert(&agent_a, 0, 'a').unwrap();
    a.local_insert(&agent_a, 1, 'a').unwrap();
    a.local_insert(&agent_a, 2, 'a').unwrap();

    let mut b: FugueDoc<char> = FugueDoc::new();
    let agent_b = agent("B");
    b.local_insert(&agent_b, 0, 'b').unwrap();
    b.local_insert(&agent_b, 1, 'b').unwrap();
    b.local_insert(&agent_b, 2, 'b').unwrap();

    merge_into(&mut a, &b).unwrap();
    let merged: String = a.get_array().into_iter().collect();
    assert!(merged == "aaabbb" || merged == "bbbaaa", "{merged}");
}

/// Three peers converge regardless of pairwise merge order.
#[test]
fn three_peer_convergence() {
    let mut a: FugueDoc<char> = FugueDoc::new();
    let agent_a = agent("a");
    for (i, c) in "hello".chars().enumerate() {
        a.local_insert(&agent_a, i as u64, c).unwrap();
    }

    let mut b: FugueDoc<char> = FugueDoc::new();
    let agent_b = agent("b");
    for (i, c) in "world".chars().enumerate() {
        b.local_insert(&agent_b, i as u64, c).unwrap();
    }

    let mut c: FugueDoc<char> = FugueDoc::new();
    let agent_c = agent("c");
    c.local_insert(&agent_c, 0, '!').unwrap();

    let mut forward = a.clone();
    merge_into(&mut forward, &b).unwrap();
    merge_into(&mut forward, &c).unwrap();

    let mut backward = c.clone();
    merge_into(&mut backward, &b).unwrap();
    merge_into(&mut backward, &a).unwrap();

    assert_eq!(forward.get_array(), backward.get_array());
    assert_eq!(forward.len(), 11);
}

#[test]
fn save_load_round_trip_preserves_visible_content_and_tombstones() {
    let mut doc: FugueDoc<char> = FugueDoc::new();
    let a = agent("a");
    doc.local_insert(&a, 0, 'h').unwrap();
    doc.local_insert(&a, 1, 'i').unwrap();
    doc.local_insert(&a, 2, '!').unwrap();
    doc.local_delete(1).unwrap();

    let records = fugue::save(&doc);
    let reloaded = fugue::load(&records).unwrap();

    assert_eq!(reloaded.get_array(), doc.get_array());
    assert_eq!(reloaded.len(), doc.len());
}

#[test]
fn merging_an_unseen_delete_is_fine_but_merging_a_known_items_delete_is_unsupported() {
    let mut a: FugueDoc<char> = FugueDoc::new();
    let agent_a = agent("a");
    a.local_insert(&agent_a, 0, 'x').unwrap();
    a.local_insert(&agent_a, 1, 'y').unwrap();

    let mut b: FugueDoc<char> = FugueDoc::new();
    merge_into(&mut b, &a).unwrap();

    b.local_delete(0).unwrap();
    assert!(matches!(
        merge_into(&mut a, &b),
        Err(list_crdts::Error::UnsupportedOp)
    ));
}
