//! Concrete scenario tests from §8: literal insert sequences with a known
//! expected merged sequence, covering sequential inserts, concurrent root
//! inserts, forward/backward interleaving, tails, and mixed local/
//! concurrent origins. Run across every algorithm the scenario applies to.

use list_crdts::id::AgentId;
use list_crdts::{Algorithm, Document};

fn agent(name: &str) -> AgentId {
    name.into()
}

const ALL_ALGORITHMS: [Algorithm; 4] =
    [Algorithm::YjsClassic, Algorithm::YjsMod, Algorithm::Rga, Algorithm::Sync9];

/// Scenario 1: `A@0:'a' <- null/null; A@1:'b' <- (A,0)/null` -> `[a, b]`.
#[test]
fn scenario_1_sequential_local_inserts() {
    for algo in ALL_ALGORITHMS {
        let mut doc: Document<char> = Document::new(algo);
        let a = agent("A");
        doc.local_insert(&a, 0, 'a').unwrap();
        doc.local_insert(&a, 1, 'b').unwrap();
        assert_eq!(doc.get_array(), vec![&'a', &'b'], "{algo:?}");
    }
}

/// Scenario 2: concurrent `A@0:'a'`, `B@0:'b'` -> `[a, b]` (ascending agent
/// tiebreak; every flat-array algorithm here ties concurrent root siblings
/// ascending per §9).
#[test]
fn scenario_2_concurrent_roots_tiebreak_ascending() {
    for algo in ALL_ALGORITHMS {
        let mut a_doc: Document<char> = Document::new(algo);
        a_doc.local_insert(&agent("A"), 0, 'a').unwrap();

        let mut b_doc: Document<char> = Document::new(algo);
        b_doc.local_insert(&agent("B"), 0, 'b').unwrap();

        list_crdts::merge::merge_into(&mut a_doc, &b_doc).unwrap();
        assert_eq!(a_doc.get_array(), vec![&'a', &'b'], "{algo:?}");
    }
}

/// Scenario 3: forward interleaving. Peer A inserts a chain `'a','a','a'`
/// each depending on the previous via `originLeft`; peer B does the same
/// with `'b'`. Merged, one run sits entirely before the other — no
/// character-level interleaving — for every algorithm (the property holds
/// in the forward direction even for strict Yjs, §8).
#[test]
fn scenario_3_forward_interleaving_stays_contiguous() {
    for algo in ALL_ALGORITHMS {
        let mut a: Document<char> = Document::new(algo);
        let agent_a = agent("A");
        a.local_insert(&agent_a, 0, 'a').unwrap();
        a.local_insert(&agent_a, 1, 'a').unwrap();
        a.local_insert(&agent_a, 2, 'a').unwrap();

        let mut b: Document<char> = Document::new(algo);
        let agent_b = agent("B");
        b.local_insert(&agent_b, 0, 'b').unwrap();
        b.local_insert(&agent_b, 1, 'b').unwrap();
        b.local_insert(&agent_b, 2, 'b').unwrap();

        list_crdts::merge::merge_into(&mut a, &b).unwrap();
        let merged: String = a.get_array().into_iter().collect();
        assert!(merged == "aaabbb" || merged == "bbbaaa", "{algo:?}: {merged}");
    }
}

/// Scenario 4: backward interleaving (YjsMod, RGA, Sync9 — not strict Yjs,
/// §8/§9). Each peer always inserts at position 0, so every item's
/// `originRight` points at the previous one and `originLeft` is absent.
/// Merged, the runs still don't interleave.
#[test]
fn scenario_4_backward_interleaving_stays_contiguous() {
    for algo in [Algorithm::YjsMod, Algorithm::Rga, Algorithm::Sync9] {
        let mut a: Document<char> = Document::new(algo);
        let agent_a = agent("A");
        a.local_insert(&agent_a, 0, 'a').unwrap();
        a.local_insert(&agent_a, 0, 'a').unwrap();
        a.local_insert(&agent_a, 0, 'a').unwrap();

        let mut b: Document<char> = Document::new(algo);
        let agent_b = agent("B");
        b.local_insert(&agent_b, 0, 'b').unwrap();
        b.local_insert(&agent_b, 0, 'b').unwrap();
        b.local_insert(&agent_b, 0, 'b').unwrap();

        list_crdts::merge::merge_into(&mut a, &b).unwrap();
        let merged: String = a.get_array().into_iter().collect();
        assert!(merged == "aaabbb" || merged == "bbbaaa", "{algo:?}: {merged}");
    }
}

/// Scenario 5 ("tails"): each peer inserts a middle item first, then a
/// "before" tail (`originRight` = the middle item) and an "after" tail
/// (`originLeft` = the middle item). Merged, each peer's three-item
/// fragment stays contiguous: `[a0, a, a1, b0, b, b1]` (or the mirror) —
/// checked here as "each peer's own run is an unbroken substring of the
/// merged sequence", since the two peers' runs may land in either order.
#[test]
fn scenario_5_tails_stay_contiguous() {
    for algo in [Algorithm::YjsClassic, Algorithm::YjsMod] {
        let mut a: Document<char> = Document::new(algo);
        let agent_a = agent("A");
        a.local_insert(&agent_a, 0, 'a').unwrap(); // middle: null/null
        a.local_insert(&agent_a, 0, '0').unwrap(); // before-tail: null/(A,0) -> "a0"
        a.local_insert(&agent_a, 2, '1').unwrap(); // after-tail: (A,0)/null -> "a1"
        assert_eq!(a.get_array(), vec![&'0', &'a', &'1'], "{algo:?} peer A shape");

        let mut b: Document<char> = Document::new(algo);
        let agent_b = agent("B");
        b.local_insert(&agent_b, 0, 'b').unwrap(); // middle
        b.local_insert(&agent_b, 0, '2').unwrap(); // before-tail
        b.local_insert(&agent_b, 2, '3').unwrap(); // after-tail
        assert_eq!(b.get_array(), vec![&'2', &'b', &'3'], "{algo:?} peer B shape");

        list_crdts::merge::merge_into(&mut a, &b).unwrap();
        let merged: String = a.get_array().into_iter().collect();
        assert!(merged.contains("0a1"), "{algo:?}: peer A run split apart in {merged}");
        assert!(merged.contains("2b3"), "{algo:?}: peer B run split apart in {merged}");
    }
}

/// Scenario 6: `a@A`, `c@C`, `b@B` all concurrent with absent origins;
/// `d@D <- (A,0)/(C,0)`. Either `[a, d, b, c]` or `[a, b, d, c]` is an
/// acceptable merged order (§8 documents both as equivalent).
#[test]
fn scenario_6_local_vs_concurrent_mixed_origins() {
    let algo = Algorithm::YjsMod;

    let mut a_doc: Document<char> = Document::new(algo);
    a_doc.local_insert(&agent("A"), 0, 'a').unwrap();

    let mut c_doc: Document<char> = Document::new(algo);
    c_doc.local_insert(&agent("C"), 0, 'c').unwrap();

    let mut b_doc: Document<char> = Document::new(algo);
    b_doc.local_insert(&agent("B"), 0, 'b').unwrap();

    // D observes both a and c, then inserts between them.
    let mut d_doc: Document<char> = Document::new(algo);
    list_crdts::merge::merge_into(&mut d_doc, &a_doc).unwrap();
    list_crdts::merge::merge_into(&mut d_doc, &c_doc).unwrap();
    assert_eq!(d_doc.get_array(), vec![&'a', &'c']);
    d_doc.local_insert(&agent("D"), 1, 'd').unwrap();
    assert_eq!(d_doc.get_array(), vec![&'a', &'d', &'c']);

    list_crdts::merge::merge_into(&mut d_doc, &b_doc).unwrap();
    let merged: String = d_doc.get_array().into_iter().collect();
    assert!(merged == "adbc" || merged == "abdc", "got {merged}");
}
