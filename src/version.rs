//! Per-agent version vector: the last `seq` integrated for each agent.

use crate::id::{AgentIdx, Id};
use rustc_hash::FxHashMap;

/// Maps `agent -> last seq integrated`. An agent absent from the map has
/// integrated nothing yet, equivalent to a last-seq of `None`.
#[derive(Clone, Debug, Default)]
pub struct Version {
    last_seq: FxHashMap<AgentIdx, u64>,
}

impl Version {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last seq integrated for `agent`, or `None` if nothing from that
    /// agent has been integrated yet.
    pub fn last_seq(&self, agent: AgentIdx) -> Option<u64> {
        self.last_seq.get(&agent).copied()
    }

    /// `contains(v, id)` per §3: true iff `v[id.agent] >= id.seq`.
    pub fn contains(&self, id: Id) -> bool {
        if id.is_none() {
            return true;
        }
        self.last_seq(id.agent).is_some_and(|seq| seq >= id.seq)
    }

    /// Records `id` as integrated. Callers are expected to have already
    /// validated that `id.seq == last_seq(id.agent) + 1` (or `0` if absent)
    /// via the integration prelude; this just advances the bookkeeping.
    pub fn advance(&mut self, id: Id) {
        if id.is_none() {
            return;
        }
        let entry = self.last_seq.entry(id.agent).or_insert(0);
        *entry = (*entry).max(id.seq);
    }

    /// True iff `id.seq` is exactly the next seq this version expects from
    /// `id.agent` (`0` if nothing has been seen yet).
    pub fn is_next(&self, id: Id) -> bool {
        let expected = match self.last_seq(id.agent) {
            Some(seq) => seq + 1,
            None => 0,
        };
        id.seq == expected
    }

    pub fn merge(&mut self, other: &Version) {
        for (&agent, &seq) in other.last_seq.iter() {
            let entry = self.last_seq.entry(agent).or_insert(0);
            *entry = (*entry).max(seq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_version_contains_nothing_but_none() {
        let v = Version::new();
        assert!(v.contains(Id::none()));
        assert!(!v.contains(Id::new(AgentIdx(0), 0)));
    }

    #[test]
    fn advance_then_contains_prior_seqs() {
        let mut v = Version::new();
        v.advance(Id::new(AgentIdx(0), 2));
        assert!(v.contains(Id::new(AgentIdx(0), 0)));
        assert!(v.contains(Id::new(AgentIdx(0), 2)));
        assert!(!v.contains(Id::new(AgentIdx(0), 3)));
    }

    #[test]
    fn is_next_tracks_first_and_subsequent_seq() {
        let mut v = Version::new();
        let a = AgentIdx(0);
        assert!(v.is_next(Id::new(a, 0)));
        v.advance(Id::new(a, 0));
        assert!(!v.is_next(Id::new(a, 0)));
        assert!(v.is_next(Id::new(a, 1)));
    }

    #[test]
    fn merge_takes_max_per_agent() {
        let mut a = Version::new();
        a.advance(Id::new(AgentIdx(0), 3));
        let mut b = Version::new();
        b.advance(Id::new(AgentIdx(0), 1));
        b.advance(Id::new(AgentIdx(1), 5));
        a.merge(&b);
        assert_eq!(a.last_seq(AgentIdx(0)), Some(3));
        assert_eq!(a.last_seq(AgentIdx(1)), Some(5));
    }
}
