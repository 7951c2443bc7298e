//! Stable agent identity and the `(agent, seq)` pair that names every item.

use rustc_hash::FxHashMap;
use std::fmt;

/// An opaque, stable per-peer identifier.
///
/// Cheap to construct from anything string-like; compared and hashed as a
/// plain byte string. The library never inspects the contents beyond that.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(Box<str>);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Into<String>> From<S> for AgentId {
    fn from(s: S) -> Self {
        AgentId(s.into().into_boxed_str())
    }
}

impl fmt::Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({:?})", self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an interned [`AgentId`] inside a document's [`UserTable`].
///
/// `NONE` plays the role of the "virtual document start/end" agent that
/// shows up wherever an `Id` is allowed to be absent.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AgentIdx(pub u32);

impl AgentIdx {
    pub const NONE: AgentIdx = AgentIdx(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Debug for AgentIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "AgentIdx(none)")
        } else {
            write!(f, "AgentIdx({})", self.0)
        }
    }
}

/// `Id = (agent, seq)`. Equality and ordering are componentwise, agent
/// first, matching the "originLeft as parent" ordering used throughout the
/// integration kernels.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    pub agent: AgentIdx,
    pub seq: u64,
}

impl Id {
    pub fn new(agent: AgentIdx, seq: u64) -> Self {
        Id { agent, seq }
    }

    /// The sentinel standing in for an absent origin (virtual document
    /// start or end, depending on context).
    pub fn none() -> Self {
        Id { agent: AgentIdx::NONE, seq: 0 }
    }

    pub fn is_none(&self) -> bool {
        self.agent.is_none()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Id(none)")
        } else {
            write!(f, "Id({}, {})", self.agent.0, self.seq)
        }
    }
}

impl Default for Id {
    fn default() -> Self {
        Id::none()
    }
}

/// Interns stable [`AgentId`]s into compact [`AgentIdx`]s so items don't
/// repeat the full agent string.
#[derive(Clone, Default)]
pub struct UserTable {
    id_to_idx: FxHashMap<AgentId, AgentIdx>,
    idx_to_id: Vec<AgentId>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing index for `agent`, interning it if new.
    pub fn get_or_insert(&mut self, agent: &AgentId) -> AgentIdx {
        if let Some(&idx) = self.id_to_idx.get(agent) {
            return idx;
        }
        let idx = AgentIdx(self.idx_to_id.len() as u32);
        self.idx_to_id.push(agent.clone());
        self.id_to_idx.insert(agent.clone(), idx);
        idx
    }

    pub fn get(&self, agent: &AgentId) -> Option<AgentIdx> {
        self.id_to_idx.get(agent).copied()
    }

    pub fn id(&self, idx: AgentIdx) -> Option<&AgentId> {
        if idx.is_none() {
            return None;
        }
        self.idx_to_id.get(idx.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.idx_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idx_to_id.is_empty()
    }
}
