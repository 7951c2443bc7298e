//! The flat-array document shared by YjsClassic, YjsMod, RGA, and Sync9.
//!
//! Fugue uses a different backing representation; see [`crate::fugue`].

use crate::algorithm::Algorithm;
use crate::error::Error;
use crate::generator;
use crate::id::{AgentId, AgentIdx, Id, UserTable};
use crate::item::{Item, ItemRecord};
use crate::kernel;
use crate::list_crdt::ListCrdt;
use crate::version::Version;

/// The width of the window scanned around a lookup hint before falling
/// back to a full linear scan (§9 "Item search").
const HINT_WINDOW: usize = 8;

#[derive(Clone)]
pub struct Document<T> {
    pub(crate) algorithm: Algorithm,
    pub(crate) content: Vec<Item<T>>,
    pub(crate) version: Version,
    pub(crate) users: UserTable,
    /// Max `seq` field observed across all items (RGA only).
    pub(crate) max_seq: u64,
    length: u64,
}

impl<T: Clone> Document<T> {
    pub fn new(algorithm: Algorithm) -> Self {
        Document {
            algorithm,
            content: Vec::new(),
            version: Version::new(),
            users: UserTable::new(),
            max_seq: 0,
            length: 0,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn content(&self) -> &[Item<T>] {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Vec<Item<T>> {
        &mut self.content
    }

    pub fn users(&self) -> &UserTable {
        &self.users
    }

    /// Interns `agent`, returning its compact index. Exposed so callers
    /// constructing foreign [`Item`]s by hand (tests, adapters) can build
    /// valid [`Id`]s without going through [`Document::local_insert`].
    pub fn intern_agent(&mut self, agent: &AgentId) -> AgentIdx {
        self.users.get_or_insert(agent)
    }

    pub fn get_array(&self) -> Vec<&T> {
        self.content
            .iter()
            .filter(|item| item.is_visible())
            .filter_map(|item| item.content.as_ref())
            .collect()
    }

    fn agent_error(&self, agent: AgentIdx) -> AgentId {
        self.users
            .id(agent)
            .cloned()
            .unwrap_or_else(|| AgentId::from(format!("<agent#{}>", agent.0)))
    }

    /// Resolves an interned agent index back to its stable identifier.
    /// Integration kernels tie-break concurrent inserts on this rather than
    /// on `AgentIdx` directly — `AgentIdx` is assigned in per-document
    /// interning order, which two peers can assign differently for the same
    /// agent, silently reversing a tie-break and breaking convergence (§5,
    /// §8).
    pub(crate) fn agent(&self, idx: AgentIdx) -> &AgentId {
        self.users.id(idx).expect("item agent interned before reaching a kernel")
    }

    /// §4.1: visible position -> content-array index. `stick_to_end` biases
    /// landing on the first absent/deleted index at a boundary rather than
    /// skipping past it (used by Sync9).
    pub fn visible_index(&self, pos: u64, stick_to_end: bool) -> Result<usize, Error> {
        if pos > self.length {
            return Err(Error::PositionOutOfRange { pos, len: self.length });
        }
        let mut remaining = pos;
        for (i, item) in self.content.iter().enumerate() {
            if item.is_visible() {
                if remaining == 0 {
                    return Ok(i);
                }
                remaining -= 1;
            } else if stick_to_end && remaining == 0 {
                return Ok(i);
            }
        }
        Ok(self.content.len())
    }

    /// The visible neighbors a local insert at `pos` would observe: the id
    /// of the visible item immediately to the left (absent at `pos == 0`)
    /// and immediately to the right (absent at `pos == length`).
    pub fn visible_neighbors(&self, pos: u64) -> Result<(Id, Id), Error> {
        if pos > self.length {
            return Err(Error::PositionOutOfRange { pos, len: self.length });
        }
        let mut seen = 0u64;
        let mut left = Id::none();
        for item in &self.content {
            if !item.is_visible() {
                continue;
            }
            if seen == pos {
                return Ok((left, item.id));
            }
            left = item.id;
            seen += 1;
        }
        Ok((left, Id::none()))
    }

    /// §4.2: id lookup with hint, composing hint exact-match, a small
    /// window scan, then a full linear fallback. Returns `-1` for
    /// `Id::none()` ("before position 0"). `require_content` is Sync9's
    /// "atEnd" variant: split markers (content-absent) never match.
    pub fn locate(
        &self,
        id: Id,
        hint: Option<usize>,
        require_content: bool,
    ) -> Result<isize, Error> {
        if id.is_none() {
            return Ok(-1);
        }
        let matches = |item: &Item<T>| item.id == id && (!require_content || item.content.is_some());

        if let Some(h) = hint {
            if h < self.content.len() && matches(&self.content[h]) {
                return Ok(h as isize);
            }
            let lo = h.saturating_sub(HINT_WINDOW);
            let hi = (h + HINT_WINDOW).min(self.content.len());
            for i in lo..hi {
                if matches(&self.content[i]) {
                    return Ok(i as isize);
                }
            }
        }
        self.content
            .iter()
            .position(matches)
            .map(|i| i as isize)
            .ok_or(Error::NotFound(id))
    }

    /// `index(origin_right)` per §4.4: its own index, or `content.len()`
    /// ("length") if absent.
    pub(crate) fn right_index(&self, origin_right: Id, hint: Option<usize>) -> Result<isize, Error> {
        if origin_right.is_none() {
            return Ok(self.content.len() as isize);
        }
        self.locate(origin_right, hint, false)
    }

    fn check_prelude(&self, item: &Item<T>) -> Result<(), Error> {
        if !self.version.is_next(item.id) {
            let expected = self.version.last_seq(item.id.agent).map(|s| s + 1).unwrap_or(0);
            return Err(Error::CausalGap {
                agent: self.agent_error(item.id.agent),
                expected,
                got: item.id.seq,
            });
        }
        if !item.origin_left.is_none() && !self.version.contains(item.origin_left) {
            return Err(Error::UnknownOrigin(item.origin_left));
        }
        if !item.origin_right.is_none() && !self.version.contains(item.origin_right) {
            return Err(Error::UnknownOrigin(item.origin_right));
        }
        Ok(())
    }

    /// Admit a foreign or freshly generated item, running the prelude
    /// (§4.4) then the algorithm's integration kernel. Returns the final
    /// content-array index.
    pub fn integrate(&mut self, item: Item<T>, hint: Option<usize>) -> Result<usize, Error> {
        self.check_prelude(&item)?;
        self.version.advance(item.id);
        if self.algorithm.uses_seq_ordering() {
            self.max_seq = self.max_seq.max(item.seq);
        }
        let visible = item.is_visible();
        let idx = match self.algorithm {
            Algorithm::YjsClassic => kernel::yjs_classic::integrate(self, item, hint)?,
            Algorithm::YjsMod => kernel::yjs_mod::integrate(self, item, hint)?,
            Algorithm::Rga => kernel::rga::integrate(self, item, hint)?,
            Algorithm::Sync9 => kernel::sync9::integrate(self, item, hint)?,
        };
        if visible {
            self.length += 1;
        }
        Ok(idx)
    }

    pub fn local_insert(&mut self, agent: &AgentId, pos: u64, content: T) -> Result<Id, Error> {
        let agent_idx = self.users.get_or_insert(agent);
        let next_seq = self.version.last_seq(agent_idx).map(|s| s + 1).unwrap_or(0);
        let id = Id::new(agent_idx, next_seq);
        let (item, hint) = generator::generate(self, id, pos, content)?;
        let result_id = item.id;
        self.integrate(item, hint)?;
        Ok(result_id)
    }

    pub fn local_delete(&mut self, pos: u64) -> Result<Id, Error> {
        let idx = self.visible_index(pos, false)?;
        if idx >= self.content.len() || !self.content[idx].is_visible() {
            return Err(Error::PositionOutOfRange { pos, len: self.length });
        }
        self.content[idx].is_deleted = true;
        self.length -= 1;
        Ok(self.content[idx].id)
    }

    /// Converts an interned item into the language-independent wire shape
    /// (§6), resolving agent indices back to agent strings.
    pub fn to_record(&self, item: &Item<T>) -> ItemRecord<T> {
        let agent_name = |idx: AgentIdx| self.users.id(idx).map(|a| a.as_str().to_string());
        ItemRecord {
            agent: agent_name(item.id.agent).unwrap_or_default(),
            seq: item.id.seq,
            origin_left_agent: agent_name(item.origin_left.agent),
            origin_left_seq: (!item.origin_left.is_none()).then_some(item.origin_left.seq),
            origin_right_agent: agent_name(item.origin_right.agent),
            origin_right_seq: (!item.origin_right.is_none()).then_some(item.origin_right.seq),
            item_seq: self.algorithm.uses_seq_ordering().then_some(item.seq),
            insert_after: self.algorithm.uses_insert_after().then_some(item.insert_after),
            content_present: item.content.is_some(),
            content: item.content.clone(),
        }
    }

    /// Interns a wire record's agent strings, producing an [`Item`] ready
    /// to hand to [`Document::integrate`].
    pub fn from_record(&mut self, record: &ItemRecord<T>) -> Item<T> {
        let agent: AgentId = record.agent.clone().into();
        let agent_idx = self.users.get_or_insert(&agent);
        let origin_left = match (&record.origin_left_agent, record.origin_left_seq) {
            (Some(a), Some(seq)) => Id::new(self.users.get_or_insert(&a.clone().into()), seq),
            _ => Id::none(),
        };
        let origin_right = match (&record.origin_right_agent, record.origin_right_seq) {
            (Some(a), Some(seq)) => Id::new(self.users.get_or_insert(&a.clone().into()), seq),
            _ => Id::none(),
        };
        let mut item = Item::new(
            record.content.clone(),
            Id::new(agent_idx, record.seq),
            origin_left,
            origin_right,
            record.item_seq.unwrap_or(record.seq),
        );
        item.insert_after = record.insert_after.unwrap_or(false);
        item
    }
}

impl<T: Clone> ListCrdt<T> for Document<T> {
    fn version(&self) -> &Version {
        Document::version(self)
    }

    fn visible_len(&self) -> u64 {
        self.length
    }

    fn get_array(&self) -> Vec<&T> {
        Document::get_array(self)
    }

    fn users(&self) -> &crate::id::UserTable {
        Document::users(self)
    }

    fn intern_agent(&mut self, agent: &AgentId) -> AgentIdx {
        Document::intern_agent(self, agent)
    }

    fn items(&self) -> Vec<Item<T>> {
        self.content.clone()
    }

    fn integrate(&mut self, item: Item<T>, hint: Option<usize>) -> Result<usize, Error> {
        Document::integrate(self, item, hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_is_empty() {
        let doc: Document<char> = Document::new(Algorithm::Rga);
        assert_eq!(doc.len(), 0);
        assert!(doc.get_array().is_empty());
    }

    #[test]
    fn local_insert_appends_at_end() {
        let mut doc: Document<char> = Document::new(Algorithm::Rga);
        let a: AgentId = "a".into();
        doc.local_insert(&a, 0, 'x').unwrap();
        doc.local_insert(&a, 1, 'y').unwrap();
        assert_eq!(doc.get_array(), vec![&'x', &'y']);
    }

    #[test]
    fn local_delete_marks_tombstone_and_shrinks_length() {
        let mut doc: Document<char> = Document::new(Algorithm::Rga);
        let a: AgentId = "a".into();
        doc.local_insert(&a, 0, 'x').unwrap();
        doc.local_insert(&a, 1, 'y').unwrap();
        doc.local_delete(0).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_array(), vec![&'y']);
    }

    #[test]
    fn delete_past_end_is_position_out_of_range() {
        let mut doc: Document<char> = Document::new(Algorithm::Rga);
        assert!(matches!(doc.local_delete(0), Err(Error::PositionOutOfRange { .. })));
    }

    #[test]
    fn insert_past_end_is_position_out_of_range() {
        let mut doc: Document<char> = Document::new(Algorithm::Rga);
        let a: AgentId = "a".into();
        assert!(matches!(doc.local_insert(&a, 5, 'x'), Err(Error::PositionOutOfRange { .. })));
    }
}
