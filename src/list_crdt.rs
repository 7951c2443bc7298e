//! The trait unifying [`crate::document::Document`] and
//! [`crate::fugue::FugueDoc`] so the merge driver and cross-cutting tests
//! can treat every algorithm uniformly, mirroring the distinction the
//! pedagogy tooling this is grounded on drew between a CRDT's core
//! operations and its backing representation.

use crate::error::Error;
use crate::id::{AgentId, AgentIdx, UserTable};
use crate::item::Item;
use crate::version::Version;

pub trait ListCrdt<T: Clone> {
    fn version(&self) -> &Version;

    fn visible_len(&self) -> u64;

    fn get_array(&self) -> Vec<&T>;

    fn users(&self) -> &UserTable;

    fn intern_agent(&mut self, agent: &AgentId) -> AgentIdx;

    /// All items currently held, in no particular order — the merge
    /// driver re-establishes causal order itself.
    fn items(&self) -> Vec<Item<T>>;

    /// Admit a (possibly foreign) item. `hint` is a best-effort placement
    /// hint; implementations that don't use one (e.g. the tree-backed
    /// Fugue) ignore it.
    fn integrate(&mut self, item: Item<T>, hint: Option<usize>) -> Result<usize, Error>;
}
