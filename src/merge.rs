//! The merge driver (§4.6): pulls every item `src` holds that `dest`
//! doesn't yet, translates agent identities into `dest`'s own table, and
//! repeatedly sweeps the pending set admitting whatever has become
//! causally ready until nothing is left — or a full sweep places nothing,
//! which means the input was missing a dependency and can never converge.

use crate::error::Error;
use crate::id::{Id, UserTable};
use crate::item::Item;
use crate::list_crdt::ListCrdt;
use crate::version::Version;
use rustc_hash::FxHashMap;

/// Merges every item `src` has that `dest` lacks into `dest`, in an order
/// each item's own causal dependencies allow.
///
/// Deleting an item `dest` has never seen is folded into its arrival as
/// ordinary tombstone state. Deleting an item `dest` already holds
/// undeleted is the declared non-goal (§1, §4.5): rather than silently
/// dropping that tombstone bit, this returns [`Error::UnsupportedOp`].
pub fn merge_into<T: Clone, D: ListCrdt<T>>(dest: &mut D, src: &D) -> Result<(), Error> {
    let dest_deleted: FxHashMap<Id, bool> =
        dest.items().iter().map(|item| (item.id, item.is_deleted)).collect();
    let mut pending = translate_pending(dest, src, &dest_deleted)?;

    while !pending.is_empty() {
        let mut next_round = Vec::with_capacity(pending.len());
        let mut placed_any = false;
        for item in pending {
            if can_insert_now(dest.version(), &item) {
                dest.integrate(item, None)?;
                placed_any = true;
            } else {
                next_round.push(item);
            }
        }
        if !placed_any {
            return Err(Error::MergeStall { remaining: next_round.len() });
        }
        pending = next_round;
    }
    Ok(())
}

/// Remaps every foreign item's `Id`s from `src`'s agent indices to
/// `dest`'s, skipping anything `dest` already has and any split marker
/// (content-absent items with no causal identity of their own — the
/// owning algorithm's kernel recreates them locally as needed).
fn translate_pending<T: Clone, D: ListCrdt<T>>(
    dest: &mut D,
    src: &D,
    dest_deleted: &FxHashMap<Id, bool>,
) -> Result<Vec<Item<T>>, Error> {
    let src_users = src.users().clone();
    let mut pending = Vec::new();
    for item in src.items() {
        if item.content.is_none() {
            continue;
        }
        let id = remap_id(dest, &src_users, item.id);
        if dest.version().contains(id) {
            if item.is_deleted && !dest_deleted.get(&id).copied().unwrap_or(false) {
                return Err(Error::UnsupportedOp);
            }
            continue;
        }
        let origin_left = remap_id(dest, &src_users, item.origin_left);
        let origin_right = remap_id(dest, &src_users, item.origin_right);
        let mut translated = Item::new(item.content, id, origin_left, origin_right, item.seq);
        translated.insert_after = item.insert_after;
        translated.is_deleted = item.is_deleted;
        pending.push(translated);
    }
    Ok(pending)
}

fn remap_id<T: Clone, D: ListCrdt<T>>(dest: &mut D, src_users: &UserTable, id: Id) -> Id {
    if id.is_none() {
        return Id::none();
    }
    let name = src_users.id(id.agent).expect("item references an uninterned src agent");
    Id::new(dest.intern_agent(name), id.seq)
}

/// §4.6's `canInsertNow`: the item's own id must be the next expected seq
/// from its agent, and both origins (if present) must already be in
/// `version`.
fn can_insert_now<T>(version: &Version, item: &Item<T>) -> bool {
    if !version.is_next(item.id) {
        return false;
    }
    if !item.origin_left.is_none() && !version.contains(item.origin_left) {
        return false;
    }
    if !item.origin_right.is_none() && !version.contains(item.origin_right) {
        return false;
    }
    true
}
