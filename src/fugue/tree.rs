//! `FugueDoc`: the explicit binary-tree-of-siblings backend for the Fugue
//! algorithm (§4.4.5). Unlike the flat-array backend shared by the other
//! three algorithms, Fugue nodes are addressed by arena index and attach
//! under a parent's left or right anchor, each anchor holding a sibling
//! list rather than a single child pointer (a node can acquire several
//! concurrent same-side children).

use crate::error::Error;
use crate::fugue::node::{Node, Side};
use crate::id::{AgentId, AgentIdx, Id, UserTable};
use crate::item::Item;
use crate::list_crdt::ListCrdt;
use crate::version::Version;
use smallvec::SmallVec;

#[derive(Clone)]
pub struct FugueDoc<T> {
    nodes: Vec<Node<T>>,
    by_id: rustc_hash::FxHashMap<Id, usize>,
    /// Top-level nodes (no `originLeft`/`originRight`), sorted the same way
    /// as any node's `right_children` list.
    root_children: SmallVec<[usize; 2]>,
    version: Version,
    users: UserTable,
    length: u64,
}

impl<T: Clone> FugueDoc<T> {
    pub fn new() -> Self {
        FugueDoc {
            nodes: Vec::new(),
            by_id: rustc_hash::FxHashMap::default(),
            root_children: SmallVec::new(),
            version: Version::new(),
            users: UserTable::new(),
            length: 0,
        }
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

    pub fn users(&self) -> &UserTable {
        &self.users
    }

    pub fn intern_agent(&mut self, agent: &AgentId) -> AgentIdx {
        self.users.get_or_insert(agent)
    }

    pub fn get_array(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_visible(&self.root_children, &mut out);
        out
    }

    fn collect_visible<'a>(&'a self, children: &[usize], out: &mut Vec<&'a T>) {
        for &c in children {
            let node = &self.nodes[c];
            self.collect_visible(&node.left_children, out);
            if node.is_visible() {
                out.push(node.content.as_ref().expect("is_visible implies content"));
            }
            self.collect_visible(&node.right_children, out);
        }
    }

    fn visible_ids(&self) -> Vec<Id> {
        let mut out = Vec::new();
        self.collect_visible_ids(&self.root_children, &mut out);
        out
    }

    fn collect_visible_ids(&self, children: &[usize], out: &mut Vec<Id>) {
        for &c in children {
            let node = &self.nodes[c];
            self.collect_visible_ids(&node.left_children, out);
            if node.is_visible() {
                out.push(node.id);
            }
            self.collect_visible_ids(&node.right_children, out);
        }
    }

    /// The visible neighbors a local insert at `pos` would observe.
    pub fn visible_neighbors(&self, pos: u64) -> Result<(Id, Id), Error> {
        let ids = self.visible_ids();
        if pos > ids.len() as u64 {
            return Err(Error::PositionOutOfRange { pos, len: ids.len() as u64 });
        }
        let pos = pos as usize;
        let left = if pos == 0 { Id::none() } else { ids[pos - 1] };
        let right = ids.get(pos).copied().unwrap_or_else(Id::none);
        Ok((left, right))
    }

    /// In-order position of `id` among *all* nodes (tombstones included —
    /// deleted nodes keep their positional identity, §3). Used to order
    /// right-children by "rightOrigin's existing-list position" (§4.4.5).
    fn list_position(&self, id: Id) -> Option<usize> {
        let mut counter = 0usize;
        let mut found = None;
        self.visit_in_order(&self.root_children, &mut counter, &mut found, id);
        found
    }

    fn visit_in_order(
        &self,
        children: &[usize],
        counter: &mut usize,
        found: &mut Option<usize>,
        target: Id,
    ) {
        for &c in children {
            if found.is_some() {
                return;
            }
            self.visit_in_order(&self.nodes[c].left_children, counter, found, target);
            if found.is_some() {
                return;
            }
            if self.nodes[c].id == target {
                *found = Some(*counter);
            }
            *counter += 1;
            self.visit_in_order(&self.nodes[c].right_children, counter, found, target);
        }
    }

    /// Sort key for placing `idx` among a right-children sibling list:
    /// `rightOrigin`'s list position descending, then agent descending
    /// (§4.4.5). Absent `rightOrigin` sorts first (key `usize::MAX`), which
    /// is exactly "no existing item to its right" — i.e. adjacent to the
    /// parent. Keyed on the resolved `AgentId`, not `AgentIdx`: the index is
    /// assigned in per-document interning order, which two peers can assign
    /// differently for the same agent, silently reversing sibling order and
    /// breaking convergence (§5, §8).
    fn right_sort_key(&self, idx: usize) -> (usize, AgentId) {
        let o = self.nodes[idx].origin_right;
        let pos = if o.is_none() {
            usize::MAX
        } else {
            self.list_position(o).unwrap_or(usize::MAX)
        };
        (pos, self.agent(self.nodes[idx].id.agent).clone())
    }

    fn agent_error(&self, agent: AgentIdx) -> AgentId {
        self.users
            .id(agent)
            .cloned()
            .unwrap_or_else(|| AgentId::from(format!("<agent#{}>", agent.0)))
    }

    /// Resolves an interned agent index back to its stable identifier. See
    /// [`right_sort_key`](Self::right_sort_key) and
    /// [`insert_left_sibling`](Self::insert_left_sibling) for why sibling
    /// ordering must use this rather than `AgentIdx` directly.
    fn agent(&self, idx: AgentIdx) -> &AgentId {
        self.users.id(idx).expect("node agent interned before reaching the tree")
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

    /// Places a freshly-pushed node under its parent's left or right
    /// anchor (or the virtual root), then propagates the visible-count
    /// delta up through ancestors.
    fn attach(&mut self, idx: usize) {
        let origin_right = self.nodes[idx].origin_right;
        let origin_left = self.nodes[idx].origin_left;

        if !origin_right.is_none() {
            let parent = self.by_id[&origin_right];
            self.nodes[idx].parent = Some(parent);
            self.nodes[idx].side = Side::Left;
            self.insert_left_sibling(parent, idx);
        } else if !origin_left.is_none() {
            let parent = self.by_id[&origin_left];
            self.nodes[idx].parent = Some(parent);
            self.nodes[idx].side = Side::Right;
            let key = self.right_sort_key(idx);
            let mut children = std::mem::take(&mut self.nodes[parent].right_children);
            let pos = children
                .iter()
                .position(|&c| self.right_sort_key(c) < key)
                .unwrap_or(children.len());
            children.insert(pos, idx);
            self.nodes[parent].right_children = children;
        } else {
            self.nodes[idx].parent = None;
            self.nodes[idx].side = Side::Right;
            let key = self.right_sort_key(idx);
            let mut children = std::mem::take(&mut self.root_children);
            let pos = children
                .iter()
                .position(|&c| self.right_sort_key(c) < key)
                .unwrap_or(children.len());
            children.insert(pos, idx);
            self.root_children = children;
        }

        let delta = self.nodes[idx].is_visible();
        if delta {
            let mut current = idx;
            while let Some(p) = self.nodes[current].parent {
                self.nodes[p].subtree_size += 1;
                current = p;
            }
        }
    }

    /// Left-children are ordered by agent descending only (§4.4.5); a
    /// before-anchor never carries an explicit `rightOrigin` distinction.
    /// Ordered on the resolved `AgentId`, not `AgentIdx` — see
    /// [`right_sort_key`](Self::right_sort_key).
    fn insert_left_sibling(&mut self, parent: usize, idx: usize) {
        let agent = self.agent(self.nodes[idx].id.agent).clone();
        let mut children = std::mem::take(&mut self.nodes[parent].left_children);
        let pos = children
            .iter()
            .position(|&c| self.agent(self.nodes[c].id.agent) < &agent)
            .unwrap_or(children.len());
        children.insert(pos, idx);
        self.nodes[parent].left_children = children;
    }

    pub fn integrate(&mut self, item: Item<T>, _hint: Option<usize>) -> Result<usize, Error> {
        self.check_prelude(&item)?;
        self.version.advance(item.id);

        let idx = self.nodes.len();
        self.by_id.insert(item.id, idx);
        let visible = item.is_visible();
        self.nodes.push(Node {
            id: item.id,
            content: item.content,
            is_deleted: item.is_deleted,
            origin_left: item.origin_left,
            origin_right: item.origin_right,
            parent: None,
            side: Side::Right,
            left_children: SmallVec::new(),
            right_children: SmallVec::new(),
            subtree_size: if visible { 1 } else { 0 },
        });
        self.attach(idx);
        if visible {
            self.length += 1;
        }
        Ok(idx)
    }

    /// §4.3's Fugue origin rule, reduced to a directly checkable condition:
    /// `originRight` is left absent exactly when the new item's left
    /// neighbor already sits on a right-child chain that the new item can
    /// extend (i.e. `left` has at least one right child already, or `left`
    /// is absent and the document already has top-level children) — in
    /// either case inserting with an absent `originRight` sorts the new
    /// node as the new nearest right-child, which reproduces "immediately
    /// after left, immediately before whatever was there" without
    /// disturbing the existing tree shape. Otherwise `originRight` is set
    /// explicitly to the right neighbor's id, attaching the new node as
    /// that neighbor's leftmost left-child instead.
    pub fn local_insert(&mut self, agent: &AgentId, pos: u64, content: T) -> Result<Id, Error> {
        let agent_idx = self.users.get_or_insert(agent);
        let next_seq = self.version.last_seq(agent_idx).map(|s| s + 1).unwrap_or(0);
        let id = Id::new(agent_idx, next_seq);

        let (left, right) = self.visible_neighbors(pos)?;
        let origin_right = if !left.is_none() {
            let l_idx = self.by_id[&left];
            if self.nodes[l_idx].right_children.is_empty() {
                right
            } else {
                Id::none()
            }
        } else if !self.root_children.is_empty() {
            Id::none()
        } else {
            right
        };

        let item = Item::new(Some(content), id, left, origin_right, 0);
        self.integrate(item, None)?;
        Ok(id)
    }

    fn select_visible(&self, children: &[usize], mut pos: usize) -> Option<usize> {
        for &c in children {
            let node = &self.nodes[c];
            let left_size = Self::children_size(&self.nodes, &node.left_children);
            if pos < left_size {
                return self.select_visible(&node.left_children, pos);
            }
            pos -= left_size;
            if node.is_visible() {
                if pos == 0 {
                    return Some(c);
                }
                pos -= 1;
            }
            let right_size = Self::children_size(&self.nodes, &node.right_children);
            if pos < right_size {
                return self.select_visible(&node.right_children, pos);
            }
            pos -= right_size;
        }
        None
    }

    fn children_size(nodes: &[Node<T>], children: &[usize]) -> usize {
        children.iter().map(|&c| nodes[c].subtree_size).sum()
    }

    pub fn local_delete(&mut self, pos: u64) -> Result<Id, Error> {
        if pos >= self.length {
            return Err(Error::PositionOutOfRange { pos, len: self.length });
        }
        let idx = self
            .select_visible(&self.root_children, pos as usize)
            .ok_or(Error::PositionOutOfRange { pos, len: self.length })?;
        self.nodes[idx].is_deleted = true;
        self.length -= 1;
        self.nodes[idx].subtree_size -= 1;
        let mut current = idx;
        while let Some(p) = self.nodes[current].parent {
            self.nodes[p].subtree_size -= 1;
            current = p;
        }
        Ok(self.nodes[idx].id)
    }

    /// Snapshots every node (content, tombstones and all) as [`Item`]s, for
    /// the merge driver and for save/load. No particular order is
    /// guaranteed.
    pub fn items(&self) -> Vec<Item<T>> {
        self.nodes
            .iter()
            .map(|n| {
                let mut item = Item::new(n.content.clone(), n.id, n.origin_left, n.origin_right, 0);
                item.is_deleted = n.is_deleted;
                item
            })
            .collect()
    }
}

impl<T: Clone> ListCrdt<T> for FugueDoc<T> {
    fn version(&self) -> &Version {
        FugueDoc::version(self)
    }

    fn visible_len(&self) -> u64 {
        self.length
    }

    fn get_array(&self) -> Vec<&T> {
        FugueDoc::get_array(self)
    }

    fn users(&self) -> &UserTable {
        FugueDoc::users(self)
    }

    fn intern_agent(&mut self, agent: &AgentId) -> AgentIdx {
        FugueDoc::intern_agent(self, agent)
    }

    fn items(&self) -> Vec<Item<T>> {
        FugueDoc::items(self)
    }

    fn integrate(&mut self, item: Item<T>, hint: Option<usize>) -> Result<usize, Error> {
        FugueDoc::integrate(self, item, hint)
    }
}
