//! Arena-based binary tree for the river hierarchy.

use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::Dam;
use crate::domain::error::{DomainError, TreeResult};

/// Data payload for tree nodes representing tributaries.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Tributary name, unique across the tree
    pub name: String,
    /// Flow rate in cubic meters per second (display only)
    pub flow_rate: f64,
    /// Dams on this tributary, in record order
    pub dams: Vec<Dam>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} m3/s)", self.name, self.flow_rate)
    }
}

/// Child position in a binary tributary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSlot {
    Left,
    Right,
}

impl fmt::Display for ChildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildSlot::Left => write!(f, "left"),
            ChildSlot::Right => write!(f, "right"),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TributaryNode {
    /// Tributary data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// First-attached child
    pub left: Option<Index>,
    /// Second-attached child
    pub right: Option<Index>,
}

impl TributaryNode {
    /// Child index for the given slot.
    pub fn child(&self, slot: ChildSlot) -> Option<Index> {
        match slot {
            ChildSlot::Left => self.left,
            ChildSlot::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-based binary tree of tributaries.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Children are attached in first-empty-slot order (left, then right); a
/// third attachment under the same parent is refused.
#[derive(Debug)]
pub struct RiverTree {
    /// Arena storage for all tree nodes
    arena: Arena<TributaryNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for RiverTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RiverTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert the root node. Any previous root stays in the arena but is
    /// no longer reachable; callers guard against that (the builder skips
    /// second root records).
    #[instrument(level = "trace", skip(self, data))]
    pub fn set_root(&mut self, data: NodeData) -> Index {
        let idx = self.arena.insert(TributaryNode {
            data,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        idx
    }

    /// Attach a new node under `parent`, filling the first empty child
    /// slot (left before right). Refused with `CapacityExceeded` when the
    /// parent already has two children.
    #[instrument(level = "trace", skip(self, data))]
    pub fn attach_child(&mut self, parent: Index, data: NodeData) -> TreeResult<Index> {
        match self.arena.get(parent) {
            Some(node) if node.left.is_some() && node.right.is_some() => {
                return Err(DomainError::CapacityExceeded(node.data.name.clone()));
            }
            Some(_) => {}
            None => return Err(DomainError::OrphanRecord(data.name)),
        }

        let idx = self.arena.insert(TributaryNode {
            data,
            parent: Some(parent),
            left: None,
            right: None,
        });
        // Parent presence was checked above
        if let Some(node) = self.arena.get_mut(parent) {
            if node.left.is_none() {
                node.left = Some(idx);
            } else {
                node.right = Some(idx);
            }
        }
        Ok(idx)
    }

    /// Attach a new node by searching the subtree under `start` for a node
    /// named `parent_name` (depth-first, left before right).
    ///
    /// This is the narrow insertion path for trees that already have a
    /// root: O(nodes) per insert, no name index involved. `attach_child`
    /// with an indexed parent lookup is the O(1) path used during CSV
    /// ingestion.
    #[instrument(level = "debug", skip(self, data))]
    pub fn attach_by_search(
        &mut self,
        start: Index,
        parent_name: &str,
        data: NodeData,
    ) -> TreeResult<Index> {
        match self.find_by_name(start, parent_name) {
            Some(parent) => self.attach_child(parent, data),
            None => Err(DomainError::OrphanRecord(parent_name.to_string())),
        }
    }

    /// Depth-first search (left before right) for a node by name within
    /// the subtree under `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_name(&self, start: Index, name: &str) -> Option<Index> {
        let node = self.arena.get(start)?;
        if node.data.name == name {
            return Some(start);
        }
        if let Some(found) = node.left.and_then(|left| self.find_by_name(left, name)) {
            return Some(found);
        }
        node.right.and_then(|right| self.find_by_name(right, name))
    }

    pub fn get(&self, idx: Index) -> Option<&TributaryNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut TributaryNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get(node_idx) {
            1 + [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the names of all headwater tributaries (leaf nodes).
    ///
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn headwaters(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.data.name.clone())
            .collect()
    }

    /// Render the tree for terminal display, rooted at `start`.
    pub fn display_tree(&self, start: Index) -> Option<Tree<String>> {
        let node = self.get(start)?;
        let leaves: Vec<_> = [node.left, node.right]
            .into_iter()
            .flatten()
            .filter_map(|child| self.display_tree(child))
            .collect();
        Some(Tree::new(node.data.to_string()).with_leaves(leaves))
    }
}

/// Preorder iterator over the tree (left subtree before right).
pub struct TreeIterator<'a> {
    tree: &'a RiverTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a RiverTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TributaryNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get(current_idx) {
                // Push right first so left is visited first
                if let Some(right) = node.right {
                    self.stack.push(right);
                }
                if let Some(left) = node.left {
                    self.stack.push(left);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
