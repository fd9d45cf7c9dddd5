//! Stateful cursor over a tributary tree.

use generational_arena::Index;

use crate::domain::arena::{ChildSlot, RiverTree, TributaryNode};
use crate::domain::error::{DomainError, TreeResult};

/// Read-only cursor over a `RiverTree`: the current node plus the stack of
/// ancestors visited on the way down from the root.
///
/// The navigator only borrows the tree; the tree is immutable for the
/// navigator's lifetime, so held indices stay valid.
#[derive(Debug)]
pub struct Navigator<'a> {
    tree: &'a RiverTree,
    current: Index,
    ancestors: Vec<Index>,
}

impl<'a> Navigator<'a> {
    /// Start at the root with an empty ancestor stack. Refused entirely
    /// when the tree has no root.
    pub fn new(tree: &'a RiverTree) -> TreeResult<Self> {
        match tree.root() {
            Some(root) => Ok(Self {
                tree,
                current: root,
                ancestors: Vec::new(),
            }),
            None => Err(DomainError::EmptyTree),
        }
    }

    /// The node the cursor is on.
    pub fn current(&self) -> &TributaryNode {
        self.tree
            .get(self.current)
            .expect("cursor always points at a live node")
    }

    /// Move to the given child, pushing the current node onto the
    /// ancestor stack. On refusal the cursor is unchanged.
    pub fn descend(&mut self, slot: ChildSlot) -> TreeResult<()> {
        match self.current().child(slot) {
            Some(child) => {
                self.ancestors.push(self.current);
                self.current = child;
                Ok(())
            }
            None => Err(DomainError::NoChild(slot)),
        }
    }

    /// Return to the most recent ancestor. Refused at the root, leaving
    /// the cursor in place.
    pub fn ascend(&mut self) -> TreeResult<()> {
        match self.ancestors.pop() {
            Some(parent) => {
                self.current = parent;
                Ok(())
            }
            None => Err(DomainError::AtRoot),
        }
    }

    /// Distance from the root (number of stacked ancestors).
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn at_root(&self) -> bool {
        self.ancestors.is_empty()
    }
}
