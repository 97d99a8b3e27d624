//! Growable statement container.
//!
//! `NodeList` is an append-only, insertion-ordered sequence of owned
//! nodes. It keeps an explicit logical capacity that starts at
//! [`INITIAL_CAPACITY`] and doubles whenever an append would overflow it,
//! so growth is observable and deterministic regardless of how the
//! allocator rounds requests.

use crate::ast::Node;
use std::alloc::{handle_alloc_error, Layout};
use std::ops::Index;

/// Capacity of a freshly created list.
pub const INITIAL_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct NodeList {
    items: Vec<Node>,
    capacity: usize,
}

impl NodeList {
    /// Create an empty list with [`INITIAL_CAPACITY`] slots reserved.
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity: 16, 32, 64, ...
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Move every item out, keeping the storage and logical capacity.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Node> {
        self.items.drain(..)
    }

    /// Append a node, doubling the capacity first if the list is full.
    ///
    /// # Panics
    /// Aborts the process if the grown storage cannot be allocated.
    pub fn push(&mut self, node: Node) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.push(node);
    }

    fn grow(&mut self) {
        let new_capacity = self
            .capacity
            .checked_mul(2)
            .unwrap_or_else(|| capacity_overflow());
        let additional = new_capacity - self.items.len();

        if let Err(err) = self.items.try_reserve_exact(additional) {
            tracing::error!(%err, capacity = new_capacity, "out of memory growing statement list");
            match Layout::array::<Node>(new_capacity) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => capacity_overflow(),
            }
        }

        tracing::trace!(from = self.capacity, to = new_capacity, "statement list grew");
        self.capacity = new_capacity;
    }
}

fn capacity_overflow() -> ! {
    panic!("statement list capacity overflow");
}

impl Default for NodeList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for NodeList {
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend(self.items.iter().cloned());
        Self {
            items,
            capacity: self.capacity,
        }
    }
}

/// Lists compare by their items only.
impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for NodeList {}

impl Index<usize> for NodeList {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.items[index]
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, NodeKind};
    use crate::position::Position;

    fn number(n: usize) -> Node {
        Node::new(
            NodeKind::Literal(Literal::Number(n.to_string().into())),
            Position::start(),
        )
    }

    fn filled(count: usize) -> NodeList {
        let mut list = NodeList::new();
        for i in 0..count {
            list.push(number(i));
        }
        list
    }

    #[test]
    fn test_new_list_is_empty_with_initial_capacity() {
        let list = NodeList::new();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 16);
    }

    #[test]
    fn test_full_list_does_not_grow_early() {
        let list = filled(16);
        assert_eq!(list.len(), 16);
        assert_eq!(list.capacity(), 16);
    }

    #[test]
    fn test_seventeenth_append_doubles_capacity() {
        let list = filled(17);
        assert_eq!(list.len(), 17);
        assert_eq!(list.capacity(), 32);
        assert_eq!(list[16], number(16));
    }

    #[test]
    fn test_capacity_sequence() {
        let mut list = NodeList::new();
        let mut seen = vec![list.capacity()];
        for i in 0..100 {
            list.push(number(i));
            if seen.last() != Some(&list.capacity()) {
                seen.push(list.capacity());
            }
            assert!(list.len() <= list.capacity());
        }
        assert_eq!(seen, vec![16, 32, 64, 128]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let list = filled(40);
        for (i, node) in list.iter().enumerate() {
            assert_eq!(*node, number(i));
        }
        assert_eq!(list.get(40), None);
    }

    #[test]
    fn test_clone_keeps_logical_capacity() {
        let list = filled(20);
        let copy = list.clone();
        assert_eq!(copy.capacity(), 32);
        assert_eq!(copy, list);
    }
}
