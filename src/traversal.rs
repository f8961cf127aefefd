//! Visiting orders for a [`Tree`] and the iterator that walks them.
//!
//! All three orders share a single walker, [`Iter`], which keeps an explicit
//! stack instead of recursing so deep, unbalanced trees can be walked without
//! growing the call stack.
//!
//! # Examples
//!
//! ```
//! use functree::{Traversal, Tree};
//!
//! let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
//!
//! let order = |t| tree.iter(t).copied().collect::<Vec<_>>();
//! assert_eq!(order(Traversal::PreOrder), [2, 1, 3]);
//! assert_eq!(order(Traversal::InOrder), [1, 2, 3]);
//! assert_eq!(order(Traversal::PostOrder), [1, 3, 2]);
//! ```

use std::iter::FusedIterator;

use crate::tree::{Node, Tree};

/// The order in which a tree's values are visited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// The node, then its left subtree, then its right subtree.
    PreOrder,
    /// The left subtree, then the node, then the right subtree.
    #[default]
    InOrder,
    /// The left subtree, then the right subtree, then the node.
    PostOrder,
}

/// One pending step of the walk.
enum Frame<'a, T> {
    /// The subtree rooted here hasn't been expanded yet.
    Expand(&'a Node<T>),
    /// Yield this node's value.
    Visit(&'a Node<T>),
}

/// An iterator over the values of a tree in a given [`Traversal`] order.
///
/// Values are forced as they are yielded, so a lazy value that is never
/// reached is never computed.
pub struct Iter<'a, T> {
    traversal: Traversal,
    stack: Vec<Frame<'a, T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, traversal: Traversal) -> Self {
        let mut iter = Self {
            traversal,
            stack: Vec::new(),
        };
        iter.push_subtree(tree);
        iter
    }

    /// The traversal order of this iterator.
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    fn push_subtree(&mut self, tree: &'a Tree<T>) {
        if let Tree::Node(node) = tree {
            self.stack.push(Frame::Expand(node.as_ref()));
        }
    }

    /// Schedules a node and its children. The stack is LIFO so everything is
    /// pushed in the reverse of the order it should come out.
    fn expand(&mut self, node: &'a Node<T>) {
        match self.traversal {
            Traversal::PreOrder => {
                self.push_subtree(node.right());
                self.push_subtree(node.left());
                self.stack.push(Frame::Visit(node));
            }
            Traversal::InOrder => {
                self.push_subtree(node.right());
                self.stack.push(Frame::Visit(node));
                self.push_subtree(node.left());
            }
            Traversal::PostOrder => {
                self.stack.push(Frame::Visit(node));
                self.push_subtree(node.right());
                self.push_subtree(node.left());
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Visit(node) => return Some(node.value()),
                Frame::Expand(node) => self.expand(node),
            }
        }
        None
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
