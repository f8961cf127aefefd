//! This crate exposes an immutable, generic binary tree built around a
//! single reduction (`fold`) with lazily computed node values.
//!
//! ## Binary Tree
//!
//! A binary tree is defined recursively using the notion of a `Node`. A
//! `Node` stores a value and always has exactly two children, each of which
//! is itself a tree. A child may be the empty tree, which is how the bottom
//! of every branch is marked instead of with a null pointer. That keeps every
//! operation total: the empty tree has a size of 0, a height of 0 and folds
//! to whatever initial value it is given.
//!
//! > Note that nothing here keeps the tree ordered or balanced. Whatever
//! > shape the caller builds is the shape that is kept.
//!
//! ## Fold
//!
//! Every derived operation ([`size`][Tree::size], [`height`][Tree::height],
//! [`is_bst`][Tree::is_bst], [`map`][Tree::map], [`filter`][Tree::filter], ...)
//! is a `fold`. A fold combines a node's value with the already reduced
//! results of its left and right subtrees, always in that order.
//!
//! ## Laziness
//!
//! A node may be created with a computation instead of a value. The
//! computation runs the first time the value is read and never again.
//! [`lazy_map`][Tree::lazy_map] builds whole trees of these.
//!
//! # Examples
//!
//! ```
//! use functree::{Traversal, Tree};
//!
//! let tree = Tree::node(
//!     3,
//!     Tree::node(1, Tree::empty(), Tree::leaf(2)),
//!     Tree::node(5, Tree::leaf(4), Tree::empty()),
//! );
//!
//! assert_eq!(tree.size(), 5);
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_bst());
//!
//! let preorder: Vec<_> = tree.iter(Traversal::PreOrder).copied().collect();
//! assert_eq!(preorder, [3, 1, 2, 5, 4]);
//!
//! let sum = tree.fold(|v, l, r| v + l + r, 0);
//! assert_eq!(sum, 15);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod lazy;
pub mod traversal;
pub mod tree;

pub use lazy::Lazy;
pub use traversal::{Iter, Traversal};
pub use tree::{Node, Tree};
