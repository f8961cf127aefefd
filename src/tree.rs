//! A functional binary tree. This is modeled after a tree one would see in
//! a functional language like Haskell. Nothing ever modifies a tree in place.
//! Transformations such as `map` or `filter` instead return a new tree, and
//! the original stays exactly as it was.
//!
//! # Examples
//!
//! ```
//! use functree::{Traversal, Tree};
//!
//! let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
//!
//! // `map` returns a new tree!
//! let doubled = tree.map(|x| x * 2);
//! assert_eq!(doubled.iter(Traversal::InOrder).copied().collect::<Vec<_>>(), [2, 4, 6]);
//!
//! // `filter` does too.
//! let odd = tree.filter(|x| x % 2 == 1);
//! assert_eq!(odd.iter(Traversal::InOrder).copied().collect::<Vec<_>>(), [1, 3]);
//!
//! // The original is untouched.
//! assert_eq!(tree.iter(Traversal::InOrder).copied().collect::<Vec<_>>(), [1, 2, 3]);
//! ```

use log::trace;
use std::fmt;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use crate::lazy::Lazy;
use crate::traversal::{Iter, Traversal};

/// A binary tree. Each node holds a value of type `T`, possibly one that is
/// only computed when first read.
///
/// Moving a `Tree` moves the handle to its nodes. [`share`][Tree::share]
/// makes a second handle to the same nodes, while [`clone`][Clone::clone]
/// builds a structurally independent copy.
pub enum Tree<T> {
    /// A marker for the empty subtree at the bottom of a branch.
    Empty,
    /// A [`Node`] with a value and two children (which are both `Tree`s).
    Node(Rc<Node<T>>),
}

/// A `Node` has a value and always has two children although those children
/// may be [`Empty`][Tree::Empty].
pub struct Node<T> {
    /// Shared with nodes `filter` keeps and with the computations `lazy_map` defers.
    value: Rc<Lazy<T>>,
    left: Tree<T>,
    right: Tree<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Creates a tree of a single node holding `value`.
    pub fn leaf(value: T) -> Self {
        Self::node(value, Self::Empty, Self::Empty)
    }

    /// Creates a tree whose root holds `value` and has the given children.
    pub fn node(value: T, left: Self, right: Self) -> Self {
        Self::from_cell(Rc::new(Lazy::ready(value)), left, right)
    }

    /// Creates a tree of a single node whose value is computed by `f` the first
    /// time it is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::Tree;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let tree = Tree::lazy_leaf(move || {
    ///     counter.set(counter.get() + 1);
    ///     "computed"
    /// });
    /// assert_eq!(calls.get(), 0);
    ///
    /// assert_eq!(tree.value(), Some(&"computed"));
    /// assert_eq!(tree.value(), Some(&"computed"));
    /// assert_eq!(calls.get(), 1);
    /// ```
    pub fn lazy_leaf<F>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self::lazy_node(f, Self::Empty, Self::Empty)
    }

    /// Creates a tree whose root value is computed by `f` the first time it is
    /// read and whose children are the given trees.
    pub fn lazy_node<F>(f: F, left: Self, right: Self) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self::from_cell(Rc::new(Lazy::deferred(f)), left, right)
    }

    fn from_cell(value: Rc<Lazy<T>>, left: Self, right: Self) -> Self {
        Self::Node(Rc::new(Node { value, left, right }))
    }

    /// Returns a new handle to the same nodes. Nothing is copied.
    pub fn share(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node(node) => Self::Node(Rc::clone(node)),
        }
    }

    /// Whether this is the empty tree.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The root node, unless the tree is empty.
    pub fn root(&self) -> Option<&Node<T>> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(node.as_ref()),
        }
    }

    /// The value at the root, unless the tree is empty. Reading it computes
    /// it if it is lazy.
    pub fn value(&self) -> Option<&T> {
        self.root().map(Node::value)
    }

    /// Reduces the tree bottom-up. An empty tree reduces to `init`. A node
    /// reduces to `operation(value, left, right)` where `left` and `right`
    /// are its already reduced subtrees.
    ///
    /// Every value in the tree is read, so every lazy value is computed.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::Tree;
    ///
    /// let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
    ///
    /// let sum = tree.fold(|value, left, right| value + left + right, 0);
    /// assert_eq!(sum, 6);
    ///
    /// // The value always comes before the subtrees.
    /// let shape = tree.fold(|value, left, right| format!("({} {} {})", value, left, right), ".".to_string());
    /// assert_eq!(shape, "(2 (1 . .) (3 . .))");
    /// ```
    pub fn fold<'a, R, F>(&'a self, mut operation: F, init: R) -> R
    where
        F: FnMut(&'a T, R, R) -> R,
        R: Clone,
    {
        self.reduce(
            &mut |node, left, right| operation(node.value(), left, right),
            &|| init.clone(),
        )
    }

    /// The node-level fold everything else is built from. Handing over the
    /// node rather than its value lets transformations reuse value cells
    /// without reading them.
    fn reduce<'a, R>(
        &'a self,
        operation: &mut impl FnMut(&'a Node<T>, R, R) -> R,
        init: &impl Fn() -> R,
    ) -> R {
        match self {
            Self::Empty => init(),
            Self::Node(node) => {
                let node = node.as_ref();
                let left = node.left.reduce(operation, init);
                let right = node.right.reduce(operation, init);
                operation(node, left, right)
            }
        }
    }

    /// The number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.fold(|_, left: usize, right: usize| left + right + 1, 0)
    }

    /// The number of nodes on the longest path from the root down. An empty
    /// tree has a height of 0 and a single node a height of 1.
    pub fn height(&self) -> usize {
        self.fold(|_, left: usize, right: usize| left.max(right) + 1, 0)
    }

    /// Checks, at every node, that its left child's value is no greater and
    /// its right child's value no smaller than its own.
    ///
    /// Only parents and their immediate children are compared. A node deeper
    /// down that is out of order relative to an ancestor further up is not
    /// caught:
    ///
    /// ```
    /// use functree::Tree;
    ///
    /// // 7 is in 5's left subtree but passes because it is only compared with 3.
    /// let tree = Tree::node(5, Tree::node(3, Tree::empty(), Tree::leaf(7)), Tree::empty());
    /// assert!(tree.is_bst());
    ///
    /// let tree = Tree::node(5, Tree::leaf(6), Tree::empty());
    /// assert!(!tree.is_bst());
    /// ```
    pub fn is_bst(&self) -> bool
    where
        T: PartialOrd,
    {
        let (ordered, _) = self.fold(ordered_with_children, (true, None));
        ordered
    }

    /// Returns a tree of the same shape with `transformer` applied to every
    /// value. All values are read and transformed right away.
    pub fn map<U, F>(&self, mut transformer: F) -> Tree<U>
    where
        F: FnMut(&T) -> U,
    {
        self.reduce(
            &mut |node, left, right| Tree::node(transformer(node.value()), left, right),
            &Tree::empty,
        )
    }

    /// Returns a tree of the same shape whose values are `transformer` applied
    /// to this tree's values, each computed only when it is first read.
    ///
    /// Whatever `transformer` captures is observed at read time, not when
    /// `lazy_map` is called. The source value is not read until then either.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::Tree;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
    /// let x = Rc::new(Cell::new(2));
    ///
    /// let eager = tree.map(|e| e - x.get());
    /// let captured = Rc::clone(&x);
    /// let lazy = tree.lazy_map(move |e| e - captured.get());
    ///
    /// x.set(4);
    /// assert_eq!(eager.value(), Some(&0));
    /// assert_eq!(lazy.value(), Some(&-2));
    /// ```
    pub fn lazy_map<U, F>(&self, transformer: F) -> Tree<U>
    where
        T: 'static,
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        let transformer = Rc::new(transformer);
        self.reduce(
            &mut |node, left, right| {
                let source = Rc::clone(&node.value);
                let transformer = Rc::clone(&transformer);
                Tree::lazy_node(move || (*transformer)(source.force()), left, right)
            },
            &Tree::empty,
        )
    }

    /// Returns a tree with only the nodes whose value satisfies `predicate`.
    ///
    /// A removed node is replaced by its remaining subtrees. If only one is
    /// left it takes the removed node's place. If both are, the right subtree
    /// is hung off the rightmost node of the left subtree and the left subtree
    /// takes the removed node's place. Either way the in-order sequence of the
    /// kept values is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::{Traversal, Tree};
    ///
    /// let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
    /// let filtered = tree.filter(|x| *x != 2);
    ///
    /// assert_eq!(filtered.value(), Some(&1));
    /// assert_eq!(filtered.iter(Traversal::PreOrder).copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.reduce(
            &mut |node, left, right| {
                if predicate(node.value()) {
                    Self::from_cell(Rc::clone(&node.value), left, right)
                } else {
                    Self::splice(left, right)
                }
            },
            &Self::empty,
        )
    }

    /// Merges the subtrees of a removed node into one.
    fn splice(left: Self, right: Self) -> Self {
        match (left, right) {
            (left, Self::Empty) => left,
            (Self::Empty, right) => right,
            (left, right) => {
                trace!("splicing right subtree under the rightmost node of the left");
                left.graft_rightmost(right)
            }
        }
    }

    /// Attaches `graft` as the right child of this tree's rightmost node.
    ///
    /// Nodes built by `filter` aren't referenced anywhere else yet, so they
    /// are updated in place. A node that is shared is copied instead.
    fn graft_rightmost(self, graft: Self) -> Self {
        match self {
            Self::Empty => graft,
            Self::Node(mut node) => match Rc::get_mut(&mut node) {
                Some(fresh) => {
                    let right = mem::take(&mut fresh.right);
                    fresh.right = right.graft_rightmost(graft);
                    Self::Node(node)
                }
                None => Self::from_cell(
                    Rc::clone(&node.value),
                    node.left.share(),
                    node.right.share().graft_rightmost(graft),
                ),
            },
        }
    }

    /// An iterator over the values in the given order.
    pub fn iter(&self, traversal: Traversal) -> Iter<'_, T> {
        Iter::new(self, traversal)
    }

    /// Folds `operation` over the values in the given order, starting from
    /// `init`. At each node the accumulator becomes `operation(value, accumulator)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::{Traversal, Tree};
    ///
    /// let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
    ///
    /// let sum = tree.accumulate(|value, sum| value + sum, 0, Traversal::InOrder);
    /// assert_eq!(sum, 6);
    ///
    /// let digits = tree.accumulate(|value, s| s + &value.to_string(), String::new(), Traversal::PostOrder);
    /// assert_eq!(digits, "132");
    /// ```
    pub fn accumulate<A, F>(&self, mut operation: F, init: A, traversal: Traversal) -> A
    where
        F: FnMut(&T, A) -> A,
    {
        self.iter(traversal)
            .fold(init, |accumulator, value| operation(value, accumulator))
    }

    /// Calls `operation` on every value in the given order.
    pub fn apply<F>(&self, operation: F, traversal: Traversal)
    where
        F: FnMut(&T),
    {
        self.iter(traversal).for_each(operation)
    }

    /// Calls `operation` on every value in the given order, stopping at the
    /// first error and returning it.
    pub fn try_apply<E, F>(&self, operation: F, traversal: Traversal) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        self.iter(traversal).try_for_each(operation)
    }

    /// Writes every value in the given order, each followed by a space, and
    /// ends the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use functree::{Traversal, Tree};
    ///
    /// let tree = Tree::node(2, Tree::leaf(1), Tree::leaf(3));
    /// let mut out = Vec::new();
    /// tree.write_to(&mut out, Traversal::PreOrder).unwrap();
    ///
    /// assert_eq!(out, b"2 1 3 \n");
    /// ```
    pub fn write_to<W>(&self, out: &mut W, traversal: Traversal) -> io::Result<()>
    where
        W: Write,
        T: fmt::Display,
    {
        self.try_apply(|value| write!(out, "{} ", value), traversal)?;
        writeln!(out)
    }

    /// Prints every value to stdout in the given order.
    pub fn print_with(&self, traversal: Traversal) -> io::Result<()>
    where
        T: fmt::Display,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_to(&mut out, traversal)
    }

    /// Prints every value to stdout in the default ([in-order][Traversal::InOrder]) order.
    pub fn print(&self) -> io::Result<()>
    where
        T: fmt::Display,
    {
        self.print_with(Traversal::default())
    }
}

/// One `is_bst` step: whether a node is ordered with respect to the roots of
/// its subtrees, given whether the subtrees were.
fn ordered_with_children<'a, T>(
    value: &'a T,
    (left_ordered, left_root): (bool, Option<&'a T>),
    (right_ordered, right_root): (bool, Option<&'a T>),
) -> (bool, Option<&'a T>)
where
    T: PartialOrd,
{
    let ordered = left_ordered
        && right_ordered
        && left_root.map_or(true, |left| left <= value)
        && right_root.map_or(true, |right| right >= value);
    (ordered, Some(value))
}

impl<T> Node<T> {
    /// The value of this node. Reading it computes it if it is lazy.
    pub fn value(&self) -> &T {
        self.value.force()
    }

    /// Whether the value has been computed. Values that weren't created
    /// lazily always have been.
    pub fn is_evaluated(&self) -> bool {
        self.value.is_evaluated()
    }

    /// The left subtree.
    pub fn left(&self) -> &Tree<T> {
        &self.left
    }

    /// The right subtree.
    pub fn right(&self) -> &Tree<T> {
        &self.right
    }
}

/// Dropping recursively would use one stack frame per level, so unlink the
/// children onto a heap stack instead.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        if self.left.is_empty() && self.right.is_empty() {
            return;
        }

        let mut pending = vec![mem::take(&mut self.left), mem::take(&mut self.right)];
        while let Some(tree) = pending.pop() {
            if let Tree::Node(node) = tree {
                // Subtrees still shared with another tree stay alive.
                if let Ok(mut node) = Rc::try_unwrap(node) {
                    pending.push(mem::take(&mut node.left));
                    pending.push(mem::take(&mut node.right));
                }
            }
        }
    }
}

/// A deep copy: every node and every value cell is new. Lazy values that
/// haven't been computed yet are copied unevaluated and are computed
/// separately for the copy.
impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        self.reduce(
            &mut |node, left, right| Self::from_cell(Rc::new(Lazy::clone(&node.value)), left, right),
            &Self::empty,
        )
    }
}

/// Trees are equal when they have the same shape and equal values in the same
/// places. Comparing computes lazy values.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Node(a), Self::Node(b)) => {
                Rc::ptr_eq(a, b)
                    || (a.value() == b.value() && a.left == b.left && a.right == b.right)
            }
            _ => false,
        }
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

/// Lazy values that haven't been computed are shown as pending rather than
/// computed for display.
impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Node(node) => fmt::Debug::fmt(node.as_ref(), f),
        }
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    /// Iterates in the default ([in-order][Traversal::InOrder]) order.
    fn into_iter(self) -> Self::IntoIter {
        self.iter(Traversal::default())
    }
}
