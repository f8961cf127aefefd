#[macro_use]
extern crate quickcheck_macros;

mod tree;

use functree::Tree;
use quickcheck::{Arbitrary, Gen};

/// A set of values and a recipe for arranging them into a tree. The first
/// value is the root, the values at even positions after it go (recursively)
/// to the left and the rest to the right, so trees of all sorts of shapes come
/// out of it.
#[derive(Clone, Debug)]
pub(crate) struct Shape(pub(crate) Vec<i8>);

impl Shape {
    pub(crate) fn tree(&self) -> Tree<i8> {
        build(&self.0)
    }

    /// The values arranged as a balanced binary search tree instead.
    pub(crate) fn search_tree(&self) -> Tree<i8> {
        let mut sorted = self.0.clone();
        sorted.sort_unstable();
        build_balanced(&sorted)
    }
}

impl Arbitrary for Shape {
    /// Tells quickcheck how to randomly choose the values
    fn arbitrary(g: &mut Gen) -> Self {
        Shape(Vec::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Shape))
    }
}

fn build(values: &[i8]) -> Tree<i8> {
    match values.split_first() {
        None => Tree::empty(),
        Some((root, rest)) => {
            let left: Vec<_> = rest.iter().step_by(2).copied().collect();
            let right: Vec<_> = rest.iter().skip(1).step_by(2).copied().collect();
            Tree::node(*root, build(&left), build(&right))
        }
    }
}

fn build_balanced(sorted: &[i8]) -> Tree<i8> {
    if sorted.is_empty() {
        return Tree::empty();
    }
    let mid = sorted.len() / 2;
    Tree::node(
        sorted[mid],
        build_balanced(&sorted[..mid]),
        build_balanced(&sorted[mid + 1..]),
    )
}
