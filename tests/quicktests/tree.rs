use functree::{Traversal, Tree};

use std::cell::Cell;
use std::rc::Rc;

use crate::Shape;

const TRAVERSALS: [Traversal; 3] = [Traversal::PreOrder, Traversal::InOrder, Traversal::PostOrder];

fn values(tree: &Tree<i8>, traversal: Traversal) -> Vec<i8> {
    tree.iter(traversal).copied().collect()
}

/// Walks the tree recursively through the node accessors, independently of `Iter`.
fn walk(tree: &Tree<i8>, traversal: Traversal, out: &mut Vec<i8>) {
    if let Some(node) = tree.root() {
        if traversal == Traversal::PreOrder {
            out.push(*node.value());
        }
        walk(node.left(), traversal, out);
        if traversal == Traversal::InOrder {
            out.push(*node.value());
        }
        walk(node.right(), traversal, out);
        if traversal == Traversal::PostOrder {
            out.push(*node.value());
        }
    }
}

fn height(tree: &Tree<i8>) -> usize {
    tree.root()
        .map_or(0, |node| height(node.left()).max(height(node.right())) + 1)
}

#[quickcheck]
fn size_counts_every_value(shape: Shape) -> bool {
    let tree = shape.tree();
    tree.size() == shape.0.len() && tree.size() == tree.fold(|_, l: usize, r: usize| l + r + 1, 0)
}

#[quickcheck]
fn height_matches_recursive_height(shape: Shape) -> bool {
    let tree = shape.tree();
    tree.height() == height(&tree) && (tree.height() == 0) == tree.is_empty()
}

#[quickcheck]
fn traversals_match_recursive_walk(shape: Shape) -> bool {
    let tree = shape.tree();
    TRAVERSALS.iter().all(|&traversal| {
        let mut expected = Vec::new();
        walk(&tree, traversal, &mut expected);
        values(&tree, traversal) == expected
    })
}

#[quickcheck]
fn accumulate_visits_in_traversal_order(shape: Shape) -> bool {
    let tree = shape.tree();
    TRAVERSALS.iter().all(|&traversal| {
        let accumulated = tree.accumulate(
            |v, mut acc: Vec<i8>| {
                acc.push(*v);
                acc
            },
            Vec::new(),
            traversal,
        );
        accumulated == values(&tree, traversal)
    })
}

#[quickcheck]
fn map_identity_keeps_tree(shape: Shape) -> bool {
    let tree = shape.tree();
    let mapped = tree.map(|x| *x);

    mapped.size() == tree.size()
        && mapped.height() == tree.height()
        && values(&mapped, Traversal::InOrder) == values(&tree, Traversal::InOrder)
        && mapped == tree
}

#[quickcheck]
fn map_composes(shape: Shape) -> bool {
    let tree = shape.tree();
    let f = |x: &i8| x.wrapping_mul(3);
    let g = |x: &i8| x.wrapping_add(7);

    let twice = tree.map(f).map(g);
    let once = tree.map(|x| g(&f(x)));
    values(&twice, Traversal::InOrder) == values(&once, Traversal::InOrder)
}

#[quickcheck]
fn lazy_map_agrees_with_map_and_computes_once(shape: Shape) -> bool {
    let tree = shape.tree();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let lazy = tree.lazy_map(move |x| {
        counter.set(counter.get() + 1);
        x.wrapping_sub(1)
    });
    let untouched = calls.get() == 0;

    let eager = tree.map(|x| x.wrapping_sub(1));
    let agrees = TRAVERSALS
        .iter()
        .all(|&traversal| values(&lazy, traversal) == values(&eager, traversal));

    untouched && agrees && calls.get() == tree.size()
}

#[quickcheck]
fn filter_keeps_inorder_of_matching_values(shape: Shape) -> bool {
    let tree = shape.tree();
    let before = values(&tree, Traversal::PreOrder);

    let filtered = tree.filter(|x| x % 3 != 0);
    let expected: Vec<_> = values(&tree, Traversal::InOrder)
        .into_iter()
        .filter(|x| x % 3 != 0)
        .collect();

    values(&filtered, Traversal::InOrder) == expected
        && values(&tree, Traversal::PreOrder) == before
}

#[quickcheck]
fn balanced_search_tree_is_bst(shape: Shape) -> bool {
    let tree = shape.search_tree();
    let inorder = values(&tree, Traversal::InOrder);

    tree.is_bst() && inorder.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn filter_keeps_bst_ordered(shape: Shape) -> bool {
    let tree = shape.search_tree().filter(|x| x % 2 == 0);
    tree.is_bst()
}

#[quickcheck]
fn clone_is_equal_but_separate(shape: Shape) -> bool {
    let tree = shape.tree();
    let cloned = tree.clone();

    let separate = match (&tree, &cloned) {
        (Tree::Node(a), Tree::Node(b)) => !Rc::ptr_eq(a, b),
        (Tree::Empty, Tree::Empty) => true,
        _ => false,
    };
    separate && cloned == tree
}
