use ordtree::{Tree, TreeError};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same elements in both.
fn do_ops<E>(ops: &[Op<E>], bst: &mut Tree<E>, set: &mut BTreeSet<E>)
where
    E: Clone + Ord + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(x) => match bst.insert(x.clone()) {
                Ok(_) => assert!(set.insert(x.clone())),
                Err(e) => {
                    assert_eq!(e, TreeError::DuplicateKey);
                    assert!(set.contains(x));
                }
            },
            Op::Delete(x) => {
                assert_eq!(bst.delete(x), set.take(x));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(|p| p.element()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn len_counts_successful_operations(xs: Vec<u8>, deletes: Vec<u8>) -> bool {
    let mut tree = Tree::new();
    let inserted = xs.into_iter().filter(|x| tree.insert(*x).is_ok()).count();
    let deleted = deletes.iter().filter(|x| tree.delete(x).is_some()).count();

    tree.len() == inserted - deleted && tree.iter().count() == tree.len()
}

#[quickcheck]
fn neighbours_walk_the_whole_tree(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    for x in xs {
        let _ = tree.insert(x);
    }

    let mut forwards = Vec::new();
    let mut position = tree.first();
    while let Some(p) = position {
        forwards.push(*p.element());
        position = tree.successor(p).unwrap();
    }

    let mut backwards = Vec::new();
    let mut position = tree.last();
    while let Some(p) = position {
        backwards.push(*p.element());
        position = tree.predecessor(p).unwrap();
    }
    backwards.reverse();

    forwards.iter().eq(tree.iter()) && forwards == backwards
}
