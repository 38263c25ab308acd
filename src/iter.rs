//! In-order iteration. The walk keeps its own stack of pending ancestors instead of recursing, so
//! a tree that degenerated into a long list iterates as happily as a bushy one.

use std::iter::FusedIterator;

use crate::linked::Node;

/// Iterator over a tree's elements in ascending order. Built by
/// [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, E> {
    // Nodes whose element hasn't been yielded yet, deepest on top. Their right subtrees are still
    // unvisited.
    stack: Vec<&'a Node<E>>,
    remaining: usize,
}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(root: Option<&'a Node<E>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<E>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}
