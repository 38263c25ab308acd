//! Human-readable dumps of a tree's shape.

use std::fmt;

use crate::linked::Node;

/// Spaces per level of depth.
const INDENT: usize = 4;

/// The shape of a tree, printed sideways. Built by [`Tree::pretty`][crate::Tree::pretty].
///
/// Every element gets its own line, indented by its depth, in pre-order: a node, then its left
/// subtree, then its right subtree. When a node has a single child the missing side is printed as
/// `--` so a lone left child can be told apart from a lone right child. An empty tree prints
/// nothing.
///
/// # Examples
///
/// ```
/// use ordtree::Tree;
///
/// let mut tree = Tree::new();
/// for x in [2, 1, 3, 4] {
///     tree.insert(x).unwrap();
/// }
///
/// assert_eq!(
///     tree.pretty().to_string(),
///     "2\n    1\n    3\n        --\n        4\n"
/// );
/// ```
pub struct Pretty<'a, E> {
    root: Option<&'a Node<E>>,
}

impl<'a, E> Pretty<'a, E> {
    pub(crate) fn new(root: Option<&'a Node<E>>) -> Self {
        Self { root }
    }
}

enum Line<'a, E> {
    Element(&'a Node<E>, usize),
    MissingChild(usize),
}

impl<E> fmt::Display for Pretty<'_, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<_> = self.root.map(|root| Line::Element(root, 0)).into_iter().collect();
        while let Some(line) = stack.pop() {
            match line {
                Line::MissingChild(depth) => writeln!(f, "{:width$}--", "", width = depth * INDENT)?,
                Line::Element(node, depth) => {
                    writeln!(f, "{:width$}{}", "", node.element(), width = depth * INDENT)?;

                    // Pushed right first so the left side comes out first.
                    let depth = depth + 1;
                    match (node.left(), node.right()) {
                        (None, None) => {}
                        (Some(left), None) => {
                            stack.push(Line::MissingChild(depth));
                            stack.push(Line::Element(left, depth));
                        }
                        (None, Some(right)) => {
                            stack.push(Line::Element(right, depth));
                            stack.push(Line::MissingChild(depth));
                        }
                        (Some(left), Some(right)) => {
                            stack.push(Line::Element(right, depth));
                            stack.push(Line::Element(left, depth));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
