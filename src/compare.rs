//! Orderings used to place elements in a [`Tree`][crate::Tree].
//!
//! A tree never calls `Ord::cmp` directly. Every placement and search decision
//! goes through the [`Comparator`] it was built with, which is either
//! [`Natural`] (the element's own `Ord`) or any closure of the shape
//! `Fn(&E, &E) -> Ordering`.
//!
//! # Examples
//!
//! ```
//! use ordtree::Tree;
//!
//! // Longest strings first.
//! let mut tree = Tree::with_comparator(|a: &&str, b: &&str| b.len().cmp(&a.len()));
//! tree.insert("a").unwrap();
//! tree.insert("abc").unwrap();
//! tree.insert("ab").unwrap();
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["abc", "ab", "a"]);
//! ```

use std::cmp::Ordering;

/// A total order over `E`.
///
/// Implementations must be consistent for the lifetime of the tree: if the
/// answer for a pair of stored elements ever changes, the tree's ordering
/// invariant is lost and lookups may miss elements.
pub trait Comparator<E> {
    /// Compares `a` to `b`.
    fn compare(&self, a: &E, b: &E) -> Ordering;
}

/// The element type's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<E> Comparator<E> for Natural
where
    E: Ord,
{
    fn compare(&self, a: &E, b: &E) -> Ordering {
        a.cmp(b)
    }
}

impl<E, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    fn compare(&self, a: &E, b: &E) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_matches_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare(&"b", &"a"), Ordering::Greater);
        assert_eq!(Natural.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn closures_are_comparators() {
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&3, &3), Ordering::Equal);
    }
}
