//! This crate exposes an ordered Binary Search Tree (BST) of unique elements whose nodes know
//! their parents.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! "Less" and "greater" here are decided by a [`Comparator`] chosen when the tree is built, so
//! the same element type can be stored in different orders. Two elements the comparator calls
//! equal can't both be stored.
//!
//! Because every `Node` also points back at its parent, a [`Position`] in the tree can step to
//! its in-order predecessor or successor by walking links, without searching from the root.
//!
//! The tree does not rebalance itself. Its height depends on insertion order: `O(lg N)` on
//! average for random input and `N` for sorted input.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
pub mod error;
pub mod iter;
pub mod linked;
pub mod pretty;


pub use compare::{Comparator, Natural};
pub use error::TreeError;
pub use linked::{Position, Tree};
