//! A parent-linked BST. Every node owns its children through raw links and keeps a non-owning
//! link back to its parent, which is what lets a [`Position`] walk to its in-order neighbours
//! without a search from the root.
//!
//! The tree is not self-balancing: its shape is whatever the insertion order produces.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_none());
//!
//! tree.insert(1).unwrap();
//! assert_eq!(tree.find(&1).map(|p| *p.element()), Some(1));
//!
//! // Equal elements are rejected rather than stored twice.
//! assert_eq!(tree.insert(1).unwrap_err(), TreeError::DuplicateKey);
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting an element hands it back.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use log::{debug, trace};

use crate::compare::{Comparator, Natural};
use crate::error::TreeError;
use crate::iter::Iter;
use crate::pretty::Pretty;

/// An unbalanced Binary Search Tree of unique elements ordered by a [`Comparator`]. This can be
/// used for inserting, finding, and deleting elements and for stepping between in-order
/// neighbours.
pub struct Tree<E, C = Natural> {
    // A `Link` rather than an `Option<Box<Node>>` so the tree can move without the root's
    // children losing track of their parent.
    root: Link<E>,
    len: usize,
    comparator: C,
    marker: PhantomData<Box<Node<E>>>,
}

impl<E> Default for Tree<E>
where
    E: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> Drop for Tree<E, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E, C> Clone for Tree<E, C>
where
    E: Clone,
    C: Clone,
{
    /// Copies the tree node for node, so the clone has exactly the same shape.
    fn clone(&self) -> Self {
        let mut tree = Self {
            root: Link(None),
            len: self.len,
            comparator: self.comparator.clone(),
            marker: PhantomData,
        };
        let Some(root) = self.root.node() else {
            return tree;
        };

        let new_root = NonNull::from(Box::leak(Node::new_boxed(
            root.element.clone(),
            Link(None),
        )));
        tree.root = Link(Some(new_root));

        let mut stack = vec![(root, new_root)];
        while let Some((source, copy)) = stack.pop() {
            for (child, is_left) in [(source.left(), true), (source.right(), false)] {
                let Some(child) = child else {
                    continue;
                };
                let new_child = NonNull::from(Box::leak(Node::new_boxed(
                    child.element.clone(),
                    Link(Some(copy)),
                )));
                // SAFETY: `copy` was allocated by this loop and is only reachable through `tree`,
                // which nothing else has seen yet.
                unsafe {
                    if is_left {
                        (*copy.as_ptr()).left = Link(Some(new_child));
                    } else {
                        (*copy.as_ptr()).right = Link(Some(new_child));
                    }
                }
                stack.push((child, new_child));
            }
        }

        tree
    }
}

impl<E, C> fmt::Debug for Tree<E, C>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, E, C> IntoIterator for &'a Tree<E, C> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> Tree<E>
where
    E: Ord,
{
    /// Generate a new, empty `Tree` ordered by `E`'s own [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<E, C> Tree<E, C> {
    /// Generate a new, empty `Tree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// for x in [2, 3, 1] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: Link(None),
            len: 0,
            comparator,
            marker: PhantomData,
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The ordering this tree was built with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The position of the root, if there is one.
    pub fn root(&self) -> Option<Position<'_, E>> {
        self.root.node().map(Position::new)
    }

    /// The position of the smallest element.
    pub fn first(&self) -> Option<Position<'_, E>> {
        self.root.node().map(|root| Position::new(root.leftmost()))
    }

    /// The position of the largest element.
    pub fn last(&self) -> Option<Position<'_, E>> {
        self.root.node().map(|root| Position::new(root.rightmost()))
    }

    /// The number of edges on the longest path from the root to a leaf. Both an empty tree and
    /// a lone root have a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Ascending inserts build a list.
    /// for x in 0..5 {
    ///     tree.insert(x).unwrap();
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.node().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self.root.node(), self.len)
    }

    /// Renders the tree's shape for a human to read. See [`Pretty`] for the layout.
    pub fn pretty(&self) -> Pretty<'_, E> {
        Pretty::new(self.root.node())
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        let mut stack: Vec<_> = self.root.take().0.into_iter().collect();
        while let Some(ptr) = stack.pop() {
            // SAFETY: Every node is owned by exactly one link and we took the root out of the tree,
            // so each node is reached (and freed) once. All of them came from `Node::new_boxed`.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            stack.extend(node.left.0);
            stack.extend(node.right.0);
        }

        if self.len > 0 {
            trace!("cleared {} elements", self.len);
        }
        self.len = 0;
    }

    /// Whether `position` points into this tree.
    fn owns(&self, position: &Position<'_, E>) -> bool {
        let mut node = position.node;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        self.root.points_to(node)
    }

    /// The in-order predecessor of `position`: the position holding the next smaller element.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` came from another tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// let five = tree.find(&5).unwrap();
    /// assert_eq!(tree.predecessor(five).unwrap().map(|p| *p.element()), Some(3));
    ///
    /// let three = tree.find(&3).unwrap();
    /// assert_eq!(tree.predecessor(three).unwrap(), None);
    /// ```
    pub fn predecessor<'a>(
        &'a self,
        position: Position<'a, E>,
    ) -> Result<Option<Position<'a, E>>, TreeError> {
        if !self.owns(&position) {
            return Err(TreeError::InvalidPosition);
        }
        Ok(position.predecessor())
    }

    /// The in-order successor of `position`: the position holding the next larger element.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` came from another tree.
    pub fn successor<'a>(
        &'a self,
        position: Position<'a, E>,
    ) -> Result<Option<Position<'a, E>>, TreeError> {
        if !self.owns(&position) {
            return Err(TreeError::InvalidPosition);
        }
        Ok(position.successor())
    }

    /// Unlinks `node` from the tree, putting its only child (if any) in its place, and returns
    /// its element.
    ///
    /// # Safety
    ///
    /// `node` must be a live node of this tree with at most one child, and no reference into the
    /// tree may be alive.
    unsafe fn splice(&mut self, node: NonNull<Node<E>>) -> E {
        let Node {
            element,
            left,
            right,
            parent,
        } = *Box::from_raw(node.as_ptr());
        debug_assert!(left.0.is_none() || right.0.is_none());

        let child = Link(left.0.or(right.0));
        if let Some(child) = child.0 {
            (*child.as_ptr()).parent = parent;
        }
        match parent.0 {
            None => self.root = child,
            Some(parent) => {
                let parent = parent.as_ptr();
                if (*parent).left.0 == Some(node) {
                    (*parent).left = child;
                } else {
                    debug_assert!((*parent).right.0 == Some(node));
                    (*parent).right = child;
                }
            }
        }

        self.len -= 1;
        element
    }
}

impl<E, C> Tree<E, C>
where
    C: Comparator<E>,
{
    /// Inserts `element` as a new leaf and returns its position.
    ///
    /// # Errors
    ///
    /// [`TreeError::DuplicateKey`] if an element comparing equal is already stored. The tree is
    /// left unchanged and `element` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    ///
    /// let position = tree.insert(1).unwrap();
    /// assert_eq!(*position.element(), 1);
    /// assert!(position.is_root());
    ///
    /// assert_eq!(tree.insert(1).unwrap_err(), TreeError::DuplicateKey);
    /// ```
    pub fn insert(&mut self, element: E) -> Result<Position<'_, E>, TreeError> {
        let mut parent: Option<(NonNull<Node<E>>, Ordering)> = None;
        let mut current = self.root;
        let mut depth = 0;

        while let Some(ptr) = current.0 {
            // SAFETY: Every link reachable from the root points at a live node of this tree.
            let node = unsafe { ptr.as_ref() };
            let side = self.comparator.compare(&element, &node.element);
            current = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => {
                    trace!("rejected duplicate at depth {depth}");
                    return Err(TreeError::DuplicateKey);
                }
            };
            parent = Some((ptr, side));
            depth += 1;
        }

        let leaf = NonNull::from(Box::leak(Node::new_boxed(
            element,
            Link(parent.map(|(ptr, _)| ptr)),
        )));
        match parent {
            None => self.root = Link(Some(leaf)),
            Some((ptr, side)) => {
                // SAFETY: `ptr` is a live node of this tree and we hold `&mut self` so nothing else
                // references it.
                let parent = unsafe { &mut *ptr.as_ptr() };
                if side == Ordering::Less {
                    parent.left = Link(Some(leaf));
                } else {
                    parent.right = Link(Some(leaf));
                }
            }
        }
        self.len += 1;
        trace!("attached leaf at depth {depth}, len is now {}", self.len);

        // SAFETY: The leaf stays allocated until it is deleted, which needs `&mut self`, so it
        // outlives the returned borrow.
        let leaf = unsafe { leaf.as_ref() };
        if cfg!(debug_assertions) {
            if let Some(parent) = leaf.parent() {
                let side = self.comparator.compare(&leaf.element, &parent.element);
                assert!(side != Ordering::Equal);
                assert_eq!(side == Ordering::Less, parent.left.points_to(leaf));
            }
        }
        Ok(Position::new(leaf))
    }

    fn find_node(&self, element: &E) -> Option<NonNull<Node<E>>> {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Every link reachable from the root points at a live node of this tree.
            let node = unsafe { ptr.as_ref() };
            current = match self.comparator.compare(element, &node.element) {
                Ordering::Less => node.left.0,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right.0,
            };
        }

        None
    }

    /// Potentially finds the position holding an element equal to `element`. If there is none,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.find(&1).map(|p| *p.element()), Some(1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, element: &E) -> Option<Position<'_, E>> {
        self.find_node(element).map(|ptr| {
            // SAFETY: `find_node` only returns live nodes of this tree, borrowed for `&self`.
            Position::new(unsafe { ptr.as_ref() })
        })
    }

    /// Whether an element equal to `element` is stored.
    pub fn contains(&self, element: &E) -> bool {
        self.find_node(element).is_some()
    }

    /// Deletes the element equal to `element` from the tree and returns it. If the tree holds no
    /// such element, nothing happens.
    ///
    /// A node with two children keeps its place in the tree: it takes over the element of its
    /// in-order predecessor and the predecessor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [2, 1, 3] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn delete(&mut self, element: &E) -> Option<E> {
        let target = self.find_node(element)?;

        // SAFETY: `target` and everything below it are live nodes of this tree, and `&mut self`
        // means no positions or iterators are looking at them.
        let removed = unsafe {
            let node = target.as_ptr();
            match ((*node).left.0, (*node).right.0) {
                (Some(left), Some(_)) => {
                    let predecessor = Node::rightmost_ptr(left);
                    ptr::swap(
                        ptr::addr_of_mut!((*node).element),
                        ptr::addr_of_mut!((*predecessor.as_ptr()).element),
                    );
                    debug!("deleting node with two children, splicing out its predecessor");
                    self.splice(predecessor)
                }
                _ => self.splice(target),
            }
        };
        trace!("deleted element, len is now {}", self.len);

        Some(removed)
    }
}

/// A handle on one element of a [`Tree`].
///
/// A position borrows its tree, so the tree can't change while the position is alive and a
/// position can never outlive the node it names.
pub struct Position<'a, E> {
    node: &'a Node<E>,
}

impl<E> Clone for Position<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<E> Copy for Position<'_, E> {}

/// Positions are equal when they name the same node.
impl<E> PartialEq for Position<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.node, other.node)
    }
}
impl<E> Eq for Position<'_, E> {}

impl<E> fmt::Debug for Position<'_, E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Position").field(&self.node.element).finish()
    }
}

impl<'a, E> Position<'a, E> {
    fn new(node: &'a Node<E>) -> Self {
        Self { node }
    }

    /// The element stored here.
    pub fn element(&self) -> &'a E {
        &self.node.element
    }

    /// The position above this one, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.node.parent().map(Self::new)
    }

    /// The left child, holding a smaller element.
    pub fn left(&self) -> Option<Self> {
        self.node.left().map(Self::new)
    }

    /// The right child, holding a larger element.
    pub fn right(&self) -> Option<Self> {
        self.node.right().map(Self::new)
    }

    /// Whether this is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.node.parent.0.is_none()
    }

    /// Whether this position has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.left.0.is_none() && self.node.right.0.is_none()
    }

    /// How many edges separate this position from the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.node;
        while let Some(parent) = node.parent() {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// The position holding the next smaller element, found by walking the tree's links rather
    /// than searching from the root.
    pub fn predecessor(&self) -> Option<Self> {
        self.node.predecessor().map(Self::new)
    }

    /// The position holding the next larger element.
    pub fn successor(&self) -> Option<Self> {
        self.node.successor().map(Self::new)
    }
}

pub(crate) struct Link<E>(Option<NonNull<Node<E>>>);

impl<E> Clone for Link<E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<E> Copy for Link<E> {}

// SAFETY: A `Link` is a plain pointer to a `Node<E>`. Sending or sharing one is as safe as sending
// or sharing the `E` behind it, and all mutation goes through `&mut Tree`.
unsafe impl<E: Send> Send for Link<E> {}
unsafe impl<E: Sync> Sync for Link<E> {}

impl<E> Link<E> {
    fn node(&self) -> Option<&Node<E>> {
        // SAFETY: If the link is not `None` then it points at a live `Node` of the tree that owns
        // this link. Nodes are only mutated through `&mut Tree`, which can't coexist with the
        // `&self` this borrow is tied to.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    fn points_to(&self, node: &Node<E>) -> bool {
        self.0.map_or(false, |ptr| ptr::eq(ptr.as_ptr(), node))
    }
}

pub(crate) struct Node<E> {
    element: E,
    left: Link<E>,
    right: Link<E>,
    // Never used to free anything, only to walk up.
    parent: Link<E>,
}

impl<E> Node<E> {
    fn new_boxed(element: E, parent: Link<E>) -> Box<Self> {
        Box::new(Node {
            element,
            left: Link(None),
            right: Link(None),
            parent,
        })
    }

    pub(crate) fn element(&self) -> &E {
        &self.element
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    fn parent(&self) -> Option<&Self> {
        self.parent.node()
    }

    fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Like [`Node::rightmost`] but keeps the pointer's provenance so the result can be written
    /// through.
    ///
    /// # Safety
    ///
    /// `ptr` must point at a live node.
    unsafe fn rightmost_ptr(mut ptr: NonNull<Self>) -> NonNull<Self> {
        while let Some(right) = (*ptr.as_ptr()).right.0 {
            ptr = right;
        }
        ptr
    }

    fn predecessor(&self) -> Option<&Self> {
        if let Some(left) = self.left() {
            return Some(left.rightmost());
        }

        // Climb until we come up out of a right subtree.
        let mut current = self;
        while let Some(parent) = current.parent() {
            if parent.right.points_to(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    fn successor(&self) -> Option<&Self> {
        if let Some(right) = self.right() {
            return Some(right.leftmost());
        }

        let mut current = self;
        while let Some(parent) = current.parent() {
            if parent.left.points_to(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }
}
