//! Everything related to enumerating tries.
//!
//! The module is home to the following items:
//! - [`Descendants`] — the pre-order walk primitive, yielding a reference to every node of a subtree
//! - [`Keys`] and [`Values`] — projections of the walk which skip structural nodes, yielding the paths and values of the entries actually stored in the trie
//! - [`Edges`] — the *edge projection*: a flat, order-preserving flattening of parent→child relationships for consumers which want a graph-edge view rather than a tree
//! - [`Branch`] and [`Branches`] — the default edge record and the projection producing it
//!
//! All of the iterators here are lazy, restartable, pull-based views over live node state: memory use is proportional to nothing at all — the walk keeps a single cursor and climbs parent links instead of maintaining a stack — and each call to the producing method starts a fresh pass. Sibling order within one pass is the insertion order of the children, though that is an implementation detail rather than a contract.
//!
//! [`Descendants`]: struct.Descendants.html " "
//! [`Keys`]: struct.Keys.html " "
//! [`Values`]: struct.Values.html " "
//! [`Edges`]: struct.Edges.html " "
//! [`Branch`]: struct.Branch.html " "
//! [`Branches`]: type.Branches.html " "

use core::{
    fmt::{self, Formatter, Debug},
    iter::FusedIterator,
};
use alloc::vec::Vec;
use crate::{
    storage::{Storage, DefaultStorage},
    trie::{Trie, Node, NodeRef},
};

/// Returns the node which follows `current` in a pre-order walk of the subtree rooted at `start`, or `None` if `current` is the last one.
///
/// Descends into the first child where possible, otherwise moves to the next sibling of the nearest ancestor (inclusive) which still has one, never leaving the subtree.
fn preorder_successor<K, V, S>(tree: &Trie<K, V, S>, start: usize, current: usize) -> Option<usize>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    let node = tree.node(current);
    if let Some(child) = node.first_child {
        return Some(child);
    }
    let mut current = current;
    while current != start {
        let node = tree.node(current);
        if let Some(sibling) = node.next_sibling {
            return Some(sibling);
        }
        current = node
            .parent
            .expect("only the root node has no parent, and the walk never climbs past its start");
    }
    None
}

/// An iterator over references to every node of a subtree, in pre-order: a node is yielded before any of its children, siblings in insertion order.
///
/// Yielded references know their absolute paths, so this is the "(path, node) pairs" enumeration; filtering out structural nodes is left to [`Keys`] and [`Values`] so that the same walk primitive serves both.
///
/// [`Keys`]: struct.Keys.html " "
/// [`Values`]: struct.Values.html " "
#[derive(Debug)]
pub struct Descendants<'a, K, V, S = DefaultStorage<Node<K, V>>>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    tree: &'a Trie<K, V, S>,
    start: usize,
    next: Option<usize>,
}
impl<'a, K, V, S> Descendants<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Trie<K, V, S>, start: usize) -> Self {
        Self {
            tree,
            start,
            next: Some(start),
        }
    }
}
impl<'a, K, V, S> Iterator for Descendants<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, K, V, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = preorder_successor(self.tree, self.start, current);
        Some(unsafe {
            // SAFETY: the walk only ever follows child, sibling and parent links, all of
            // which hold indices of nodes linked into the trie
            NodeRef::new_raw_unchecked(self.tree, current)
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (1, Some(self.tree.node_count()))
        } else {
            (0, Some(0))
        }
    }
}
impl<K, V, S> FusedIterator for Descendants<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Copy for Descendants<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Clone for Descendants<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}

/// An iterator over the absolute paths of a subtree's nodes which carry a value, in pre-order.
///
/// Structural nodes are skipped: a path appears here exactly when something was stored at it.
#[derive(Debug)]
pub struct Keys<'a, K, V, S = DefaultStorage<Node<K, V>>>(Descendants<'a, K, V, S>)
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq;
impl<'a, K, V, S> Keys<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Trie<K, V, S>, start: usize) -> Self {
        Self(Descendants::new(tree, start))
    }
}
impl<'a, K, V, S> Iterator for Keys<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    type Item = Vec<K>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node_ref = self.0.next()?;
            if node_ref.value().is_some() {
                return Some(node_ref.path());
            }
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.0.size_hint().1)
    }
}
impl<K, V, S> FusedIterator for Keys<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Copy for Keys<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Clone for Keys<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}

/// An iterator over references to a subtree's values, in the same order as [`Keys`].
///
/// [`Keys`]: struct.Keys.html " "
#[derive(Debug)]
pub struct Values<'a, K, V, S = DefaultStorage<Node<K, V>>>(Descendants<'a, K, V, S>)
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq;
impl<'a, K, V, S> Values<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Trie<K, V, S>, start: usize) -> Self {
        Self(Descendants::new(tree, start))
    }
}
impl<'a, K, V, S> Iterator for Values<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node_ref = self.0.next()?;
            if let Some(value) = node_ref.value() {
                return Some(value);
            }
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.0.size_hint().1)
    }
}
impl<K, V, S> FusedIterator for Values<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Copy for Values<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Clone for Values<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}

/// An iterator flattening a subtree into a sequence of parent→child relationship records.
///
/// For every `(key, child)` pair of every node in pre-order, the caller-supplied builder is invoked with the key of the node currently being flattened (`None` when that node is the root of the trie), the child's key and the child's optional value, and its return value is yielded. Threading an identity for the *current* node through the projection is the caller's responsibility; see [`Branch`] for what the default convention does about that.
///
/// [`Branch`]: struct.Branch.html " "
pub struct Edges<'a, K, V, S, F>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    walk: Descendants<'a, K, V, S>,
    parent: Option<usize>,
    child: Option<usize>,
    build: F,
}
impl<'a, K, V, S, F> Edges<'a, K, V, S, F>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(crate) fn new(tree: &'a Trie<K, V, S>, start: usize, build: F) -> Self {
        Self {
            walk: Descendants::new(tree, start),
            parent: None,
            child: None,
            build,
        }
    }
}
impl<'a, K, V, S, F, E> Iterator for Edges<'a, K, V, S, F>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
    F: FnMut(Option<&'a K>, &'a K, Option<&'a V>) -> E,
{
    type Item = E;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(index) = self.child {
                let tree = self.walk.tree;
                let child = tree.node(index);
                self.child = child.next_sibling;
                let parent = self
                    .parent
                    .expect("a child cursor is only ever set together with its parent");
                let parent_key = tree.node(parent).key.as_ref();
                let key = child.key.as_ref().expect("non-root nodes always have a key");
                return Some((self.build)(parent_key, key, child.value.as_ref()));
            }
            let node_ref = self.walk.next()?;
            let index = node_ref.raw_index();
            self.parent = Some(index);
            self.child = self.walk.tree.node(index).first_child;
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.walk.size_hint().1)
    }
}
impl<'a, K, V, S, F, E> FusedIterator for Edges<'a, K, V, S, F>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
    F: FnMut(Option<&'a K>, &'a K, Option<&'a V>) -> E,
{
}
impl<'a, K, V, S, F> Clone for Edges<'a, K, V, S, F>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            walk: self.walk,
            parent: self.parent,
            child: self.child,
            build: self.build.clone(),
        }
    }
}
impl<K, V, S, F> Debug for Edges<'_, K, V, S, F>
where
    S: Storage<Element = Node<K, V>> + Debug,
    K: Clone + Debug + Eq,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edges")
            .field("walk", &self.walk)
            .field("parent", &self.parent)
            .field("child", &self.child)
            .finish()
    }
}

/// A single parent→child relationship record, as produced by the default edge projection.
///
/// `parent` is the *key* of the parent node, absent for edges hanging off the root; `relation` is an optional edge label, unlabeled by default; `child` is the identity of the child node.
///
/// Using the parent's key as its identity token is only correct when keys are globally unique across the trie — which the data model does not guarantee, since the same key may legitimately recur under different parents. This convention is kept as-is from the default projection's origin rather than papered over with generated identifiers; when keys can repeat, supply your own builder to [`edges`] and thread a real identity through it.
///
/// [`edges`]: ../trie/struct.Trie.html#method.edges " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Branch<K, R = (), I = K> {
    /// The identity of the parent node, or `None` for root-level edges.
    pub parent: Option<K>,
    /// The label of the edge, if any.
    pub relation: Option<R>,
    /// The identity of the child node.
    pub child: I,
}
impl<K, R, I> Branch<K, R, I> {
    /// Creates an unlabeled edge record.
    #[inline(always)]
    pub fn new(parent: Option<K>, child: I) -> Self {
        Self {
            parent,
            relation: None,
            child,
        }
    }
    /// Creates an edge record carrying a label.
    #[inline(always)]
    pub fn labeled(parent: Option<K>, relation: R, child: I) -> Self {
        Self {
            parent,
            relation: Some(relation),
            child,
        }
    }
}

/// An iterator flattening a subtree into the default [`Branch`] records.
///
/// [`Branch`]: struct.Branch.html " "
pub type Branches<'a, K, V, S = DefaultStorage<Node<K, V>>> =
    Edges<'a, K, V, S, fn(Option<&'a K>, &'a K, Option<&'a V>) -> Branch<K>>;

/// The builder behind [`Branches`]: clones the parent's key as the parent identity and the child's key as the child identity, ignoring the value.
///
/// [`Branches`]: type.Branches.html " "
pub(crate) fn branch_record<K, V>(parent: Option<&K>, key: &K, _value: Option<&V>) -> Branch<K>
where
    K: Clone,
{
    Branch::new(parent.cloned(), key.clone())
}
