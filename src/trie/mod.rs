//! Path-keyed tries, which map *sequences* of discrete key elements to values, such that keys sharing a prefix share structure.
//!
//! A trie node may carry a value, carry children, both, or neither — a node without a value is a *structural* node, present solely because it lies on the path to a descendant which does have one. Looking a value up means descending one key element per level; inserting a value lazily materializes the structural nodes along the way.
//!
//! # Example
//! ```rust
//! use trellis::trie::Trie;
//!
//! // Create the trie. The root node always exists and initially has no value. The turbofish
//! // there is needed to state that we are using the default storage method instead of asking
//! // the compiler to infer it, which would be impossible.
//! let mut trie = Trie::<_, _>::new();
//!
//! // Insertion creates every missing node along the path and returns the value which the
//! // terminal node held before, if any:
//! assert_eq!(trie.insert(&["usr", "bin"], 1987), None);
//! assert_eq!(trie.insert(&["usr", "bin"], 2014), Some(1987));
//!
//! // The node at ["usr"] was created as a structural waypoint: it is present but has no value.
//! assert!(trie.contains_path(&["usr"]));
//! assert_eq!(trie.get(&["usr"]), None);
//!
//! // Read-only resolution of a missing path fails with the unresolved suffix instead:
//! let error = trie.descend(&["usr", "share", "doc"]).unwrap_err();
//! assert_eq!(error.remaining, ["share", "doc"]);
//! ```

use core::{
    fmt::{self, Formatter, Debug, Display},
    iter::FromIterator,
};
use alloc::vec::Vec;
use crate::{
    storage::{Storage, DefaultStorage},
    traversal::{Descendants, Keys, Values, Edges, Branches},
    KeyNotFoundError,
};

mod node;
mod node_ref;
mod node_ref_mut;
#[cfg(test)]
mod tests;

pub use node::Node;
pub use node_ref::{NodeRef, Children};
pub use node_ref_mut::NodeRefMut;

/// A path-keyed trie.
///
/// See the [module-level documentation] for more.
///
/// Cloning the trie clones its entire arena, which makes `clone` the snapshot operation: enumerate the clone while the original keeps changing, or hand it to another thread. Within one trie, Rust's borrowing rules already prevent mutation while an enumeration is in progress.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug)]
pub struct Trie<K, V, S = DefaultStorage<Node<K, V>>>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    storage: S,
    root: usize,
}
impl<K, V, S> Trie<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    /// Creates a trie whose root node has no value.
    ///
    /// # Example
    /// ```rust
    /// # use trellis::Trie;
    /// // The turbofish there is needed to state that we are using the default storage method
    /// // instead of asking the compiler to infer it, which would be impossible.
    /// let trie = Trie::<u8, u64>::new();
    ///
    /// // No other nodes have been created yet, and the root is a structural node:
    /// assert_eq!(trie.node_count(), 1);
    /// assert_eq!(trie.root().value(), None);
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        let mut storage = S::new();
        let root = storage.add(Node::root(None));
        Self { storage, root }
    }
    /// Creates a trie whose root node holds the specified value.
    #[inline(always)]
    pub fn with_root_value(value: V) -> Self {
        let mut storage = S::new();
        let root = storage.add(Node::root(Some(value)));
        Self { storage, root }
    }
    /// Creates a trie with the specified capacity for the storage.
    ///
    /// # Panics
    /// The storage may panic if it has fixed capacity and the specified value does not match it.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut storage = S::with_capacity(capacity);
        let root = storage.add(Node::root(None));
        Self { storage, root }
    }

    /// Returns a reference to the root node of the trie.
    #[inline(always)]
    pub fn root(&self) -> NodeRef<'_, K, V, S> {
        unsafe {
            // SAFETY: tries cannot be created without a root
            NodeRef::new_raw_unchecked(self, self.root)
        }
    }
    /// Returns a *mutable* reference to the root node of the trie, allowing modifications to the entire trie.
    #[inline(always)]
    pub fn root_mut(&mut self) -> NodeRefMut<'_, K, V, S> {
        unsafe {
            // SAFETY: as above
            NodeRefMut::new_raw_unchecked(self, self.root)
        }
    }

    /// Returns the number of nodes in the trie, counting the root and structural nodes.
    ///
    /// Nodes are never removed, so this only ever grows.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.storage.len()
    }
    /// Reserves capacity for at least `additional` more nodes.
    ///
    /// # Panics
    /// Storages with a fixed capacity may panic if they cannot accommodate the specified amount of elements.
    #[inline(always)]
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional)
    }
    /// Shrinks the capacity of the backing storage as much as possible.
    #[inline(always)]
    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit()
    }

    /// Returns a reference to the value at the specified path, or `None` if the path is absent *or* resolves to a structural node.
    ///
    /// To tell those two cases apart, use [`descend`] or [`contains_path`].
    ///
    /// [`descend`]: #method.descend " "
    /// [`contains_path`]: #method.contains_path " "
    #[inline(always)]
    pub fn get(&self, path: &[K]) -> Option<&V> {
        self.descend(path).ok()?.value()
    }
    /// Resolves `path` against the root, returning a reference to the node it leads to.
    ///
    /// Fails on the first missing key with the *unconsumed* suffix of the path, the missing key included. An empty path resolves to the root itself. Resolution never modifies the trie.
    #[inline(always)]
    pub fn descend(&self, path: &[K]) -> Result<NodeRef<'_, K, V, S>, KeyNotFoundError<K>> {
        self.root().descend(path)
    }
    /// Returns `true` if a node exists at the specified path, `false` otherwise.
    ///
    /// This checks *structural* presence: a valueless waypoint node still satisfies it. An empty path is always present, and a missing path is a `false`, not an error.
    #[inline(always)]
    pub fn contains_path(&self, path: &[K]) -> bool {
        self.root().contains_path(path)
    }
    /// Inserts a value at the specified path, creating every missing node along the way, and returns the value the terminal node held immediately before.
    ///
    /// Existing children of the terminal node are preserved. There is no way to retrieve the previous value afterwards other than capturing this return value.
    ///
    /// # Example
    /// ```rust
    /// # use trellis::Trie;
    /// let mut trie = Trie::<_, _>::new();
    /// assert_eq!(trie.insert(&['a', 'b'], "deep"), None);
    /// assert_eq!(trie.insert(&['a'], "shallow"), None);
    /// // Overwriting returns the previous value and leaves the subtree alone:
    /// assert_eq!(trie.insert(&['a'], "replacement"), Some("shallow"));
    /// assert_eq!(trie.get(&['a', 'b']), Some(&"deep"));
    /// ```
    #[inline]
    pub fn insert(&mut self, path: &[K], value: V) -> Option<V> {
        let root = self.root;
        let index = self.descend_or_insert_index(root, path, |_| None);
        self.node_mut(index).value.replace(value)
    }
    /// Resolves `path` against the root, creating every missing node along the way with no value. Never fails.
    #[inline(always)]
    pub fn descend_or_insert(&mut self, path: &[K]) -> NodeRefMut<'_, K, V, S> {
        self.root_mut().descend_or_insert(path)
    }
    /// Resolves `path` against the root, creating every missing node along the way; each created node's initial value is produced by calling `materializer` with the partial path up to and including that node's key. Never fails.
    #[inline(always)]
    pub fn descend_or_insert_with<F>(&mut self, path: &[K], materializer: F) -> NodeRefMut<'_, K, V, S>
    where
        F: FnMut(&[K]) -> Option<V>,
    {
        self.root_mut().descend_or_insert_with(path, materializer)
    }

    /// Returns an iterator over references to every node of the trie in pre-order: a node is visited before its children, siblings in insertion order. The root is visited first.
    #[inline(always)]
    pub fn descendants(&self) -> Descendants<'_, K, V, S> {
        self.root().descendants()
    }
    /// Returns an iterator over the paths of the nodes which carry a value, in pre-order. Structural nodes are skipped.
    ///
    /// # Example
    /// ```rust
    /// # use trellis::Trie;
    /// let mut trie = Trie::<_, _>::new();
    /// trie.insert(&["a", "b"], 2);
    /// trie.insert(&["a"], 1);
    /// let keys: Vec<Vec<&str>> = trie.keys().collect();
    /// assert_eq!(keys, [vec!["a"], vec!["a", "b"]]);
    /// ```
    #[inline(always)]
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        self.root().keys()
    }
    /// Returns an iterator over references to the values of the trie, in the same order as [`keys`].
    ///
    /// [`keys`]: #method.keys " "
    #[inline(always)]
    pub fn values(&self) -> Values<'_, K, V, S> {
        self.root().values()
    }
    /// Flattens the trie into a sequence of parent→child relationship records, calling `build` once for every `(key, child)` pair of every node in pre-order.
    ///
    /// `build` receives the key of the node currently being flattened (`None` when that node is the root), the child's key and the child's optional value.
    #[inline(always)]
    pub fn edges<E, F>(&self, build: F) -> Edges<'_, K, V, S, F>
    where
        F: FnMut(Option<&K>, &K, Option<&V>) -> E,
    {
        self.root().edges(build)
    }
    /// Flattens the trie into [`Branch`] records, using the parent node's *key* as the identity token.
    ///
    /// Note that a key is only a correct identity when keys are globally unique across the trie, which the data model does not guarantee; see the type-level docs of [`Branch`] for details.
    ///
    /// [`Branch`]: ../traversal/struct.Branch.html " "
    #[inline(always)]
    pub fn branches(&self) -> Branches<'_, K, V, S> {
        self.root().branches()
    }

    pub(crate) fn node(&self, index: usize) -> &Node<K, V> {
        debug_assert!(
            index < self.storage.len(),
            "\
debug index check failed: tried to reference node {} which is not present in the storage",
            index,
        );
        unsafe {
            // SAFETY: all indices stored in node links and handed out to node references
            // originate from this trie's own append-only storage
            self.storage.get_unchecked(index)
        }
    }
    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<K, V> {
        debug_assert!(
            index < self.storage.len(),
            "\
debug index check failed: tried to reference node {} which is not present in the storage",
            index,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(index)
        }
    }
    pub(crate) fn storage_len(&self) -> usize {
        self.storage.len()
    }
    /// Scans the child chain of `parent` for a node filed under `key`.
    pub(crate) fn find_child(&self, parent: usize, key: &K) -> Option<usize> {
        let mut current = self.node(parent).first_child;
        while let Some(index) = current {
            let node = self.node(index);
            match &node.key {
                Some(k) if k == key => return Some(index),
                _ => current = node.next_sibling,
            }
        }
        None
    }
    /// Appends a new child of `parent` to the storage and links it at the end of the sibling chain. The caller must have checked that no child with this key exists yet.
    pub(crate) fn insert_child(&mut self, parent: usize, key: K, value: Option<V>) -> usize {
        debug_assert!(
            self.find_child(parent, &key).is_none(),
            "tried to insert a child with a key which is already taken by a sibling",
        );
        let new = self.storage.add(Node::child(key, value, parent));
        let previous_last = self.node_mut(parent).last_child.replace(new);
        match previous_last {
            Some(last) => self.node_mut(last).next_sibling = Some(new),
            None => self.node_mut(parent).first_child = Some(new),
        }
        new
    }
    /// Walks `path` downwards from `start`, creating every missing node; `materializer` is invoked once per *created* node with the partial path up to and including its key.
    pub(crate) fn descend_or_insert_index<F>(
        &mut self,
        start: usize,
        path: &[K],
        mut materializer: F,
    ) -> usize
    where
        F: FnMut(&[K]) -> Option<V>,
    {
        let mut current = start;
        let mut partial = Vec::with_capacity(path.len());
        for key in path {
            partial.push(key.clone());
            current = match self.find_child(current, key) {
                Some(existing) => existing,
                None => {
                    let value = materializer(&partial);
                    self.insert_child(current, key.clone(), value)
                }
            };
        }
        current
    }
}
impl<K, V, S> Default for Trie<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
impl<K, V, S> FromIterator<(Vec<K>, V)> for Trie<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    /// Builds a trie by applying [`insert`] to each `(path, value)` entry in order: later entries with an identical path overwrite earlier ones' value, while any distinct child paths created along the way accumulate.
    ///
    /// [`insert`]: struct.Trie.html#method.insert " "
    fn from_iter<I: IntoIterator<Item = (Vec<K>, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
impl<K, V, S> Extend<(Vec<K>, V)> for Trie<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn extend<I: IntoIterator<Item = (Vec<K>, V)>>(&mut self, iter: I) {
        for (path, value) in iter {
            self.insert(&path, value);
        }
    }
}
impl<K, V, S> Display for Trie<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq + Display,
    V: Display,
{
    /// Renders a depth-indented dump of the whole trie; see the [`NodeRef` `Display` implementation] for the exact shape.
    ///
    /// [`NodeRef` `Display` implementation]: struct.NodeRef.html#impl-Display " "
    #[inline(always)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.root(), f)
    }
}

/// A trie which uses a `Vec` as backing storage.
///
/// The default `Trie` type already uses this, so this is only provided for explicitness and consistency.
#[allow(unused_qualifications)]
pub type VecTrie<K, V> = Trie<K, V, alloc::vec::Vec<Node<K, V>>>;
