use core::fmt::Debug;
use alloc::vec::Vec;
use crate::{
    storage::{Storage, DefaultStorage},
    KeyNotFoundError,
};
use super::{Trie, Node, NodeRef};

/// A *mutable* reference to a node in a trie.
///
/// Since this type does not point to the node directly, but rather the trie the node is in and the index of the node in the storage, it can be used to traverse the trie and modify it as a whole.
///
/// The create-missing operations here deliberately have a different error contract than the read-only ones on [`NodeRef`]: [`descend_or_insert`] and friends always succeed by constructing the missing structure, while [`descend`] fails cleanly on the first absent segment and leaves the trie untouched.
///
/// [`NodeRef`]: struct.NodeRef.html " "
/// [`descend_or_insert`]: #method.descend_or_insert " "
/// [`descend`]: #method.descend " "
#[derive(Debug)]
pub struct NodeRefMut<'a, K, V, S = DefaultStorage<Node<K, V>>>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(super) tree: &'a mut Trie<K, V, S>,
    pub(super) index: usize,
}
impl<'a, K, V, S> NodeRefMut<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRefMut` pointing to the specified index in the storage, or `None` if it's out of bounds.
    pub fn new_raw(tree: &'a mut Trie<K, V, S>, index: usize) -> Option<Self> {
        if index < tree.storage_len() {
            Some(unsafe {
                // SAFETY: we just did a bounds check
                Self::new_raw_unchecked(tree, index)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRefMut` pointing to the specified index in the storage without doing bounds checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified index is not present in the storage.
    pub unsafe fn new_raw_unchecked(tree: &'a mut Trie<K, V, S>, index: usize) -> Self {
        Self { tree, index }
    }
    /// Returns the raw storage index for the node.
    pub fn raw_index(&self) -> usize {
        self.index
    }
    /// Returns an immutable reference to the same node, borrowing this one.
    pub fn as_ref(&self) -> NodeRef<'_, K, V, S> {
        NodeRef {
            tree: self.tree,
            index: self.index,
        }
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    pub fn parent(&self) -> Option<NodeRef<'_, K, V, S>> {
        self.as_ref().parent()
    }
    /// Returns the key under which the node is filed in its parent, or `None` if it's the root node.
    pub fn key(&self) -> Option<&K> {
        self.node().key.as_ref()
    }
    /// Returns the absolute path from the root of the trie to this node. Empty for the root itself.
    pub fn path(&self) -> Vec<K> {
        self.as_ref().path()
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[allow(clippy::missing_const_for_fn)] // const_option is not stable
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node is a *leaf*, i.e. does not have child nodes; `false` otherwise.
    pub fn is_leaf(&self) -> bool {
        self.node().first_child.is_none()
    }
    /// Returns a reference to the node's own value, or `None` if it is a structural node.
    pub fn value(&self) -> Option<&V> {
        self.node().value.as_ref()
    }
    /// Returns a *mutable* reference to the node's own value, or `None` if it is a structural node.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.node_mut().value.as_mut()
    }
    /// Replaces the node's own value with the specified one, returning the value it held immediately before. Children are unaffected.
    pub fn set_value(&mut self, value: V) -> Option<V> {
        self.node_mut().value.replace(value)
    }

    /// Returns `true` if a node exists at the specified path relative to this one, `false` otherwise; see [`NodeRef::contains_path`].
    ///
    /// [`NodeRef::contains_path`]: struct.NodeRef.html#method.contains_path " "
    pub fn contains_path(&self, path: &[K]) -> bool {
        self.as_ref().contains_path(path)
    }
    /// Resolves `path` relative to this node, returning an immutable reference to the node it leads to; see [`NodeRef::descend`].
    ///
    /// [`NodeRef::descend`]: struct.NodeRef.html#method.descend " "
    pub fn descend(&self, path: &[K]) -> Result<NodeRef<'_, K, V, S>, KeyNotFoundError<K>> {
        self.as_ref().descend(path)
    }
    /// Resolves `path` relative to this node, returning a *mutable* reference to the node it leads to.
    ///
    /// Consumes the reference, handing its whole borrow over to the result; on the first missing key, fails with the unconsumed suffix of `path` and the trie is left unmodified.
    pub fn descend_mut(self, path: &[K]) -> Result<Self, KeyNotFoundError<K>> {
        let Self { tree, index } = self;
        let mut current = index;
        for (consumed, key) in path.iter().enumerate() {
            match tree.find_child(current, key) {
                Some(index) => current = index,
                None => {
                    return Err(KeyNotFoundError {
                        remaining: path[consumed..].to_vec(),
                    })
                }
            }
        }
        Ok(Self {
            tree,
            index: current,
        })
    }
    /// Resolves `path` relative to this node, creating every missing node along the way with no value. Never fails; an empty path returns the node itself, and the existing subtree — children included — is always preserved.
    pub fn descend_or_insert(self, path: &[K]) -> Self {
        self.descend_or_insert_with(path, |_| None)
    }
    /// Resolves `path` relative to this node, creating every missing node along the way. Never fails.
    ///
    /// For each key not yet present, `materializer` is called with the partial path walked so far — up to and including that key, relative to this node — and its return value becomes the created node's initial value. Nodes which already exist are not touched and do not cause a `materializer` call.
    pub fn descend_or_insert_with<F>(self, path: &[K], materializer: F) -> Self
    where
        F: FnMut(&[K]) -> Option<V>,
    {
        let Self { tree, index } = self;
        let index = tree.descend_or_insert_index(index, path, materializer);
        Self { tree, index }
    }
    /// Inserts a value at the specified path relative to this node, creating every missing node along the way, and returns the value the terminal node held immediately before.
    ///
    /// Existing children of the terminal node are preserved. An empty path replaces this node's own value, like [`set_value`].
    ///
    /// [`set_value`]: #method.set_value " "
    pub fn insert(&mut self, path: &[K], value: V) -> Option<V> {
        let index = self
            .tree
            .descend_or_insert_index(self.index, path, |_| None);
        self.tree.node_mut(index).value.replace(value)
    }

    pub(super) fn node(&self) -> &Node<K, V> {
        self.tree.node(self.index)
    }
    pub(super) fn node_mut(&mut self) -> &mut Node<K, V> {
        self.tree.node_mut(self.index)
    }
}
impl<'a, K, V, S> From<NodeRefMut<'a, K, V, S>> for NodeRef<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn from(op: NodeRefMut<'a, K, V, S>) -> Self {
        let NodeRefMut { tree, index } = op;
        Self { tree, index }
    }
}
impl<'a, K, V, S> From<&'a NodeRefMut<'_, K, V, S>> for NodeRef<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn from(op: &'a NodeRefMut<'_, K, V, S>) -> Self {
        Self {
            tree: op.tree,
            index: op.index,
        }
    }
}
