use core::{
    fmt::{self, Formatter, Debug, Display},
    iter::FusedIterator,
};
use alloc::{string::String, vec::Vec, format};
use crate::{
    storage::{Storage, DefaultStorage},
    traversal::{Descendants, Keys, Values, Edges, Branch, Branches, branch_record},
    KeyNotFoundError,
};
use super::{Trie, Node};

/// A reference to a node in a trie, paired with the path which leads to it.
///
/// Since this type does not point to the node directly, but rather the trie the node is in and the index of the node in the storage, it can be used to traverse the trie. The absolute path from the root is recoverable at any time through [`path`], and resolving a further suffix with [`descend`] yields a reference whose path is the concatenation of the two.
///
/// [`path`]: #method.path " "
/// [`descend`]: #method.descend " "
#[derive(Debug)]
pub struct NodeRef<'a, K, V, S = DefaultStorage<Node<K, V>>>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(super) tree: &'a Trie<K, V, S>,
    pub(super) index: usize,
}
impl<'a, K, V, S> NodeRef<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified index in the storage, or `None` if it's out of bounds.
    pub fn new_raw(tree: &'a Trie<K, V, S>, index: usize) -> Option<Self> {
        if index < tree.storage_len() {
            Some(unsafe {
                // SAFETY: we just did a bounds check
                Self::new_raw_unchecked(tree, index)
            })
        } else {
            None
        }
    }
    /// Creates a new `NodeRef` pointing to the specified index in the storage without doing bounds checking.
    ///
    /// # Safety
    /// Causes *immediate* undefined behavior if the specified index is not present in the storage.
    pub unsafe fn new_raw_unchecked(tree: &'a Trie<K, V, S>, index: usize) -> Self {
        Self { tree, index }
    }
    /// Returns the raw storage index for the node.
    ///
    /// Nodes are never removed from the storage, so the index stays valid for as long as the trie exists.
    pub fn raw_index(&self) -> usize {
        self.index
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|index| unsafe {
            // SAFETY: nodes can never have out-of-bounds parents
            Self::new_raw_unchecked(self.tree, index)
        })
    }
    /// Returns the key under which the node is filed in its parent, i.e. the trailing segment of its path, or `None` if it's the root node.
    pub fn key(&self) -> Option<&'a K> {
        self.node().key.as_ref()
    }
    /// Returns a reference to the node's own value, or `None` if it is a structural node.
    ///
    /// Does not look at children: a node with no value of its own reports `None` here no matter how many valued descendants it has.
    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
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
    /// Returns the absolute path from the root of the trie to this node. Empty for the root itself.
    pub fn path(&self) -> Vec<K> {
        let mut segments = Vec::new();
        let mut current = self.index;
        loop {
            let node = self.tree.node(current);
            match (&node.key, node.parent) {
                (Some(key), Some(parent)) => {
                    segments.push(key.clone());
                    current = parent;
                }
                _ => break,
            }
        }
        segments.reverse();
        segments
    }

    /// Returns a reference to the child filed under the specified key, or `None` if there is none.
    pub fn child(&self, key: &K) -> Option<Self> {
        self.tree.find_child(self.index, key).map(|index| unsafe {
            // SAFETY: find_child only returns indices of nodes linked into the trie
            Self::new_raw_unchecked(self.tree, index)
        })
    }
    /// Returns an iterator over references to the children of the node, in insertion order.
    pub fn children(&self) -> Children<'a, K, V, S> {
        Children {
            tree: self.tree,
            next: self.node().first_child,
        }
    }
    /// Returns `true` if a node exists at the specified path relative to this one, `false` otherwise.
    ///
    /// This checks *structural* presence, not value presence: a waypoint node with no value still satisfies `contains_path`. An empty path is always present.
    pub fn contains_path(&self, path: &[K]) -> bool {
        let mut current = self.index;
        for key in path {
            match self.tree.find_child(current, key) {
                Some(index) => current = index,
                None => return false,
            }
        }
        true
    }
    /// Resolves `path` relative to this node, returning a reference to the node it leads to.
    ///
    /// On the first missing key, fails with the unconsumed suffix of `path` — the missing key included — rather than the whole original path, to localize the failure point. An empty path resolves to the node itself. Resolution never modifies the trie.
    pub fn descend(&self, path: &[K]) -> Result<Self, KeyNotFoundError<K>> {
        let mut current = self.index;
        for (consumed, key) in path.iter().enumerate() {
            match self.tree.find_child(current, key) {
                Some(index) => current = index,
                None => {
                    return Err(KeyNotFoundError {
                        remaining: path[consumed..].to_vec(),
                    })
                }
            }
        }
        Ok(unsafe {
            // SAFETY: as in child
            Self::new_raw_unchecked(self.tree, current)
        })
    }

    /// Returns an iterator over references to every node of the subtree rooted at this node, in pre-order: a node is visited before its children, siblings in insertion order. The first element yielded is always `self`.
    ///
    /// The sequence is lazily produced and restartable — each call walks the live trie afresh.
    pub fn descendants(self) -> Descendants<'a, K, V, S> {
        Descendants::new(self.tree, self.index)
    }
    /// Returns an iterator over the absolute paths of the subtree's nodes which carry a value, in pre-order. Structural nodes are skipped.
    pub fn keys(self) -> Keys<'a, K, V, S> {
        Keys::new(self.tree, self.index)
    }
    /// Returns an iterator over references to the subtree's values, in the same order as [`keys`].
    ///
    /// [`keys`]: #method.keys " "
    pub fn values(self) -> Values<'a, K, V, S> {
        Values::new(self.tree, self.index)
    }
    /// Flattens the subtree into a sequence of parent→child relationship records, calling `build` once for every `(key, child)` pair of every node in pre-order.
    ///
    /// `build` receives the key of the node currently being flattened (`None` when that node is the root of the trie), the child's key and the child's optional value.
    pub fn edges<E, F>(&self, build: F) -> Edges<'a, K, V, S, F>
    where
        F: FnMut(Option<&'a K>, &'a K, Option<&'a V>) -> E,
    {
        Edges::new(self.tree, self.index, build)
    }
    /// Flattens the subtree into [`Branch`] records, using the parent node's *key* as the identity token; see the type-level docs of [`Branch`] for the caveat this carries.
    ///
    /// [`Branch`]: ../traversal/struct.Branch.html " "
    pub fn branches(&self) -> Branches<'a, K, V, S> {
        let build: fn(Option<&'a K>, &'a K, Option<&'a V>) -> Branch<K> = branch_record;
        Edges::new(self.tree, self.index, build)
    }

    pub(super) fn node(&self) -> &'a Node<K, V> {
        self.tree.node(self.index)
    }
}
impl<K, V, S> Copy for NodeRef<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Clone for NodeRef<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K, V, S> Display for NodeRef<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq + Display,
    V: Display,
{
    /// Renders a depth-indented dump of the subtree: one line per node showing its trailing path segment followed by `" => "` and the value if one is present. Siblings are prefixed with `├─`, the last sibling with `└─`, and nesting is indented to reflect depth. The root of the trie, which has no path segment, renders as `.`.
    ///
    /// Exact glyphs are a quality-of-life affordance rather than a stable format; prefer asserting on which paths and values appear, and in what nesting, over byte-exact output.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let node = self.node();
        match (&node.key, &node.value) {
            (Some(key), Some(value)) => write!(f, "{} => {}", key, value)?,
            (Some(key), None) => write!(f, "{}", key)?,
            (None, Some(value)) => write!(f, ". => {}", value)?,
            (None, None) => f.write_str(".")?,
        }
        let mut stack = Vec::new();
        push_children_reversed(self.tree, self.index, "", &mut stack);
        while let Some((index, prefix)) = stack.pop() {
            let node = self.tree.node(index);
            let last = node.next_sibling.is_none();
            writeln!(f)?;
            write!(f, "{}{}", prefix, if last { "└─ " } else { "├─ " })?;
            let key = node.key.as_ref().expect("non-root nodes always have a key");
            match &node.value {
                Some(value) => write!(f, "{} => {}", key, value)?,
                None => write!(f, "{}", key)?,
            }
            let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
            push_children_reversed(self.tree, index, &child_prefix, &mut stack);
        }
        Ok(())
    }
}

/// Pushes the children of `parent` onto the rendering stack such that the first child ends up on top.
fn push_children_reversed<K, V, S>(
    tree: &Trie<K, V, S>,
    parent: usize,
    prefix: &str,
    stack: &mut Vec<(usize, String)>,
) where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    let position = stack.len();
    let mut current = tree.node(parent).first_child;
    while let Some(index) = current {
        stack.push((index, String::from(prefix)));
        current = tree.node(index).next_sibling;
    }
    stack[position..].reverse();
}

/// An iterator over references to the children of a trie node.
#[derive(Debug)]
pub struct Children<'a, K, V, S = DefaultStorage<Node<K, V>>>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    pub(super) tree: &'a Trie<K, V, S>,
    pub(super) next: Option<usize>,
}
impl<'a, K, V, S> Iterator for Children<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, K, V, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.tree.node(current).next_sibling;
        Some(unsafe {
            // SAFETY: sibling links only hold indices of nodes linked into the trie
            NodeRef::new_raw_unchecked(self.tree, current)
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}
impl<K, V, S> FusedIterator for Children<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Copy for Children<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
}
impl<K, V, S> Clone for Children<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}
