use core::fmt::Debug;

/// A node of a trie.
///
/// Created by the trie internally and only publicly exposed so that trie storages' generic arguments could be specified.
///
/// A node is addressed from its parent by its *key* — one element of a path — and may or may not carry a value. A node without a value is a *structural* node: it exists solely because it lies on the path to a descendant which does have one. Value presence and child presence are fully independent.
#[derive(Copy, Clone, Debug, Hash)]
pub struct Node<K, V>
where
    K: Clone + Debug + Eq,
{
    /// The key under which the node is filed in its parent. `None` only for the root node.
    pub(crate) key: Option<K>,
    /// The optional data payload. Strictly a two-state option and never a reserved in-domain sentinel, so that any value type is supported without ambiguity.
    pub(crate) value: Option<V>,
    pub(crate) parent: Option<usize>,
    pub(crate) first_child: Option<usize>,
    pub(crate) last_child: Option<usize>,
    pub(crate) next_sibling: Option<usize>,
}

impl<K, V> Node<K, V>
where
    K: Clone + Debug + Eq,
{
    /// Creates a root node.
    ///
    /// The node should not be added into a trie which already has a root node, as there can only be one; the trie upholds this by only calling this from its constructors.
    #[inline(always)]
    pub(crate) fn root(value: Option<V>) -> Self {
        Self {
            key: None,
            value,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
    /// Creates a detached child node. The caller is responsible for linking it into the parent's child chain.
    #[inline(always)]
    pub(crate) fn child(key: K, value: Option<V>, parent: usize) -> Self {
        Self {
            key: Some(key),
            value,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
}
