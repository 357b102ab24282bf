use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

type TestTrie = Trie<u8, u32>;

fn validate_trie(trie: &TestTrie) {
    let root = trie.root().raw_index();
    let total = trie.node_count();
    assert!(root < total);
    let root_node = trie.node(root);
    assert!(root_node.key.is_none(), "the root node must not have a key");
    assert!(root_node.parent.is_none(), "the root node must not have a parent");
    assert!(root_node.next_sibling.is_none(), "the root node must not have siblings");

    let mut seen = vec![false; total];
    let mut stack = vec![root];
    let mut reachable = 0_usize;
    while let Some(index) = stack.pop() {
        assert!(
            !seen[index],
            "node {} is linked into the trie more than once",
            index,
        );
        seen[index] = true;
        reachable += 1;

        let node = trie.node(index);
        assert_eq!(
            node.first_child.is_some(),
            node.last_child.is_some(),
            "first_child and last_child must be set together",
        );

        let mut keys = BTreeSet::new();
        let mut current = node.first_child;
        let mut chain_end = None;
        while let Some(child_index) = current {
            let child = trie.node(child_index);
            assert_eq!(
                child.parent,
                Some(index),
                "child {} does not link back to its parent",
                child_index,
            );
            let key = child.key.expect("non-root nodes must have a key");
            assert!(keys.insert(key), "key {} recurs among siblings", key);
            chain_end = Some(child_index);
            stack.push(child_index);
            current = child.next_sibling;
        }
        assert_eq!(
            node.last_child, chain_end,
            "last_child must point at the end of the sibling chain",
        );
    }
    assert_eq!(
        reachable, total,
        "the storage is append-only, so every node must stay linked"
    );
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, u32),
    Get(Vec<u8>),
    Descend(Vec<u8>),
}

fn path_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A tiny alphabet and short paths force heavy prefix sharing, which is where the
    // interesting structural cases live.
    prop::collection::vec(0_u8..4, 0..=4)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let path = path_strategy();
    let op = prop_oneof![
        50 => (path.clone(), any::<u32>()).prop_map(|(p, v)| Op::Insert(p, v)),
        30 => path.clone().prop_map(Op::Get),
        20 => path.prop_map(Op::Descend),
    ];
    prop::collection::vec(op, 0..=200)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut trie = TestTrie::new();
        let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(path, value) => {
                    let old_t = trie.insert(&path, value);
                    let old_m = model.insert(path, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(path) => {
                    let got_t = trie.get(&path).copied();
                    let got_m = model.get(&path).copied();
                    prop_assert_eq!(got_t, got_m);
                    // A path is structurally present exactly when it is a prefix of
                    // something which was inserted; the empty path is the root, which
                    // always exists.
                    let present = path.is_empty() || model.keys().any(|key| key.starts_with(&path));
                    prop_assert_eq!(trie.contains_path(&path), present);
                }
                Op::Descend(path) => match trie.descend(&path) {
                    Ok(node) => prop_assert_eq!(node.path(), path),
                    Err(error) => {
                        let missing = error.remaining.len();
                        prop_assert!(missing >= 1 && missing <= path.len());
                        let consumed = path.len() - missing;
                        prop_assert_eq!(&error.remaining[..], &path[consumed..]);
                        prop_assert!(trie.contains_path(&path[..consumed]));
                        prop_assert!(!trie.contains_path(&path[..=consumed]));
                    }
                },
            }
        }

        validate_trie(&trie);

        // Every stored entry is enumerated exactly once, and parents always come
        // before their children.
        prop_assert_eq!(trie.keys().count(), model.len());
        let got: BTreeMap<Vec<u8>, u32> = trie.keys().zip(trie.values().copied()).collect();
        prop_assert_eq!(got, model);
        let mut visited = BTreeSet::new();
        for node in trie.descendants() {
            if let Some(parent) = node.parent() {
                prop_assert!(visited.contains(&parent.raw_index()));
            }
            prop_assert!(visited.insert(node.raw_index()));
        }
    }

    #[test]
    fn prop_branches_cover_every_edge(ops in ops_strategy()) {
        let mut trie = TestTrie::new();
        for op in ops {
            if let Op::Insert(path, value) = op {
                trie.insert(&path, value);
            }
        }

        // Every node except the root is some node's child, so the number of edge
        // records must be exactly node_count - 1, and each (parent key, child key)
        // pair must correspond to an actual link.
        let branches: Vec<_> = trie.branches().collect();
        prop_assert_eq!(branches.len(), trie.node_count() - 1);
        let mut actual = Vec::new();
        for node in trie.descendants() {
            for child in node.children() {
                actual.push((node.key().copied(), *child.key().expect("non-root nodes must have a key")));
            }
        }
        let flattened: Vec<_> = branches
            .into_iter()
            .map(|branch| (branch.parent, branch.child))
            .collect();
        prop_assert_eq!(flattened, actual);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let paths: Vec<Vec<u8>> = vec![
        vec![0],
        vec![1],
        vec![0, 0],
        vec![0, 1],
        vec![1, 0],
        vec![0, 1, 2],
    ];

    for_each_permutation(&paths, |perm| {
        let mut trie = TestTrie::new();
        let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

        for (i, path) in perm.into_iter().enumerate() {
            let value = i as u32;
            assert_eq!(trie.insert(&path, value), model.insert(path, value));
        }

        validate_trie(&trie);
        let got: BTreeMap<Vec<u8>, u32> = trie.keys().zip(trie.values().copied()).collect();
        assert_eq!(got, model);
    });
}
