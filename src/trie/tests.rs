use alloc::{
    collections::BTreeSet,
    string::ToString,
    vec::Vec,
    vec,
};
use super::Trie;

/// Builds the reference trie used throughout the tests:
///
/// ```text
/// .
/// └─ a => a
///    ├─ b => c
///    │  └─ d => y
///    └─ c
///       └─ d => z
/// ```
///
/// Note that `["a", "c"]` is a structural node and that the key `"d"` recurs under two different parents.
fn sample() -> Trie<&'static str, &'static str> {
    let mut trie = Trie::<_, _>::new();
    assert_eq!(trie.insert(&["a"], "a"), None);
    assert_eq!(trie.insert(&["a", "b"], "c"), None);
    assert_eq!(trie.insert(&["a", "c", "d"], "z"), None);
    assert_eq!(trie.insert(&["a", "b", "d"], "y"), None);
    trie
}

#[test]
fn lookup_finds_inserted_values() {
    let trie = sample();
    assert_eq!(trie.get(&["a"]), Some(&"a"));
    assert_eq!(trie.get(&["a", "b"]), Some(&"c"));
    assert_eq!(trie.get(&["a", "c", "d"]), Some(&"z"));
    assert_eq!(trie.get(&["a", "b", "d"]), Some(&"y"));
    // Absent path and structural node are both a value-less `None`:
    assert_eq!(trie.get(&["x"]), None);
    assert_eq!(trie.get(&["a", "c"]), None);
}

#[test]
fn descend_reports_the_unconsumed_suffix() {
    let trie = sample();
    let error = trie.descend(&["a", "d", "b"]).unwrap_err();
    assert_eq!(error.remaining, ["d", "b"]);
    let error = trie.descend(&["x"]).unwrap_err();
    assert_eq!(error.remaining, ["x"]);
    // A failed resolution does not create anything:
    assert_eq!(trie.node_count(), 6);
}

#[test]
fn contains_path_sees_structural_nodes() {
    let trie = sample();
    assert!(trie.contains_path(&["a", "c"]));
    assert_eq!(trie.get(&["a", "c"]), None);
    assert!(trie.contains_path(&[]));
    assert!(!trie.contains_path(&["a", "c", "x"]));
}

#[test]
fn empty_path_is_present_even_in_an_empty_trie() {
    // The root node always exists, so the empty path is structurally present
    // before anything has been inserted, while still carrying no value.
    let trie = Trie::<&str, u32>::new();
    assert!(trie.contains_path(&[]));
    assert_eq!(trie.get(&[]), None);
    assert!(trie.descend(&[]).is_ok());
}

#[test]
fn insert_returns_the_previous_value() {
    let mut trie = sample();
    assert_eq!(trie.insert(&["a", "b"], "C"), Some("c"));
    assert_eq!(trie.insert(&["a", "b"], "c"), Some("C"));
    // Overwriting did not clone nodes or disturb the subtree:
    assert_eq!(trie.node_count(), 6);
    assert_eq!(trie.get(&["a", "b", "d"]), Some(&"y"));
}

#[test]
fn insert_preserves_existing_children() {
    let mut trie = sample();
    assert_eq!(trie.insert(&["a", "b", "z"], "q"), None);
    assert_eq!(trie.get(&["a", "b", "z"]), Some(&"q"));
    assert_eq!(trie.get(&["a", "b", "d"]), Some(&"y"));
    assert_eq!(trie.get(&["a", "b"]), Some(&"c"));
}

#[test]
fn empty_path_addresses_the_root() {
    let mut trie = Trie::<&str, u32>::new();
    assert_eq!(trie.get(&[]), None);
    assert_eq!(trie.insert(&[], 7), None);
    assert_eq!(trie.get(&[]), Some(&7));
    assert_eq!(trie.insert(&[], 8), Some(7));
    let root = trie.descend(&[]).unwrap();
    assert!(root.is_root());
    assert_eq!(root.path(), Vec::<&str>::new());
}

#[test]
fn enumeration_covers_every_entry_exactly_once() {
    let trie = sample();
    let keys = trie.keys().collect::<Vec<_>>();
    let expected = [
        vec!["a"],
        vec!["a", "b"],
        vec!["a", "b", "d"],
        vec!["a", "c", "d"],
    ];
    assert_eq!(keys, expected);
    // Values run in lockstep with keys:
    let values = trie.values().copied().collect::<Vec<_>>();
    assert_eq!(values, ["a", "c", "y", "z"]);
    // The full walk also sees the root and the structural node:
    assert_eq!(trie.descendants().count(), 6);
}

#[test]
fn relative_views_compose() {
    let trie = sample();
    let a = trie.descend(&["a"]).unwrap();
    let d = a.descend(&["b", "d"]).unwrap();
    assert_eq!(d.path(), ["a", "b", "d"]);
    assert_eq!(d.value(), Some(&"y"));
    // Enumerating from an interior node yields absolute paths:
    let b = a.descend(&["b"]).unwrap();
    let keys = b.keys().collect::<Vec<_>>();
    assert_eq!(keys, [vec!["a", "b"], vec!["a", "b", "d"]]);
}

#[test]
fn materializer_runs_only_for_created_nodes() {
    let mut trie = sample();
    let mut calls = Vec::new();
    let terminal = trie.descend_or_insert_with(&["a", "b", "x", "y"], |partial| {
        calls.push(partial.to_vec());
        Some("made")
    });
    assert_eq!(terminal.value(), Some(&"made"));
    // "a" and "b" already existed and were not touched:
    assert_eq!(calls, [vec!["a", "b", "x"], vec!["a", "b", "x", "y"]]);
    assert_eq!(trie.get(&["a", "b"]), Some(&"c"));
    assert_eq!(trie.get(&["a", "b", "x"]), Some(&"made"));
}

#[test]
fn descend_or_insert_creates_structural_nodes() {
    let mut trie = Trie::<&str, u32>::new();
    let node = trie.descend_or_insert(&["p", "q"]);
    assert_eq!(node.value(), None);
    assert_eq!(node.path(), ["p", "q"]);
    assert!(trie.contains_path(&["p"]));
    assert_eq!(trie.get(&["p"]), None);
    // Resolving the same path again is a no-op:
    assert_eq!(trie.node_count(), 3);
    trie.descend_or_insert(&["p", "q"]);
    assert_eq!(trie.node_count(), 3);
}

#[test]
fn value_mutation_leaves_structure_alone() {
    let mut trie = sample();
    let mut node = trie.root_mut().descend_mut(&["a", "b"]).unwrap();
    assert_eq!(node.set_value("B"), Some("c"));
    if let Some(value) = node.value_mut() {
        *value = "BB";
    }
    assert!(!node.is_leaf());
    assert_eq!(trie.get(&["a", "b"]), Some(&"BB"));
    assert_eq!(trie.get(&["a", "b", "d"]), Some(&"y"));
}

#[test]
fn branches_flatten_the_whole_trie() {
    let trie = sample();
    let pairs = trie
        .branches()
        .map(|branch| (branch.parent, branch.child))
        .collect::<BTreeSet<_>>();
    let expected = [
        (None, "a"),
        (Some("a"), "b"),
        (Some("a"), "c"),
        (Some("b"), "d"),
        (Some("c"), "d"),
    ]
    .iter()
    .cloned()
    .collect::<BTreeSet<_>>();
    assert_eq!(pairs, expected);
}

#[test]
fn edges_expose_child_values_to_the_builder() {
    let trie = sample();
    let valued = trie
        .edges(|_, _, value| value.is_some())
        .filter(|has_value| *has_value)
        .count();
    assert_eq!(valued, 4);
}

#[test]
fn display_renders_a_depth_indented_dump() {
    let trie = sample();
    let rendered = trie.to_string();
    let expected = "\
.
└─ a => a
   ├─ b => c
   │  └─ d => y
   └─ c
      └─ d => z";
    assert_eq!(rendered, expected);
}

#[test]
fn display_shows_the_root_value() {
    let mut trie = Trie::<&str, &str>::new();
    trie.insert(&[], "r");
    assert_eq!(trie.to_string(), ". => r");
}

#[test]
fn from_iterator_applies_entries_in_order() {
    let entries = [
        (vec!["a"], 1),
        (vec!["a", "b"], 2),
        (vec!["a"], 3),
    ];
    let trie = entries.iter().cloned().collect::<Trie<_, _>>();
    // The later duplicate overwrote the earlier entry's value:
    assert_eq!(trie.get(&["a"]), Some(&3));
    assert_eq!(trie.get(&["a", "b"]), Some(&2));
    assert_eq!(trie.keys().count(), 2);
}

#[test]
fn clone_is_a_snapshot() {
    let mut trie = sample();
    let snapshot = trie.clone();
    trie.insert(&["a", "b"], "changed");
    trie.insert(&["new"], "entry");
    assert_eq!(snapshot.get(&["a", "b"]), Some(&"c"));
    assert!(!snapshot.contains_path(&["new"]));
    assert_eq!(snapshot.node_count(), 6);
}

#[test]
fn children_iterate_in_insertion_order() {
    let trie = sample();
    let a = trie.descend(&["a"]).unwrap();
    let children = a
        .children()
        .map(|child| *child.key().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(children, ["b", "c"]);
    assert!(a.child(&"b").is_some());
    assert!(a.child(&"x").is_none());
}
