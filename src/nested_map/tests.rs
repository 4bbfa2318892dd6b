use super::*;

fn sample() -> NestedMap<&'static str, i32> {
    let mut map = NestedMap::new();
    map["1"]["2"]["3"] = NodeValue::Leaf(3);
    map["A"]["B"] = NodeValue::Leaf(15);
    map
}

#[test]
fn unlimited_vivification() {
    let mut map = NestedMap::<&str, i32>::new();
    assert!(map.is_empty());
    assert!(map.vivify("a").expect("unlimited map").is_branch());
    assert_eq!(map.len(), 1);
    map.vivify_path(["a", "b", "c", "d"]).expect("unlimited map");
    assert!(map.get_path(["a", "b", "c", "d"]).is_some_and(NodeValue::is_branch));
    // Looking up an existing key does not replace it
    map.insert("a", 1);
    assert_eq!(map.vivify("a").map(|x| x.leaf().copied()), Ok(Some(1)));
}

#[test]
fn get_never_creates() {
    let mut map = sample();
    assert!(map.get("missing").is_none());
    assert!(!map.contains_key("missing"));
    assert!(map.get_path(["1", "missing"]).is_none());
    assert!(map.get_path_mut(["1", "2", "3", "4"]).is_none());
    assert!(map.get_path(Vec::<&str>::new()).is_none());
    assert_eq!(map, sample());
}

#[test]
fn get_path_mut_edits_in_place() {
    let mut map = sample();
    *map
        .get_path_mut(["A", "B"])
        .and_then(NodeValue::leaf_mut)
        .expect("existing leaf") += 1;
    assert_eq!(map["A"]["B"], NodeValue::Leaf(16));
}

#[test]
fn fixed_levels_stop_vivifying() {
    let mut map = NestedMap::<&str, &str>::with_levels(3).expect("positive level count");
    // The first two levels create branches
    assert!(map.vivify_path(["1", "2"]).expect("within depth").is_branch());
    // The last one does not create anything
    assert_eq!(map.vivify_path(["1", "2", "3"]).unwrap_err(), VivifyError::NoDefault);
    // but assignment still works
    map.insert_path(["1", "2", "3"], "a").expect("assignment at the last level");
    assert_eq!(map.vivify_leaf(["1", "2", "3"]), Ok(&mut "a"));
    assert_eq!(map["1"]["2"].branch().map(NestedMap::factory).map(|x| x.vivifies()), Some(false));
}

#[test]
fn single_level_has_no_default() {
    let mut map = NestedMap::<&str, i32>::with_levels(1).expect("positive level count");
    assert_eq!(map.vivify("a").unwrap_err(), VivifyError::NoDefault);
    assert!(map.is_empty());
    map.insert("a", 1);
    assert_eq!(map["a"], NodeValue::Leaf(1));
}

#[test]
fn inserted_branches_extend_the_depth() {
    let mut map = NestedMap::<&str, &str>::with_levels(2).expect("positive level count");
    map.insert_path(["1", "2"], NodeValue::Branch(NestedMap::new()))
        .expect("assignment at the last level");
    map.insert_path(["1", "2", "3", "4"], "deep")
        .expect("inserted branch is unlimited");
    assert_eq!(
        map.get_path(["1", "2", "3", "4"]).and_then(NodeValue::leaf),
        Some(&"deep"),
    );
}

#[test]
fn leaf_levels() {
    let mut map = NestedMap::<&str, Vec<i32>>::with_leaf(2, Vec::new).expect("positive level count");
    map.vivify_leaf(["a", "b"]).expect("within depth").push(1);
    assert!(map.vivify("a").expect("within depth").is_branch());
    assert!(map.vivify_path(["a", "c"]).expect("within depth").is_leaf());
    assert_eq!(map.vivify_path(["a", "b", "c"]).unwrap_err(), VivifyError::LeafNode);
    assert_eq!(map.vivify_leaf(["a"]).unwrap_err(), VivifyError::BranchNode);
    assert_eq!(
        map.flatten().collect::<Vec<_>>(),
        [(vec![&"a", &"b"], &vec![1]), (vec![&"a", &"c"], &Vec::new())],
    );
}

#[test]
fn zero_levels_are_rejected() {
    assert_eq!(
        NestedMap::<&str, i32>::with_levels(0).unwrap_err(),
        ConfigurationError::ZeroLevels,
    );
    assert_eq!(
        NestedMap::<&str, i32>::with_leaf(0, i32::default).unwrap_err(),
        ConfigurationError::ZeroLevels,
    );
}

#[test]
fn empty_paths() {
    let mut map = sample();
    assert_eq!(map.vivify_path(Vec::<&str>::new()).unwrap_err(), VivifyError::EmptyPath);
    assert_eq!(map.vivify_leaf(Vec::<&str>::new()).unwrap_err(), VivifyError::EmptyPath);
    assert_eq!(map.insert_path(Vec::<&str>::new(), 0).unwrap_err(), VivifyError::EmptyPath);
    assert_eq!(map.vivify_branch(Vec::<&str>::new()).map(|x| x.len()), Ok(2));
}

#[test]
fn failed_paths_leave_map_untouched() {
    let mut map = NestedMap::<&str, i32>::with_levels(2).expect("positive level count");
    map.insert_path(["x", "leaf"], 1).expect("within depth");
    let before = map.clone();

    assert_eq!(map.vivify_path(["new", "missing"]).unwrap_err(), VivifyError::NoDefault);
    assert_eq!(map.vivify_path(["x", "leaf", "deeper"]).unwrap_err(), VivifyError::LeafNode);
    assert_eq!(
        map.insert_path(["new", "other", "deeper"], 2).unwrap_err(),
        VivifyError::NoDefault,
    );
    assert_eq!(map.vivify_branch(["x", "leaf"]).unwrap_err(), VivifyError::LeafNode);
    assert_eq!(map, before);
    assert!(!map.contains_key("new"));
}

#[test]
fn insert_path_over_leaf_fails() {
    let mut map = sample();
    assert_eq!(map.insert_path(["A", "B", "C"], 0).unwrap_err(), VivifyError::LeafNode);
    assert_eq!(map["A"]["B"], NodeValue::Leaf(15));
    // Replacing the leaf itself is fine
    assert_eq!(map.insert_path(["A", "B"], 16), Ok(Some(NodeValue::Leaf(15))));
}

#[test]
fn node_vivify() {
    let mut map = sample();
    let node = map.vivify("A").expect("existing key");
    assert!(node.vivify("new").expect("unlimited branch").is_branch());
    let leaf = node.vivify("B").expect("existing key");
    assert_eq!(leaf.vivify("C").unwrap_err(), VivifyError::LeafNode);
}

#[test]
fn remove_keeps_order() {
    let mut map = NestedMap::<&str, i32>::new();
    for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
        map.insert(key, value);
    }
    assert_eq!(map.remove("b"), Some(NodeValue::Leaf(2)));
    assert_eq!(map.remove("b"), None);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn index_existing() {
    let map = sample();
    assert_eq!(map["A"]["B"], NodeValue::Leaf(15));
}

#[test]
#[should_panic(expected = "key not found in nested map")]
fn index_missing_panics() {
    let map = sample();
    let _ = &map["missing"];
}

#[test]
#[should_panic(expected = "cannot index into a leaf node")]
fn index_through_leaf_panics() {
    let mut map = sample();
    map["A"]["B"]["C"] = NodeValue::Leaf(0);
}

#[test]
#[should_panic(expected = "key not found on a level which does not create missing keys")]
fn index_mut_without_default_panics() {
    let mut map = NestedMap::<&str, i32>::with_levels(1).expect("positive level count");
    map["a"] = NodeValue::Leaf(0);
}

#[test]
fn flatten_order_is_depth_first() {
    let mut map = NestedMap::<&str, i32>::new();
    map["a"]["x"] = NodeValue::Leaf(1);
    map["b"] = NodeValue::Leaf(2);
    map["a"]["y"]["z"] = NodeValue::Leaf(3);
    map["c"]["empty"] = NodeValue::Branch(NestedMap::new());
    assert_eq!(
        map.flatten().collect::<Vec<_>>(),
        [
            (vec![&"a", &"x"], &1),
            (vec![&"a", &"y", &"z"], &3),
            (vec![&"b"], &2),
        ],
    );
    assert_eq!(map.flatten_values().copied().collect::<Vec<_>>(), [1, 3, 2]);
    assert_eq!(map.flatten_keys().count(), 3);
}

#[test]
fn flatten_empty() {
    let map = NestedMap::<&str, i32>::new();
    assert_eq!(map.flatten().next(), None);
    let mut iter = map.flatten_values();
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn flatten_mut_updates_leaves() {
    let mut map = sample();
    for (path, value) in map.flatten_mut() {
        *value += path.len() as i32;
    }
    assert_eq!(map.flatten_values().copied().collect::<Vec<_>>(), [6, 17]);
}

#[test]
fn flatten_round_trip() {
    let map = sample();
    let flat: Vec<_> = map.clone().into_flatten().collect();
    assert_eq!(flat, [(vec!["1", "2", "3"], 3), (vec!["A", "B"], 15)]);
    assert_eq!(NestedMap::from_flat(flat), Ok(map));
}

#[test]
fn from_flat_conflicts() {
    let pairs = vec![(vec!["a"], 1), (vec!["a", "b"], 2)];
    assert_eq!(NestedMap::<&str, i32>::from_flat(pairs).unwrap_err(), VivifyError::LeafNode);
    let later_wins = vec![(vec!["a", "b"], 1), (vec!["a"], 2)];
    let map = NestedMap::<&str, i32>::from_flat(later_wins).expect("leaf replaces branch");
    assert_eq!(map["a"], NodeValue::Leaf(2));
}

#[test]
fn iteration_is_shallow() {
    let map = sample();
    let kinds: Vec<_> = map.iter().map(|(key, node)| (*key, node.is_branch())).collect();
    assert_eq!(kinds, [("1", true), ("A", true)]);
    assert_eq!((&map).into_iter().count(), 2);
    assert_eq!(map.values().filter(|x| x.is_leaf()).count(), 0);
    assert_eq!(map.into_iter().map(|(key, _)| key).collect::<Vec<_>>(), ["1", "A"]);
}

#[test]
fn clone_is_deep_and_keeps_factories() {
    let original = NestedMap::<&str, Vec<i32>>::with_leaf(2, Vec::new).expect("positive level count");
    let mut copy = original.clone();
    copy.vivify_leaf(["a", "b"]).expect("within depth").push(1);
    assert!(original.is_empty());
    assert!(matches!(copy.factory(), DefaultFactory::Levels { .. }));
}

#[test]
fn debug_shows_contents() {
    let mut map = NestedMap::<&str, i32>::new();
    map["a"]["b"] = NodeValue::Leaf(1);
    assert_eq!(format!("{:?}", map), r#"{"a": Branch({"b": Leaf(1)})}"#);
}

#[test]
fn insert_branch_replaces_leaf() {
    let mut map = NestedMap::<&str, i32>::with_levels(1).expect("positive level count");
    map.insert("a", 1);
    assert_eq!(map.insert_branch("a"), Some(NodeValue::Leaf(1)));
    map.vivify_path(["a", "b", "c"]).expect("inserted branch is unlimited");
    assert!(map.get_path(["a", "b", "c"]).is_some_and(NodeValue::is_branch));
}
