use super::*;
use crate::direction::Direction;
use alloc::{vec, vec::Vec};
use proptest::prelude::*;

type Edges = Vec<(i32, [Option<i32>; 2], [Option<i32>; 2])>;

fn sample() -> SearchTree<i32> {
    SearchTree::<_>::from_keys(vec![4, 2, 7, 1, 3, 6, 9]).unwrap()
}

fn keys<'a>(nodes: impl Iterator<Item = NodeRef<'a, i32>>) -> Vec<i32> {
    nodes.map(|x| *x.key()).collect()
}

fn key_of(node: Option<NodeRef<'_, i32>>) -> Option<i32> {
    node.map(|x| *x.key())
}

// Every node with the keys on both ends of each of its slots, sorted by key.
fn edges(tree: &SearchTree<i32>) -> Edges {
    let mut edges: Edges = tree
        .connected()
        .into_iter()
        .map(|raw| {
            let node = tree.node(raw).unwrap();
            (
                *node.key(),
                [key_of(node.left_child()), key_of(node.right_child())],
                [
                    key_of(node.parent_at(Direction::Left)),
                    key_of(node.parent_at(Direction::Right)),
                ],
            )
        })
        .collect();
    edges.sort_unstable();
    edges
}

// Every child slot must be mirrored by the parent slot of the same direction on the other end.
fn assert_slot_symmetry(tree: &SearchTree<i32>) {
    for node in tree.root().by_level() {
        for &direction in &Direction::BOTH {
            if let Some(child) = node.child(direction) {
                assert_eq!(
                    key_of(child.parent_at(direction)),
                    Some(*node.key()),
                    "child {} of {} has no back-reference on the {} side",
                    child.key(),
                    node.key(),
                    direction,
                );
                assert_eq!(child.direction(), Some(direction));
            }
        }
    }
}

fn owned(map: crate::LevelMap<&i32>) -> Vec<Vec<Option<i32>>> {
    map.map(|key| *key).into_inner()
}

#[test]
fn level_map() {
    let tree = sample();
    assert_eq!(
        owned(tree.root().key_map()),
        vec![
            vec![Some(4)],
            vec![Some(2), Some(7)],
            vec![Some(1), Some(3), Some(6), Some(9)],
        ],
    );
}

#[test]
fn sparse_level_map() {
    let tree = SearchTree::<_>::from_keys(vec![5, 3, 8, 4]).unwrap();
    let map = tree.root().key_map();
    assert_eq!(map.depth(), 3);
    assert_eq!(map.node_count(), 4);
    assert_eq!(
        owned(map),
        vec![
            vec![Some(5)],
            vec![Some(3), Some(8)],
            vec![None, Some(4), None, None],
        ],
    );
}

#[test]
fn single_node_level_map() {
    let tree = SearchTree::<_>::new(10);
    assert_eq!(owned(tree.root().key_map()), vec![vec![Some(10)]]);
    assert_eq!(owned(tree.root().key_map_reverse()), vec![vec![Some(10)]]);
}

#[test]
fn reverse_level_map_from_leaf() {
    let tree = sample();
    let leaf = tree.root().find(&1).unwrap();
    assert_eq!(
        owned(leaf.key_map_reverse()),
        vec![
            vec![Some(4), None, None, None],
            vec![Some(2), None],
            vec![Some(1)],
        ],
    );
}

#[test]
fn traversal_orders() {
    let tree = sample();
    let root = tree.root();
    assert_eq!(keys(root.in_order()), [1, 2, 3, 4, 6, 7, 9]);
    assert_eq!(keys(root.by_level()), [4, 2, 7, 1, 3, 6, 9]);
    assert_eq!(keys(root.children_first()), [1, 3, 2, 6, 9, 7, 4]);

    let mut visited = Vec::new();
    root.traverse_by_level(|x| visited.push(*x.key()));
    assert_eq!(visited, [4, 2, 7, 1, 3, 6, 9]);

    let subtree = root.right_child().unwrap();
    assert_eq!(keys(subtree.in_order()), [6, 7, 9]);
}

#[test]
fn duplicates_are_rejected() {
    let mut tree = sample();
    assert!(!tree.insert(3));
    assert!(!tree.root_mut().insert_key(4));
    assert_eq!(tree.len(), 7);

    let error = tree.try_insert(6).err().unwrap();
    assert_eq!(error.rejected, 6);

    let mut root = tree.root_mut();
    let node = root.try_insert_node(Node::new(9)).unwrap_err().into_inner();
    assert!(node.is_detached());
    assert_eq!(tree.len(), 7);
    assert_eq!(keys(tree.root().in_order()), [1, 2, 3, 4, 6, 7, 9]);
}

#[test]
fn insertion_below_inner_node() {
    let mut tree = sample();
    {
        let mut left = tree.root_mut().into_child(Direction::Left).unwrap();
        let new = left.try_insert(0).unwrap();
        assert_eq!(new.parent().map(|x| *x.key()), Some(1));
        assert_eq!(new.direction(), Some(Direction::Left));
    }
    assert_eq!(keys(tree.root().in_order()), [0, 1, 2, 3, 4, 6, 7, 9]);
    assert_slot_symmetry(&tree);
}

#[test]
fn slot_symmetry_after_insertion() {
    let tree = SearchTree::<_>::from_keys(vec![50, 20, 80, 10, 30, 70, 90, 25, 35, 75]).unwrap();
    assert_slot_symmetry(&tree);
    for node in tree.root().by_level().skip(1) {
        assert_eq!(node.node().parents.count(), 1);
    }
}

#[test]
fn mirror() {
    let mut tree = sample();
    let before = edges(&tree);
    tree.flip();
    assert_eq!(keys(tree.root().in_order()), [9, 7, 6, 4, 3, 2, 1]);
    assert_eq!(
        owned(tree.root().key_map()),
        vec![
            vec![Some(4)],
            vec![Some(7), Some(2)],
            vec![Some(9), Some(6), Some(3), Some(1)],
        ],
    );
    assert_slot_symmetry(&tree);

    tree.root_mut().flip_from_here();
    assert_eq!(edges(&tree), before);
}

#[test]
fn mirror_subtree() {
    let mut tree = sample();
    tree.root_mut()
        .child_mut(Direction::Right)
        .unwrap()
        .flip_from_here();
    assert_eq!(keys(tree.root().in_order()), [1, 2, 3, 4, 9, 7, 6]);
    assert_eq!(tree.root().right_child().unwrap().direction(), Some(Direction::Right));
    assert_slot_symmetry(&tree);
}

#[test]
fn upside_down() {
    let mut tree = sample();
    let before = edges(&tree);
    tree.flip_upside_down();

    let root = tree.root();
    assert!(root.is_leaf());
    assert_eq!(key_of(root.parent_at(Direction::Left)), Some(2));
    assert_eq!(key_of(root.parent_at(Direction::Right)), Some(7));

    let former_leaf = tree.locate(&1).unwrap();
    assert!(former_leaf.is_root());
    assert_eq!(key_of(former_leaf.left_child()), Some(2));
    assert!(former_leaf.right_child().is_none());

    let six = tree.locate(&6).unwrap();
    assert_eq!(key_of(six.left_child()), Some(7));
    assert_eq!(keys(six.in_order()), [7, 4, 6]);

    tree.flip_upside_down();
    assert_eq!(edges(&tree), before);
}

#[test]
fn upside_down_reads_back_through_former_root() {
    let mut tree = sample();
    let original = owned(tree.root().key_map());
    tree.flip_upside_down();
    assert_eq!(owned(tree.root().key_map_reverse().reversed()), original);
}

#[test]
fn node_level_inversion_from_root() {
    let mut whole = sample();
    whole.flip_upside_down();
    let mut from_root = sample();
    from_root.root_mut().flip_upside_down();
    assert_eq!(edges(&whole), edges(&from_root));
}

#[test]
fn node_level_inversion_of_subtree() {
    let mut tree = sample();
    tree.root_mut()
        .child_mut(Direction::Left)
        .unwrap()
        .flip_upside_down();

    let two = tree.locate(&2).unwrap();
    // Its own former parent is now on both ends of the edge.
    assert_eq!(key_of(two.left_child()), Some(4));
    assert_eq!(key_of(two.parent_at(Direction::Left)), Some(1));
    assert_eq!(key_of(two.parent_at(Direction::Right)), Some(3));
    assert_eq!(key_of(tree.root().left_child()), Some(2));

    let one = tree.locate(&1).unwrap();
    assert!(one.is_root());
    assert_eq!(key_of(one.left_child()), Some(2));

    // 4 and 2 now hold each other as children, so walks from the root cycle.
    assert_eq!(
        keys(tree.root().by_level().take(12)),
        [4, 2, 7, 4, 6, 9, 2, 7, 4, 6, 9, 2],
    );
    assert_eq!(keys(two.by_level().take(4)), [2, 4, 2, 7]);
}

#[test]
fn locate_mut_and_insert() {
    let mut tree = sample();
    {
        let mut node = tree.locate_mut(&6).unwrap();
        assert!(node.insert_key(5));
        assert!(!node.insert_key(5));
        assert!(!node.is_root());
    }
    assert_eq!(tree.len(), 8);
    assert!(tree.locate(&5).is_some());
    assert!(tree.locate(&8).is_none());
    assert_eq!(key_of(tree.root().find(&5).unwrap().parent()), Some(6));
}

#[test]
fn insertion_only_checks_its_own_subtree() {
    let mut tree = sample();
    // 7 is above 6, so the descent from 6 never meets it.
    assert!(tree.locate_mut(&6).unwrap().insert_key(7));
    assert_eq!(tree.len(), 8);
    assert_eq!(keys(tree.root().in_order()), [1, 2, 3, 4, 6, 7, 7, 9]);
    assert_eq!(key_of(tree.locate(&6).unwrap().right_child()), Some(7));
    // From the root, 7 is on the way.
    assert!(!tree.insert(7));
    assert_eq!(tree.len(), 8);
}

#[test]
fn long_chain() {
    let mut tree = SearchTree::<_>::from_keys(0..2000).unwrap();
    assert_eq!(tree.len(), 2000);
    assert!(tree.root().left_child().is_none());
    assert!(tree.root().in_order().map(|x| *x.key()).eq(0..2000));
    assert_eq!(tree.root().children_first().count(), 2000);

    tree.flip();
    assert!(tree.root().in_order().map(|x| *x.key()).eq((0..2000).rev()));
    tree.flip_upside_down();
    let deepest = tree.locate(&1999).unwrap();
    assert!(deepest.is_root());
    assert_eq!(deepest.in_order().count(), 2000);
}

#[test]
fn vec_storage() {
    let mut tree = VecSearchTree::<i32>::from_keys(vec![4, 2, 7]).unwrap();
    assert!(tree.insert(5));
    assert_eq!(keys_vec(&tree), [2, 4, 5, 7]);
    tree.flip_upside_down();
    tree.flip_upside_down();
    assert_eq!(keys_vec(&tree), [2, 4, 5, 7]);
}

fn keys_vec(tree: &VecSearchTree<i32>) -> Vec<i32> {
    tree.root().in_order().map(|x| *x.key()).collect()
}

#[test]
fn raw_keys() {
    let tree = sample();
    let raw = tree.root().find(&6).unwrap().into_raw_key();
    assert_eq!(tree.node(raw).map(|x| *x.key()), Some(6));
    assert!(tree.node(1_000).is_none());
}

// A right-leaning chain of `len` nodes starting at `at`, keyed by their position in the chain.
fn chain(at: usize, len: usize) -> Vec<Node<i32>> {
    (0..len)
        .map(|i| {
            let mut node = Node::new(i as i32);
            if i > 0 {
                node.parents.set(Direction::Right, Some(at + i - 1));
            }
            if i + 1 < len {
                node.children.set(Direction::Right, Some(at + i + 1));
            }
            node
        })
        .collect()
}

#[test]
fn shift_fixing() {
    use core::num::NonZeroIsize;
    use granite::MoveFix;

    // Two detached nodes were inserted in front of the chain, which still links to the old indices.
    let mut storage = chain(0, 3);
    storage.insert(0, Node::new(-1));
    storage.insert(0, Node::new(-2));
    unsafe {
        <Node<i32> as MoveFix>::fix_shift(&mut storage, 0, NonZeroIsize::new(2).unwrap());
    }
    assert_eq!(storage[2..], chain(2, 3)[..]);
    assert!(storage[0].is_detached() && storage[1].is_detached());

    // And removed again.
    storage.remove(0);
    storage.remove(0);
    unsafe {
        <Node<i32> as MoveFix>::fix_shift(&mut storage, 0, NonZeroIsize::new(-2).unwrap());
    }
    assert_eq!(storage, chain(0, 3));
}

fn sorted_unique(mut keys: Vec<i32>) -> Vec<i32> {
    keys.sort_unstable();
    keys.dedup();
    keys
}

proptest! {
    #[test]
    fn prop_in_order_is_sorted(input in prop::collection::vec(-1000..1000_i32, 1..64)) {
        let tree = SearchTree::<_>::from_keys(input.clone()).unwrap();
        let expected = sorted_unique(input);
        prop_assert_eq!(tree.len(), expected.len());
        prop_assert_eq!(keys(tree.root().in_order()), expected);
    }

    #[test]
    fn prop_duplicate_insertion_is_noop(
        input in prop::collection::vec(-1000..1000_i32, 1..64),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree = SearchTree::<_>::from_keys(input.clone()).unwrap();
        let before = edges(&tree);
        prop_assert!(!tree.insert(*pick.get(&input)));
        prop_assert_eq!(edges(&tree), before);
    }

    #[test]
    fn prop_mirror(input in prop::collection::vec(-1000..1000_i32, 1..64)) {
        let mut tree = SearchTree::<_>::from_keys(input.clone()).unwrap();
        let before = edges(&tree);
        tree.flip();
        let mut descending = sorted_unique(input);
        descending.reverse();
        prop_assert_eq!(keys(tree.root().in_order()), descending);
        tree.flip();
        prop_assert_eq!(edges(&tree), before);
    }

    #[test]
    fn prop_upside_down_twice(input in prop::collection::vec(-1000..1000_i32, 1..64)) {
        let mut tree = SearchTree::<_>::from_keys(input).unwrap();
        let before = edges(&tree);
        tree.flip_upside_down();
        tree.flip_upside_down();
        prop_assert_eq!(edges(&tree), before);
    }

    #[test]
    fn prop_upside_down_former_root(input in prop::collection::vec(-100..100_i32, 1..12)) {
        let mut tree = SearchTree::<_>::from_keys(input).unwrap();
        let original = owned(tree.root().key_map());
        tree.flip_upside_down();
        let leaves: Vec<_> = tree
            .connected()
            .into_iter()
            .filter(|raw| tree.node(raw.clone()).unwrap().is_leaf())
            .collect();
        prop_assert_eq!(leaves, vec![tree.root().into_raw_key()]);
        prop_assert_eq!(owned(tree.root().key_map_reverse().reversed()), original);
    }

    #[test]
    fn prop_level_widths(input in prop::collection::vec(-100..100_i32, 1..12)) {
        let tree = SearchTree::<_>::from_keys(input.clone()).unwrap();
        let map = tree.root().key_map();
        prop_assert_eq!(map.node_count(), sorted_unique(input).len());
        for (depth, level) in map.iter().enumerate() {
            prop_assert_eq!(level.len(), 1 << depth);
            prop_assert!(level.iter().any(Option::is_some));
        }
    }
}
