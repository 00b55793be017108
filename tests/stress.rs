use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use rbindex::Tree;

use pretty_assertions::assert_eq;

const SEED: u64 = 0x5eed;

#[test]
fn shuffled_inserts_and_removals() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut keys: Vec<u32> = (0..10_000).collect();
    keys.shuffle(&mut rng);

    let mut tree = Tree::new();
    for &k in &keys {
        assert_eq!(None, tree.insert(k, k ^ 0xff));
    }
    let stats = tree.validate().unwrap();
    assert_eq!(10_000, stats.len);
    assert!(stats.depth <= 2 * stats.blacks);

    keys.shuffle(&mut rng);
    let (gone, kept) = keys.split_at(5_000);
    for &k in gone {
        assert_eq!(Some(k ^ 0xff), tree.remove(&k));
    }
    tree.validate().unwrap();

    let mut kept = kept.to_vec();
    kept.sort_unstable();
    assert_eq!(kept, tree.keys().copied().collect::<Vec<_>>());
}

#[test]
fn random_operations_against_btreemap() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    for round in 0..20_000 {
        let key: u16 = rng.random_range(0..2_000);
        match rng.random_range(0..4) {
            0 | 1 => assert_eq!(model.insert(key, round), tree.insert(key, round)),
            2 => assert_eq!(model.remove(&key), tree.remove(&key)),
            _ => {
                assert_eq!(model.range(..=key).next_back(), tree.floor(&key));
                assert_eq!(model.range(key..).next(), tree.ceiling(&key));
            }
        }
        if round % 1_000 == 0 {
            tree.validate().unwrap();
        }
    }

    tree.validate().unwrap();
    assert!(tree.iter().eq(model.iter()));
}

#[test]
fn cursor_sweeps_random_removals() {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut tree: Tree<u32, u32> = (0..5_000).map(|k| (k, k)).collect();
    let mut removed = 0;

    let mut cursor = tree.cursor_mut();
    while cursor.move_next() {
        if rng.random_bool(0.3) {
            cursor.remove().unwrap();
            removed += 1;
        }
    }
    // And back again, removing from the other end.
    while cursor.move_prev() {
        if rng.random_bool(0.3) {
            cursor.remove().unwrap();
            removed += 1;
        }
    }

    assert_eq!(5_000 - removed, tree.len());
    tree.validate().unwrap();
    assert!(tree.iter().all(|(k, v)| k == v));
}
