use algoviz::error::HashTableError;
use algoviz::hash_table::{CollisionPolicy, HashKey, HashTable, ProbeDeletion};
use algoviz::trace::Action;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn table(capacity: usize, policy: CollisionPolicy) -> HashTable<i64> {
    HashTable::new(capacity, policy).expect("non-zero capacity")
}

// Helper to check a lookup against an expected value
fn assert_lookup(table: &HashTable<i64>, key: impl Into<HashKey>, expected: Option<i64>) {
    let key = key.into();
    assert_eq!(table.search(&key).copied(), expected, "lookup of {}", key);
}

#[test]
fn integer_and_string_keys_hash_like_the_visualizer() {
    assert_eq!(HashKey::from(23).bucket(10), 3);
    assert_eq!(HashKey::from(-3).bucket(10), 7);
    assert_eq!(HashKey::from("a").bucket(10), 7);
    // ((97 % 10) * 31 + 98) % 10
    assert_eq!(HashKey::from("ab").bucket(10), 5);
    assert_eq!(HashKey::from("").bucket(10), 0);
}

#[test]
fn round_trip_returns_latest_value() {
    for policy in [CollisionPolicy::SeparateChaining, CollisionPolicy::LinearProbing] {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ht = table(64, policy);
        let mut model = HashMap::new();
        for _ in 0..200 {
            let key: i64 = rng.gen_range(0..40);
            if rng.gen_bool(0.7) {
                let value = rng.gen_range(0..1000);
                ht.insert(key, value).expect("room left");
                model.insert(key, value);
            } else {
                assert_eq!(ht.delete(&HashKey::Int(key)), model.remove(&key).is_some());
            }
            assert_eq!(ht.count(), model.len());
        }
        // Chaining never loses keys; probing with clear-on-delete may, so compare only chaining
        if policy == CollisionPolicy::SeparateChaining {
            for (key, value) in &model {
                assert_lookup(&ht, *key, Some(*value));
            }
        }
    }
}

#[test]
fn chaining_counts_extra_entries_per_bucket() {
    let mut ht = table(10, CollisionPolicy::SeparateChaining);
    for key in [1, 11, 21, 2] {
        ht.insert(key, key * 10).expect("chaining never fills");
    }
    assert_eq!(ht.collision_count(), 2);
    assert_eq!(ht.load_factor(), 0.4);
    let buckets = ht.buckets();
    assert_eq!(buckets[1].entries.len(), 3);
    assert!(buckets[1].is_collision);
    assert!(!buckets[2].is_collision);
    assert_lookup(&ht, 21, Some(210));
}

#[test]
fn updating_a_key_does_not_grow_the_table() {
    let mut ht = table(10, CollisionPolicy::SeparateChaining);
    ht.insert("apple", 1).expect("insert");
    ht.insert("apple", 2).expect("update");
    assert_eq!(ht.count(), 1);
    assert_lookup(&ht, "apple", Some(2));
    assert_eq!(ht.last_trace().last().map(|s| s.action), Some(Action::Update));
}

#[test]
fn probing_places_collisions_in_following_slots() {
    let mut ht = table(10, CollisionPolicy::LinearProbing);
    for key in [1, 11, 21] {
        ht.insert(key, key).expect("room left");
    }
    let buckets = ht.buckets();
    assert_eq!(buckets[2].entries[0].key, HashKey::Int(11));
    assert_eq!(buckets[3].entries[0].key, HashKey::Int(21));
    assert_eq!(ht.collision_count(), 2);
    let probes = ht.last_trace().actions().iter().filter(|a| **a == Action::Probe).count();
    assert_eq!(probes, 2);
}

#[test]
fn clearing_a_probed_slot_hides_displaced_keys() {
    let mut ht = table(10, CollisionPolicy::LinearProbing);
    ht.insert(1, 100).expect("insert");
    ht.insert(11, 110).expect("insert");
    assert!(ht.delete(&HashKey::Int(1)));
    assert_lookup(&ht, 11, None);
}

#[test]
fn tombstones_keep_displaced_keys_reachable() {
    let mut ht = table(10, CollisionPolicy::LinearProbing).with_deletion(ProbeDeletion::Tombstone);
    ht.insert(1, 100).expect("insert");
    ht.insert(11, 110).expect("insert");
    assert!(ht.delete(&HashKey::Int(1)));
    assert_lookup(&ht, 11, Some(110));
    assert!(ht.buckets()[1].tombstone);

    // The first tombstone on the path is reused
    ht.insert(21, 210).expect("insert");
    assert_eq!(ht.buckets()[1].entries[0].key, HashKey::Int(21));
}

#[test]
fn full_probing_table_rejects_new_keys() {
    let mut ht = table(2, CollisionPolicy::LinearProbing);
    ht.insert(0, 0).expect("insert");
    ht.insert(1, 1).expect("insert");
    assert_eq!(
        ht.insert(2, 2),
        Err(HashTableError::CapacityExceeded { capacity: 2 })
    );
    assert_eq!(ht.count(), 2);
    // Existing keys can still be updated
    ht.insert(1, 5).expect("update in place");
    assert_lookup(&ht, 1, Some(5));
}

#[test]
fn resize_rehashes_every_entry() {
    let mut ht = table(4, CollisionPolicy::SeparateChaining);
    for key in 0..8 {
        ht.insert(key, key).expect("insert");
    }
    assert_eq!(ht.load_factor(), 2.0);
    ht.resize(16).expect("resize");
    assert_eq!(ht.capacity(), 16);
    assert_eq!(ht.count(), 8);
    assert_eq!(ht.collision_count(), 0);
    for key in 0..8 {
        assert_lookup(&ht, key, Some(key));
    }
}

#[test]
fn invalid_capacities_are_rejected() {
    assert_eq!(
        HashTable::<i64>::new(0, CollisionPolicy::SeparateChaining).err(),
        Some(HashTableError::InvalidCapacity)
    );
    let mut ht = table(4, CollisionPolicy::LinearProbing);
    for key in 0..3 {
        ht.insert(key, key).expect("insert");
    }
    assert_eq!(
        ht.resize(2),
        Err(HashTableError::ShrinkBelowCount { requested: 2, count: 3 })
    );
    assert_eq!(ht.capacity(), 4);
}

#[test]
fn traced_search_ends_with_found_or_not_found() {
    let mut ht = table(10, CollisionPolicy::SeparateChaining);
    ht.insert("pear", 7).expect("insert");
    let hit = ht.search_traced(&HashKey::from("pear"));
    assert_eq!(hit.result, Some(7));
    assert_eq!(hit.trace.last().map(|s| s.action), Some(Action::Found));

    let miss = ht.search_traced(&HashKey::from("plum"));
    assert_eq!(miss.result, None);
    assert_eq!(miss.trace.last().map(|s| s.action), Some(Action::NotFound));
}
