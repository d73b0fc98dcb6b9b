//! Property-based tests for the hopscotch table.
//!
//! Random operation sequences are mirrored against `std::collections::HashSet`
//! and the structural sanity sweep runs after every batch, so any divergence
//! between the hop bitmap bookkeeping and the actual occupancy shows up fast.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::HopTable;

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u64),
        Remove(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        // A narrow key space maximises collisions, duplicate inserts and
        // removals of present keys.
        prop_oneof![
            (0u64..500).prop_map(Op::Insert),
            (0u64..500).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn mirrors_std_hash_set(ops in proptest::collection::vec(op(), 1..400)) {
            let mut table = HopTable::<u64>::new();
            let mut model = HashSet::new();
            for op in ops {
                match op {
                    Op::Insert(k) => {
                        prop_assert_eq!(table.insert(k).unwrap(), model.insert(k));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(table.remove(&k), model.take(&k));
                    }
                }
                prop_assert_eq!(table.len(), model.len());
            }
            prop_assert!(table.sanity_check());
            for k in 0..500u64 {
                prop_assert_eq!(table.contains(&k), model.contains(&k));
            }
            let mut keys: Vec<u64> = table.iter().copied().collect();
            keys.sort_unstable();
            let mut expected: Vec<u64> = model.into_iter().collect();
            expected.sort_unstable();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn growth_preserves_everything(keys in proptest::collection::hash_set(any::<u64>(), 0..2000)) {
            let mut table = HopTable::<u64>::new();
            for &k in &keys {
                prop_assert!(table.insert(k).unwrap());
            }
            prop_assert_eq!(table.len(), keys.len());
            prop_assert!(table.sanity_check());
            for &k in &keys {
                prop_assert_eq!(table.find(&k), Some(&k));
            }
        }

        #[test]
        fn clone_matches_original(keys in proptest::collection::hash_set(0u64..10_000, 0..300)) {
            let mut table = HopTable::<u64>::new();
            for &k in &keys {
                table.insert(k).unwrap();
            }
            let copy = table.clone();
            prop_assert!(copy.sanity_check());
            prop_assert_eq!(copy.len(), table.len());
            for &k in &keys {
                prop_assert!(copy.contains(&k));
            }
        }
    }
}
