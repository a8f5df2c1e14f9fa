//! Hash containers used by the registry and the descriptor cells.

use core::any::TypeId;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Hash state with results that only depend on the input.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

pub(crate) type TypeIdMap<V> = HashMap<TypeId, V>;

#[inline]
pub(crate) const fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedHashState)
}

#[inline]
pub(crate) const fn new_set<T>() -> HashSet<T> {
    hashbrown::HashSet::with_hasher(FixedHashState)
}
