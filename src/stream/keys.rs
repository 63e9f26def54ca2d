//! Key policies for stages that merge or reorder entries.
//!
//! Sorting, concatenation and flat mapping produce entries whose original
//! keys may no longer be meaningful. These stages take a [`KeyPolicy`] that
//! decides, at the type level, which key each emitted entry carries:
//!
//! - [`PreserveKeys`]: the entry keeps the key it had upstream
//! - [`Reindex`]: the entry is keyed by its output position, starting at 0

/// Assigns the output key of an entry.
pub trait KeyPolicy<K> {
    /// Key type of the emitted entries.
    type Key;

    /// Returns the key of the entry emitted at `position` whose upstream key
    /// is `key`.
    fn assign(&self, key: K, position: usize) -> Self::Key;
}

/// Emitted entries keep their upstream key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PreserveKeys;

/// Emitted entries are keyed `0, 1, 2, ...` by output position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reindex;

impl<K> KeyPolicy<K> for PreserveKeys {
    type Key = K;

    #[inline]
    fn assign(&self, key: K, _position: usize) -> K {
        key
    }
}

impl<K> KeyPolicy<K> for Reindex {
    type Key = usize;

    #[inline]
    fn assign(&self, _key: K, position: usize) -> usize {
        position
    }
}
