//! Forwarding implementations for types that wrap a collection.
//!
//! A domain type that owns a [`Collection`](super::Collection) or a
//! [`Table`](super::Table) in one of its fields can expose the same interface
//! without writing the forwarding methods by hand:
//!
//! - [`delegate_collection!`](crate::delegate_collection) implements
//!   `Collection<T>` by forwarding every method to the field
//! - [`delegate_table!`](crate::delegate_table) implements `Table<K, V>` the
//!   same way
//!
//! Forwarded methods keep the wrapped collection's behavior, including its
//! errors: a wrapper around a [`HashTable`](super::HashTable) still rejects
//! keyless insertion.

/// Implements [`Collection`](crate::collection::Collection) for a wrapper type
/// by forwarding to one of its fields.
///
/// # Syntax
///
/// ```text
/// delegate_collection!(Wrapper, field, Element);
/// delegate_collection!(impl<T: Bound> Wrapper<T>, field, T);
/// ```
///
/// `field` is a field name, or an index for tuple structs.
///
/// # Example
///
/// ```
/// use hashstream::collection::{Collection, HashSet};
/// use hashstream::delegate_collection;
///
/// struct Tags {
///     inner: HashSet<String>,
/// }
///
/// delegate_collection!(Tags, inner, String);
///
/// let mut tags = Tags { inner: HashSet::new() };
/// assert_eq!(tags.add("rust".to_string()), Ok(true));
/// assert_eq!(tags.add("rust".to_string()), Ok(false));
/// assert_eq!(tags.len(), 1);
/// ```
#[macro_export]
macro_rules! delegate_collection {
    (impl < $($generic:ident $(: $bound:path)?),* > $wrapper:ty, $field:tt, $element:ty) => {
        impl<$($generic $(: $bound)?),*> $crate::collection::Collection<$element> for $wrapper {
            fn add(&mut self, element: $element) -> $crate::error::Result<bool> {
                $crate::collection::Collection::add(&mut self.$field, element)
            }

            fn add_all<I>(&mut self, elements: I) -> $crate::error::Result<bool>
            where
                I: IntoIterator<Item = $element>,
                Self: Sized,
            {
                $crate::collection::Collection::add_all(&mut self.$field, elements)
            }

            fn replace<I>(&mut self, elements: I) -> $crate::error::Result<bool>
            where
                I: IntoIterator<Item = $element>,
                Self: Sized,
            {
                $crate::collection::Collection::replace(&mut self.$field, elements)
            }

            fn contains(&self, element: &$element) -> bool {
                $crate::collection::Collection::contains(&self.$field, element)
            }

            fn remove(&mut self, element: &$element) -> bool {
                $crate::collection::Collection::remove(&mut self.$field, element)
            }

            fn clear(&mut self) {
                $crate::collection::Collection::<$element>::clear(&mut self.$field);
            }

            fn len(&self) -> usize {
                $crate::collection::Collection::<$element>::len(&self.$field)
            }

            fn is_empty(&self) -> bool {
                $crate::collection::Collection::<$element>::is_empty(&self.$field)
            }
        }
    };
    ($wrapper:ty, $field:tt, $element:ty) => {
        $crate::delegate_collection!(impl<> $wrapper, $field, $element);
    };
}

/// Implements [`Table`](crate::collection::Table) for a wrapper type by
/// forwarding to one of its fields.
///
/// Combine with [`delegate_collection!`](crate::delegate_collection) to
/// forward the value-level operations as well.
///
/// # Syntax
///
/// ```text
/// delegate_table!(Wrapper, field, Key, Value);
/// delegate_table!(impl<V: Bound> Wrapper<V>, field, Key, V);
/// ```
///
/// # Example
///
/// ```
/// use hashstream::collection::{HashTable, Table};
/// use hashstream::delegate_table;
///
/// struct Prices(HashTable<(String, u32), f64>);
///
/// delegate_table!(Prices, 0, (String, u32), f64);
///
/// let mut prices = Prices(HashTable::new());
/// prices.set(("tea".to_string(), 2024), 3.5);
///
/// assert_eq!(prices.get(&("tea".to_string(), 2024)), Ok(&3.5));
/// assert!(!prices.has_key(&("tea".to_string(), 2023)));
/// ```
#[macro_export]
macro_rules! delegate_table {
    (impl < $($generic:ident $(: $bound:path)?),* > $wrapper:ty, $field:tt, $key:ty, $value:ty) => {
        impl<$($generic $(: $bound)?),*> $crate::collection::Table<$key, $value> for $wrapper {
            fn set(&mut self, key: $key, value: $value) {
                $crate::collection::Table::set(&mut self.$field, key, value);
            }

            fn get(&self, key: &$key) -> $crate::error::Result<&$value> {
                $crate::collection::Table::get(&self.$field, key)
            }

            fn get_mut(&mut self, key: &$key) -> $crate::error::Result<&mut $value> {
                $crate::collection::Table::get_mut(&mut self.$field, key)
            }

            fn get_or_insert_with<F>(&mut self, key: $key, default: F) -> &mut $value
            where
                F: FnOnce() -> $value,
            {
                $crate::collection::Table::get_or_insert_with(&mut self.$field, key, default)
            }

            fn has_key(&self, key: &$key) -> bool {
                $crate::collection::Table::<$key, $value>::has_key(&self.$field, key)
            }

            fn unset(&mut self, key: &$key) -> bool {
                $crate::collection::Table::<$key, $value>::unset(&mut self.$field, key)
            }
        }
    };
    ($wrapper:ty, $field:tt, $key:ty, $value:ty) => {
        $crate::delegate_table!(impl<> $wrapper, $field, $key, $value);
    };
}

#[cfg(test)]
mod tests {
    use crate::collection::{ArrayCollection, Collection, HashSet, HashTable, Table};
    use crate::error::CollectionError;
    use rstest::rstest;

    struct Bag<T> {
        items: HashSet<T>,
    }

    crate::delegate_collection!(impl<T> Bag<T>, items, T);

    struct Slots(ArrayCollection<usize, char>);

    crate::delegate_collection!(Slots, 0, char);
    crate::delegate_table!(Slots, 0, usize, char);

    struct Ledger(HashTable<&'static str, i64>);

    crate::delegate_collection!(Ledger, 0, i64);
    crate::delegate_table!(Ledger, 0, &'static str, i64);

    #[rstest]
    fn test_generic_wrapper_forwards_collection() {
        let mut bag = Bag {
            items: HashSet::new(),
        };

        assert_eq!(bag.add_all(vec![1, 2, 2]), Ok(false));
        assert!(bag.contains(&2));
        assert!(bag.remove(&1));
        assert_eq!(bag.len(), 1);

        bag.clear();
        assert!(bag.is_empty());
        assert!(bag.items.is_empty());
    }

    #[rstest]
    fn test_tuple_wrapper_forwards_table_and_collection() {
        let mut slots = Slots(ArrayCollection::new());

        assert_eq!(slots.add('a'), Ok(true));
        slots.set(5, 'f');
        assert_eq!(slots.add('g'), Ok(true));

        assert_eq!(Table::get(&slots, &6), Ok(&'g'));
        assert!(Table::unset(&mut slots, &0));
        assert_eq!(Collection::len(&slots), 2);
    }

    #[rstest]
    fn test_wrapped_table_keeps_its_errors() {
        let mut ledger = Ledger(HashTable::new());

        assert_eq!(
            ledger.add(10),
            Err(CollectionError::unsupported("HashTable", "add"))
        );

        *Table::get_or_insert_with(&mut ledger, "cash", || 0) += 10;
        assert_eq!(Table::get(&ledger, &"cash"), Ok(&10));
        assert!(Collection::contains(&ledger, &10));
    }
}
