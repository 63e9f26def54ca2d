//! # hashstream
//!
//! Hash-keyed collections and lazy key/value stream pipelines.
//!
//! ## Overview
//!
//! The standard library keys its maps and sets on `std::hash::Hash + Eq`.
//! This crate keys them on a *hash code* computed by a pluggable policy, so
//! that values without a natural equality (or with the wrong one) can still be
//! deduplicated and indexed:
//!
//! - **Hash codes**: [`hash::compute`] derives a canonical, structural code from
//!   any `serde::Serialize` value; [`hash::Hashable`] lets a type supply its own.
//! - **Collections**: [`HashSet`](collection::HashSet) and
//!   [`HashTable`](collection::HashTable) keep insertion order and index their
//!   entries by hash code. [`ArrayCollection`](collection::ArrayCollection) and
//!   [`OrderedCollection`](collection::OrderedCollection) cover the plain keyed
//!   and always-sorted cases.
//! - **Streams**: [`Stream`](stream::Stream) is a single-pass, lazy pipeline of
//!   `(key, value)` entries with map, filter, distinct, sort, concat, flat map
//!   and limit stages.
//! - **Terminals**: accumulators ([`Accumulators`](stream::Accumulators)) and
//!   collectors ([`Joining`](stream::Joining), [`GroupingBy`](stream::GroupingBy),
//!   [`IndexingBy`](stream::IndexingBy)) turn a stream into a result.
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Hashable)]`
//! - `fxhash`: index hash codes with `rustc-hash`'s `FxBuildHasher`
//! - `ahash`: index hash codes with `ahash`'s `RandomState`
//!
//! ## Example
//!
//! ```rust
//! use hashstream::prelude::*;
//!
//! let evens: Vec<i32> = Streams::of(vec![1, 2, 2, 3, 4, 4])
//!     .distinct()
//!     .filter(|value, _| value % 2 == 0)
//!     .to_vec();
//!
//! assert_eq!(evens, vec![2, 4]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Lets `#[derive(Hashable)]` expand to `::hashstream::...` inside this crate too.
extern crate self as hashstream;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use hashstream::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::*;
    pub use crate::error::{CollectionError, Result};
    pub use crate::hash::{HashCode, HashFunction, Hashable};
    pub use crate::stream::*;

    #[cfg(feature = "derive")]
    pub use hashstream_derive::Hashable;
}

pub mod collection;
pub mod error;
pub mod hash;
pub mod stream;

#[cfg(feature = "derive")]
pub use hashstream_derive::Hashable;
