//! Derive macro for hashstream's `Hashable` trait.
//!
//! # Available Derive Macros
//!
//! - [`Hashable`]: builds `Hashable::hash` from the `Display` output of
//!   selected fields
//!
//! # Example
//!
//! ```rust,ignore
//! use hashstream::hash::Hashable as _;
//! use hashstream::Hashable;
//!
//! #[derive(Hashable)]
//! struct Person {
//!     #[hash]
//!     first_name: String,
//!     #[hash]
//!     last_name: String,
//!     age: u32,
//! }
//!
//! let person = Person {
//!     first_name: "John".into(),
//!     last_name: "Smith".into(),
//!     age: 42,
//! };
//! assert_eq!(person.hash().as_str(), "John Smith");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod hashable;

use proc_macro::TokenStream;

/// Derive macro implementing `hashstream::hash::Hashable` for a struct.
///
/// The hash is the `Display` output of the selected fields, joined by a
/// separator. Fields are selected with `#[hash]`; when no field carries the
/// attribute, every field is used. A struct without fields hashes to its
/// type name.
///
/// # Attributes
///
/// - `#[hash]` on a field: include the field
/// - `#[hashable(separator = "...")]` on the struct: join with the given
///   separator instead of a single space
///
/// # Generated Code
///
/// ```rust,ignore
/// impl hashstream::hash::Hashable for StructName {
///     fn hash(&self) -> hashstream::hash::HashCode {
///         [self.a.to_string(), self.b.to_string()].join(" ").into()
///     }
/// }
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use hashstream::Hashable;
///
/// #[derive(Hashable)]
/// #[hashable(separator = "/")]
/// struct Route(String, u16);
///
/// let route = Route("api".into(), 2);
/// assert_eq!(hashstream::hash::Hashable::hash(&route).as_str(), "api/2");
/// ```
///
/// # Errors
///
/// Deriving on an enum or a union, or passing an unknown `hashable` option,
/// is a compile error.
#[proc_macro_derive(Hashable, attributes(hash, hashable))]
pub fn derive_hashable(input: TokenStream) -> TokenStream {
    hashable::derive_hashable_impl(input)
}
