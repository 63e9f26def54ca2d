//! Hash codes and hashing policies.
//!
//! A [`HashCode`] is the identity under which [`HashSet`](crate::collection::HashSet)
//! and [`HashTable`](crate::collection::HashTable) store their entries: two
//! values with the same hash code are the same entry.
//!
//! Codes come from one of three policies, all wrapped in a [`HashFunction`]:
//!
//! - **Structural** ([`compute`]): the canonical serialization of any
//!   `serde::Serialize` value. Distinct scalars of distinct kinds never collide
//!   (`1`, `"1"`, `1.0` and `true` all hash differently), and compound values
//!   hash by content.
//! - **Hashable** ([`compute_hashable`]): the value's own [`Hashable::hash`],
//!   tagged so it cannot collide with a structural code.
//! - **Custom**: any closure returning something convertible to a [`HashCode`].
//!
//! # Examples
//!
//! ```rust
//! use hashstream::hash::{compute, HashCode};
//!
//! assert_eq!(compute(&42), HashCode::from("i:42;"));
//! assert_ne!(compute(&1), compute("1"));
//! assert_eq!(compute(&vec![1, 2]), compute(&[1, 2]));
//! ```

mod canonical;

use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

pub(crate) use canonical::HASHABLE_MARKER;

// =============================================================================
// HashCode
// =============================================================================

/// Identity of a value inside the hash-keyed collections.
///
/// A hash code is an opaque string; its only meaningful operations are
/// equality, hashing and display.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashCode(String);

impl HashCode {
    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code and returns the underlying string.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for HashCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("HashCode").field(&self.0).finish()
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<String> for HashCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for HashCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl AsRef<str> for HashCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_from_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for HashCode {
                fn from(code: $integer) -> Self {
                    Self(code.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// =============================================================================
// Hashable
// =============================================================================

/// A type that supplies its own hash code.
///
/// Two values whose `hash` results are equal are treated as the same element
/// by the hash-keyed collections built with [`HashFunction::hashable`].
///
/// # Examples
///
/// ```rust
/// use hashstream::hash::{HashCode, Hashable};
///
/// struct Person {
///     first_name: String,
///     last_name: String,
/// }
///
/// impl Hashable for Person {
///     fn hash(&self) -> HashCode {
///         format!("{} {}", self.first_name, self.last_name).into()
///     }
/// }
///
/// let person = Person {
///     first_name: "John".to_string(),
///     last_name: "Smith".to_string(),
/// };
/// assert_eq!(person.hash().as_str(), "John Smith");
/// ```
pub trait Hashable {
    /// Returns the identity of this value.
    fn hash(&self) -> HashCode;
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn hash(&self) -> HashCode {
        (**self).hash()
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    fn hash(&self) -> HashCode {
        (**self).hash()
    }
}

impl<T: Hashable + ?Sized> Hashable for Rc<T> {
    fn hash(&self) -> HashCode {
        (**self).hash()
    }
}

// =============================================================================
// Policies
// =============================================================================

/// Computes the structural hash code of a value.
///
/// The code is the canonical serialization of the value: every scalar carries
/// its kind, strings and byte buffers carry their length, and compound values
/// list their entries in order. Values embedding a [`Hashable`] through
/// [`serialize_hashable`] contribute that value's own hash.
///
/// Serialization errors do not abort hashing: the error message becomes part
/// of the code and a warning is logged.
///
/// # Examples
///
/// ```rust
/// use hashstream::hash::compute;
///
/// assert_eq!(compute(&true).as_str(), "b:1;");
/// assert_eq!(compute("abc").as_str(), "s:3:\"abc\";");
/// assert_eq!(compute(&Option::<i32>::None).as_str(), "N;");
/// assert_eq!(compute(&vec![5]).as_str(), "a:1:{i:0;i:5;}");
/// ```
pub fn compute<T: Serialize + ?Sized>(value: &T) -> HashCode {
    match canonical::to_canonical_string(value) {
        Ok(code) => HashCode(code),
        Err(failure) => {
            tracing::warn!(error = %failure, "value could not be serialized for hashing");
            HashCode(format!("X:{failure};"))
        }
    }
}

/// Computes the hash code of a [`Hashable`] value.
///
/// The value's own hash is prefixed so that it never equals a structural code.
///
/// # Examples
///
/// ```rust
/// use hashstream::hash::{compute_hashable, HashCode, Hashable};
///
/// struct Upper(String);
///
/// impl Hashable for Upper {
///     fn hash(&self) -> HashCode {
///         self.0.to_uppercase().into()
///     }
/// }
///
/// assert_eq!(
///     compute_hashable(&Upper("john".into())),
///     compute_hashable(&Upper("JOHN".into()))
/// );
/// ```
pub fn compute_hashable<T: Hashable + ?Sized>(value: &T) -> HashCode {
    HashCode(canonical::hashable_token(value.hash().as_str()))
}

/// `serialize_with` helper that serializes a [`Hashable`] field as its hash.
///
/// Under [`compute`] the field contributes exactly what [`compute_hashable`]
/// would; other serializers see the hash as a newtype around a string.
///
/// # Errors
///
/// Returns whatever error the serializer reports.
///
/// # Examples
///
/// ```rust
/// use hashstream::hash::{compute, compute_hashable, serialize_hashable, HashCode, Hashable};
/// use serde::Serialize;
///
/// struct Tag(&'static str);
///
/// impl Hashable for Tag {
///     fn hash(&self) -> HashCode {
///         self.0.into()
///     }
/// }
///
/// #[derive(Serialize)]
/// struct Wrapper(#[serde(serialize_with = "serialize_hashable")] Tag);
///
/// assert!(compute(&Wrapper(Tag("x"))).as_str().contains("H:1:\"x\";"));
/// ```
pub fn serialize_hashable<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Hashable + ?Sized,
    S: Serializer,
{
    serializer.serialize_newtype_struct(HASHABLE_MARKER, value.hash().as_str())
}

// =============================================================================
// HashFunction
// =============================================================================

enum Strategy<T: ?Sized> {
    Function(fn(&T) -> HashCode),
    Closure(Rc<dyn Fn(&T) -> HashCode>),
}

/// A cloneable hashing policy for values of type `T`.
///
/// # Examples
///
/// ```rust
/// use hashstream::hash::HashFunction;
///
/// let by_length = HashFunction::new(|word: &String| word.len());
///
/// assert_eq!(by_length.apply(&"abc".to_string()), by_length.apply(&"xyz".to_string()));
/// ```
pub struct HashFunction<T: ?Sized> {
    strategy: Strategy<T>,
}

impl<T: ?Sized> HashFunction<T> {
    /// Creates a policy from a closure.
    ///
    /// The closure may return anything convertible to a [`HashCode`], such as a
    /// `String` or an integer.
    pub fn new<F, H>(function: F) -> Self
    where
        F: Fn(&T) -> H + 'static,
        H: Into<HashCode>,
    {
        Self {
            strategy: Strategy::Closure(Rc::new(move |value: &T| function(value).into())),
        }
    }

    /// Computes the hash code of `value` under this policy.
    #[inline]
    pub fn apply(&self, value: &T) -> HashCode {
        match &self.strategy {
            Strategy::Function(function) => function(value),
            Strategy::Closure(closure) => closure(value),
        }
    }
}

impl<T: Serialize + ?Sized> HashFunction<T> {
    /// The structural policy, backed by [`compute`].
    #[must_use]
    pub fn structural() -> Self {
        Self {
            strategy: Strategy::Function(compute::<T>),
        }
    }
}

impl<T: Hashable + ?Sized> HashFunction<T> {
    /// The [`Hashable`] policy, backed by [`compute_hashable`].
    #[must_use]
    pub fn hashable() -> Self {
        Self {
            strategy: Strategy::Function(compute_hashable::<T>),
        }
    }
}

impl<T: ?Sized> Clone for HashFunction<T> {
    fn clone(&self) -> Self {
        let strategy = match &self.strategy {
            Strategy::Function(function) => Strategy::Function(*function),
            Strategy::Closure(closure) => Strategy::Closure(Rc::clone(closure)),
        };
        Self { strategy }
    }
}

impl<T: Serialize + ?Sized> Default for HashFunction<T> {
    fn default() -> Self {
        Self::structural()
    }
}

impl<T: ?Sized> fmt::Debug for HashFunction<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.strategy {
            Strategy::Function(_) => "builtin",
            Strategy::Closure(_) => "closure",
        };
        formatter
            .debug_struct("HashFunction")
            .field("kind", &kind)
            .finish()
    }
}
