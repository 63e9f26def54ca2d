//! Accumulators for [`Stream::reduce`](super::Stream::reduce).
//!
//! An [`Accumulator`] carries its own initial value, so a reduction needs no
//! seed argument. Extremum accumulators start from `None` instead of a
//! sentinel, which also makes the empty case explicit.

use std::cmp::Ordering;
use std::iter;
use std::ops::{Add, Mul};

/// A fold step together with its starting value.
pub trait Accumulator<T> {
    /// The folded value.
    type Carry;

    /// Returns the value of the fold before any item.
    fn initial(&self) -> Self::Carry;

    /// Folds `item` into `carry`.
    fn accumulate(&mut self, carry: Self::Carry, item: T) -> Self::Carry;
}

/// Sum of the items, `0` for no item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

/// Product of the items, `1` for no item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

/// Smallest item, `None` for no item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

/// Largest item, `None` for no item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

/// Fold with a caller-supplied function and starting value.
#[derive(Debug, Clone)]
pub struct Folding<C, F> {
    initial: C,
    function: F,
}

impl<T> Accumulator<T> for Sum
where
    T: Add<Output = T> + iter::Sum<T>,
{
    type Carry = T;

    fn initial(&self) -> T {
        iter::empty::<T>().sum()
    }

    fn accumulate(&mut self, carry: T, item: T) -> T {
        carry + item
    }
}

impl<T> Accumulator<T> for Product
where
    T: Mul<Output = T> + iter::Product<T>,
{
    type Carry = T;

    fn initial(&self) -> T {
        iter::empty::<T>().product()
    }

    fn accumulate(&mut self, carry: T, item: T) -> T {
        carry * item
    }
}

impl<T: PartialOrd> Accumulator<T> for Min {
    type Carry = Option<T>;

    fn initial(&self) -> Option<T> {
        None
    }

    fn accumulate(&mut self, carry: Option<T>, item: T) -> Option<T> {
        match carry {
            Some(current) if item.partial_cmp(&current) != Some(Ordering::Less) => Some(current),
            _ => Some(item),
        }
    }
}

impl<T: PartialOrd> Accumulator<T> for Max {
    type Carry = Option<T>;

    fn initial(&self) -> Option<T> {
        None
    }

    fn accumulate(&mut self, carry: Option<T>, item: T) -> Option<T> {
        match carry {
            Some(current) if item.partial_cmp(&current) != Some(Ordering::Greater) => Some(current),
            _ => Some(item),
        }
    }
}

impl<T, C, F> Accumulator<T> for Folding<C, F>
where
    C: Clone,
    F: FnMut(C, T) -> C,
{
    type Carry = C;

    fn initial(&self) -> C {
        self.initial.clone()
    }

    fn accumulate(&mut self, carry: C, item: T) -> C {
        (self.function)(carry, item)
    }
}

/// The built-in accumulators.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Accumulators, Stream, Streams};
///
/// assert_eq!(Streams::of(vec![1, 2, 3]).reduce(Accumulators::sum()), 6);
/// assert_eq!(Streams::of(vec![1.5, 2.0]).reduce(Accumulators::multiply()), 3.0);
/// assert_eq!(Streams::of(vec![4, 1, 3]).reduce(Accumulators::min()), Some(1));
/// assert_eq!(Streams::of(vec!["b", "c", "a"]).reduce(Accumulators::max()), Some("c"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Accumulators;

impl Accumulators {
    /// Sums the items.
    #[must_use]
    pub const fn sum() -> Sum {
        Sum
    }

    /// Multiplies the items.
    #[must_use]
    pub const fn multiply() -> Product {
        Product
    }

    /// Keeps the smallest item; ties keep the earliest.
    #[must_use]
    pub const fn min() -> Min {
        Min
    }

    /// Keeps the largest item; ties keep the earliest.
    #[must_use]
    pub const fn max() -> Max {
        Max
    }

    /// Folds with `function`, starting from `initial`.
    pub const fn from_fn<C, F>(initial: C, function: F) -> Folding<C, F> {
        Folding { initial, function }
    }
}
