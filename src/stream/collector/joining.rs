//! String concatenation collector.

use std::fmt::{Display, Write};

use super::Collector;

/// Joins the `Display` output of the values with a separator, between a
/// prefix and a suffix.
///
/// An empty stream yields `prefix + suffix`.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Joining, Stream, Streams};
///
/// let list = Streams::of(vec![1, 2, 3]).collect(Joining::with_affixes(", ", "[", "]"));
/// assert_eq!(list, "[1, 2, 3]");
///
/// let none = Streams::of(Vec::<i32>::new()).collect(Joining::with_affixes(", ", "[", "]"));
/// assert_eq!(none, "[]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Joining {
    separator: String,
    prefix: String,
    suffix: String,
    aggregation: Option<String>,
}

impl Joining {
    /// Joins the values with nothing in between.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the values with `separator`.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self::with_affixes(separator, "", "")
    }

    /// Joins the values with `separator`, between `prefix` and `suffix`.
    pub fn with_affixes(
        separator: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            separator: separator.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            aggregation: None,
        }
    }
}

impl<K, V: Display> Collector<K, V> for Joining {
    type Output = String;

    fn aggregate(&mut self, value: V, _key: K) {
        match &mut self.aggregation {
            Some(aggregation) => {
                aggregation.push_str(&self.separator);
                // Writing into a String cannot fail.
                let _ = write!(aggregation, "{value}");
            }
            None => self.aggregation = Some(value.to_string()),
        }
    }

    fn finalize(self) -> String {
        let mut joined = self.prefix;
        if let Some(aggregation) = self.aggregation {
            joined.push_str(&aggregation);
        }
        joined.push_str(&self.suffix);
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{Stream, Streams};
    use rstest::rstest;

    #[rstest]
    #[case::plain(Joining::new(), "abc")]
    #[case::separator(Joining::with_separator("-"), "a-b-c")]
    #[case::affixes(Joining::with_affixes("", "<", ">"), "<abc>")]
    fn test_joining(#[case] collector: Joining, #[case] expected: &str) {
        assert_eq!(Streams::of(vec!['a', 'b', 'c']).collect(collector), expected);
    }

    #[rstest]
    fn test_single_value_has_no_separator() {
        assert_eq!(Streams::singleton(7).collect(Joining::with_separator(", ")), "7");
    }
}
