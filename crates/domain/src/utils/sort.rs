//! Sorting helpers
//!
//! Views sort on a derived key that is either numeric (score, amount) or
//! textual (names, enum values, timestamps). [`sort_by_key`] always returns a
//! new vector and uses a stable sort, so rows with equal keys keep the order
//! they arrived in.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl_domain_enum_conversions!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Derived sort key
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for SortKey {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Compare numbers with direction
pub fn compare_number(a: f64, b: f64, dir: SortDirection) -> Ordering {
    match dir {
        SortDirection::Asc => a.total_cmp(&b),
        SortDirection::Desc => b.total_cmp(&a),
    }
}

/// Collation-style string comparison.
///
/// Letters compare case-insensitively first so "alice" sorts next to "Alice"
/// rather than after every capitalised name; only strings that are equal
/// ignoring case fall back to code-point order.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let primary =
        a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| a.cmp(b))
}

fn compare_keys(a: &SortKey, b: &SortKey, dir: SortDirection) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => compare_number(*x, *y, dir),
        _ => {
            let (x, y) = (a.as_text(), b.as_text());
            match dir {
                SortDirection::Asc => compare_text(&x, &y),
                SortDirection::Desc => compare_text(&y, &x),
            }
        }
    }
}

/// Sort by a derived numeric or string key; the input is left untouched.
pub fn sort_by_key<T, F>(items: &[T], key: F, dir: SortDirection) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> SortKey,
{
    let mut keyed: Vec<(SortKey, &T)> = items.iter().map(|item| (key(item), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, dir));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// `(key, direction)` after a sort request on `key`.
///
/// An explicit direction is taken as is. Otherwise a new key starts
/// ascending and the active key flips its direction.
pub fn next_sort<K: PartialEq>(
    current: (K, SortDirection),
    key: K,
    explicit: Option<SortDirection>,
) -> (K, SortDirection) {
    let (current_key, current_dir) = current;
    match explicit {
        Some(dir) => (key, dir),
        None if current_key != key => (key, SortDirection::Asc),
        None => (current_key, current_dir.flipped()),
    }
}

/// Sort by score, highest first.
pub fn sort_by_score_desc<T, F>(items: &[T], score: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    sort_by_key(items, |item| SortKey::Number(score(item)), SortDirection::Desc)
}
