use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Clone, Debug, PartialEq)]
pub enum Error<K> {
    /// Returned by lookups, floor, ceil, min and max when no entry
    /// qualifies.
    NotFound,
    /// Returned by create() API when key is already present.
    OverwriteKey,
    /// Fatal case, breaking one of the LLRB rules.
    ConsecutiveReds,
    /// Fatal case, a red link leaning right.
    RightLeaningRed,
    /// Fatal case, root must always be black.
    RedRoot,
    /// Fatal case, breaking one of the LLRB rules. The String
    /// component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order. Carries the
    /// offending key and its bounding ancestor.
    SortError(K, K),
    /// Fatal case, entry count (first) disagrees with the number of
    /// live nodes in the pool (second).
    CountMismatch(usize, usize),
}

impl<K> fmt::Display for Error<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not found"),
            Error::OverwriteKey => write!(f, "key already present"),
            Error::ConsecutiveReds => write!(f, "consecutive red links"),
            Error::RightLeaningRed => write!(f, "red link leaning right"),
            Error::RedRoot => write!(f, "root is red"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(key, bound) => {
                write!(f, "key {:?} out of order against {:?}", key, bound)
            }
            Error::CountMismatch(n, live) => {
                write!(f, "count {} but {} live nodes", n, live)
            }
        }
    }
}

impl<K> error::Error for Error<K> where K: fmt::Debug {}
