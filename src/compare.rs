use std::cmp::Ordering;

/// A comparator over two payloads. `find` treats `Ordering::Equal` as a match.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Compares two values by their `Ord` implementation
pub fn natural<T: Ord>(left: &T, right: &T) -> Ordering {
    left.cmp(right)
}

/// Compares two values by the reverse of their `Ord` implementation
pub fn reversed<T: Ord>(left: &T, right: &T) -> Ordering {
    right.cmp(left)
}

/// Returns true if `compare` judges `left` and `right` equal
///
/// # Arguments
///
/// `compare`: The comparator
///
/// `left`: The first value
///
/// `right`: The second value
pub fn equals<T, K: ?Sized, C: FnMut(&T, &K) -> Ordering>(
    mut compare: C,
    left: &T,
    right: &K,
) -> bool {
    compare(left, right) == Ordering::Equal
}
