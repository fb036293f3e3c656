/*!
 * Integer interval predicates.
 *
 * Intervals are inclusive `(start, end)` pairs. These predicates are the only
 * relational tests used to rebuild the text-container hierarchy.
 */

/// Returns true if `contained` lies entirely inside `container`.
///
/// Equal intervals are considered contained.
pub fn is_interval_within(contained: (usize, usize), container: (usize, usize)) -> bool {
    container.0 <= contained.0 && contained.1 <= container.1
}

/// Returns true if the two inclusive intervals share at least one index.
pub fn intervals_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}
