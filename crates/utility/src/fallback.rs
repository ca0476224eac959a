/// Returns the first present value of an ordered list of optional sources.
///
/// The position in `sources` is the precedence: index 0 wins over index 1 and
/// so on. If no source holds a value the result is `None`, never a default.
pub fn first_present<T, const N: usize>(sources: [Option<T>; N]) -> Option<T> {
    sources.into_iter().flatten().next()
}
