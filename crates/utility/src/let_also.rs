/// Scope functions for chaining a value into a closure.
pub trait LetAlso: Sized {
    /// Passes `self` by value into `f` and returns its result.
    fn let_owned<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }

    /// Runs `f` on a mutable reference to `self`, then returns `self`.
    fn also<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        f(&mut self);
        self
    }
}

impl<T> LetAlso for T {}
