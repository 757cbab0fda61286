use std::convert::Infallible;
use std::ops::ControlFlow;

/// The reason a generator body stopped before running to completion.
///
/// Bodies return `Result<(), Halt<E>>`. Because `Halt<E>` implements
/// `From<E>`, the `?` operator can be used on the body's own errors as well as
/// on [Yielder::yield_].
#[derive(Debug)]
pub enum Halt<E = Infallible> {
    /// Stop producing values. This is a normal end of the sequence and is
    /// never surfaced to the consumer as an error.
    Stop,
    /// The body failed. The error is handed to the consumer verbatim.
    Error(E),
    /// The consumer is gone and no more values can be yielded. Bodies are
    /// expected to propagate this as-is.
    Closed,
}

impl<E> From<E> for Halt<E> {
    #[inline]
    fn from(error: E) -> Self {
        Self::Error(error)
    }
}

/// The sink handed to a generator body.
///
/// `T` is the type of values yielded, `R` the type of feed value handed back
/// to the body when it is resumed.
///
/// # Examples
///
/// ```rust
/// use pullgen::{Generator, Halt, ThreadedGenerator, Yielder};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut g = ThreadedGenerator::new(|y: &mut dyn Yielder<u32>| {
///     y.yield_(1)?;
///     y.yield_(2)?;
///     Ok(())
/// });
///
/// assert_eq!(g.next()?, 1);
/// assert_eq!(g.next()?, 2);
/// assert!(g.is_end()?);
/// # Ok(()) }
/// ```
pub trait Yielder<T, R = (), E = Infallible> {
    /// Yield a value to the consumer.
    ///
    /// Returns the value fed back by the consumer when it asks for the value
    /// after this one, or `R::default()` if nothing was fed.
    fn yield_(&mut self, value: T) -> Result<R, Halt<E>>;
}

impl<T, R, E, F> Yielder<T, R, E> for F
where
    F: FnMut(T) -> Result<R, Halt<E>>,
{
    #[inline]
    fn yield_(&mut self, value: T) -> Result<R, Halt<E>> {
        self(value)
    }
}

/// An existing source which iterates over its values by pushing them into a
/// callback.
///
/// # Examples
///
/// ```rust
/// use std::ops::ControlFlow;
/// use pullgen::Traverse;
///
/// struct Squares(u32);
///
/// impl Traverse<u32> for Squares {
///     type Error = std::convert::Infallible;
///
///     fn traverse(&self, visit: &mut dyn FnMut(u32) -> ControlFlow<()>) -> Result<(), Self::Error> {
///         for n in 0..self.0 {
///             if visit(n * n).is_break() {
///                 break;
///             }
///         }
///
///         Ok(())
///     }
/// }
///
/// let mut out = Vec::new();
/// Squares(4).traverse(&mut |n| {
///     out.push(n);
///     ControlFlow::Continue(())
/// }).unwrap();
///
/// assert_eq!(out, [0, 1, 4, 9]);
/// ```
pub trait Traverse<T> {
    /// The error raised by the traversal.
    type Error;

    /// Visit every value in order.
    ///
    /// Implementations must stop as soon as `visit` returns
    /// [ControlFlow::Break].
    fn traverse(&self, visit: &mut dyn FnMut(T) -> ControlFlow<()>) -> Result<(), Self::Error>;

    /// Called when a generator built from this source is rewound.
    fn rewind(&self) {}
}

impl<T, S> Traverse<T> for std::sync::Arc<S>
where
    S: ?Sized + Traverse<T>,
{
    type Error = S::Error;

    #[inline]
    fn traverse(&self, visit: &mut dyn FnMut(T) -> ControlFlow<()>) -> Result<(), Self::Error> {
        (**self).traverse(visit)
    }

    #[inline]
    fn rewind(&self) {
        (**self).rewind()
    }
}
