use crate::{Error, Iter};

/// A stateful, pull-based iterator.
///
/// A generator keeps track of an [index][Generator::index], the number of
/// values consumed since it was constructed or last
/// [rewound][Generator::rewind]. Only a successful call to
/// [next][Generator::next] advances it.
///
/// The trait is object safe, so generators built from different strategies
/// can be mixed behind a `Box<dyn Generator>`.
///
/// # Examples
///
/// ```rust
/// use pullgen::{Generator, IndexedGenerator};
///
/// # fn main() -> anyhow::Result<()> {
/// let data = [10, 20, 30];
/// let mut g = IndexedGenerator::new(&data[..], |s: &[u32], i| s[i]);
///
/// assert!(g.has_next()?);
/// assert_eq!(g.current()?, 10);
/// assert_eq!(g.next()?, 10);
/// assert_eq!(g.index(), 1);
///
/// g.rewind();
/// assert_eq!(g.index(), 0);
/// # Ok(()) }
/// ```
pub trait Generator {
    /// The values produced.
    type Item;

    /// The error type of the underlying producer.
    type Error;

    /// The number of values consumed since construction or the last rewind.
    fn index(&self) -> usize;

    /// Test if the generator has reached its end.
    ///
    /// This never consumes anything and repeated calls give the same answer.
    /// A generator whose producer has failed is *not* at its end until the
    /// failure has been observed through [next][Generator::next] or
    /// [current][Generator::current].
    fn is_end(&mut self) -> Result<bool, Error<Self::Error>>;

    /// Test if there is another value, the inverse of
    /// [is_end][Generator::is_end].
    fn has_next(&mut self) -> Result<bool, Error<Self::Error>> {
        Ok(!self.is_end()?)
    }

    /// Get the value [next][Generator::next] would return, without consuming
    /// it.
    ///
    /// Errors with [Error::EndOfSequence] if there is no such value.
    fn current(&mut self) -> Result<Self::Item, Error<Self::Error>>;

    /// Consume and return the next value.
    ///
    /// Errors with [Error::EndOfSequence] if there is no such value.
    fn next(&mut self) -> Result<Self::Item, Error<Self::Error>>;

    /// Return the generator to its initial position.
    fn rewind(&mut self);

    /// The number of values in a full pass, if it is known without producing
    /// them.
    ///
    /// This doesn't depend on the position of the generator.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Feed every value of the generator to `f`.
    ///
    /// The default implementation rewinds the generator and drives
    /// [next][Generator::next] until the end, which leaves the generator at
    /// its end. Implementations are free to use a cheaper path as long as the
    /// observed sequence is the same.
    fn each(&mut self, f: &mut dyn FnMut(Self::Item)) -> Result<(), Error<Self::Error>> {
        self.rewind();

        while !self.is_end()? {
            f(self.next()?);
        }

        Ok(())
    }

    /// Construct an [Iterator] which consumes values from this generator.
    ///
    /// ```rust
    /// use pullgen::{CursorGenerator, Generator};
    ///
    /// let mut g = CursorGenerator::new(1, 3, |n: &u32| n + 1);
    /// let values = g.iter().collect::<Result<Vec<_>, _>>().unwrap();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    fn iter(&mut self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }
}

macro_rules! forward {
    () => {
        type Item = G::Item;
        type Error = G::Error;

        #[inline]
        fn index(&self) -> usize {
            (**self).index()
        }

        #[inline]
        fn is_end(&mut self) -> Result<bool, Error<Self::Error>> {
            (**self).is_end()
        }

        #[inline]
        fn has_next(&mut self) -> Result<bool, Error<Self::Error>> {
            (**self).has_next()
        }

        #[inline]
        fn current(&mut self) -> Result<Self::Item, Error<Self::Error>> {
            (**self).current()
        }

        #[inline]
        fn next(&mut self) -> Result<Self::Item, Error<Self::Error>> {
            (**self).next()
        }

        #[inline]
        fn rewind(&mut self) {
            (**self).rewind()
        }

        #[inline]
        fn size(&self) -> Option<usize> {
            (**self).size()
        }

        #[inline]
        fn each(&mut self, f: &mut dyn FnMut(Self::Item)) -> Result<(), Error<Self::Error>> {
            (**self).each(f)
        }
    };
}

impl<G> Generator for &mut G
where
    G: ?Sized + Generator,
{
    forward!();
}

impl<G> Generator for Box<G>
where
    G: ?Sized + Generator,
{
    forward!();
}
