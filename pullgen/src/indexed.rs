use crate::{Error, Generator, Indexable};
use std::convert::Infallible;
use std::fmt;

/// A generator over a finite random-access source.
///
/// The source is borrowed, never copied, and values are produced on demand
/// by calling the indexer with the source and the current position.
///
/// # Examples
///
/// ```rust
/// use pullgen::{Generator, IndexedGenerator};
///
/// # fn main() -> anyhow::Result<()> {
/// let data = vec![10, 20, 30];
/// let mut g = IndexedGenerator::new(&data, |s: &Vec<u32>, i| s[i]);
///
/// assert_eq!(g.next()?, 10);
/// assert_eq!(g.next()?, 20);
/// assert_eq!(g.next()?, 30);
/// assert!(g.is_end()?);
/// # Ok(()) }
/// ```
pub struct IndexedGenerator<'a, S, F>
where
    S: ?Sized,
{
    source: &'a S,
    indexer: F,
    start: usize,
    position: usize,
}

impl<'a, S, F> IndexedGenerator<'a, S, F>
where
    S: ?Sized + Indexable,
{
    /// Construct a generator over `source` which produces values through
    /// `indexer`.
    pub fn new<T>(source: &'a S, indexer: F) -> Self
    where
        F: Fn(&S, usize) -> T,
    {
        Self {
            source,
            indexer,
            start: 0,
            position: 0,
        }
    }

    /// Construct a generator over `source` which starts at the given offset.
    ///
    /// Rewinding returns to `start`. An offset past the end of the source is
    /// rejected, which includes any non-zero offset into an empty source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Error, Generator, IndexedGenerator};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let data = [1, 2, 3];
    /// let mut g = IndexedGenerator::starting_at(&data, |s: &[u32; 3], i| s[i], 1)?;
    /// assert_eq!(g.next()?, 2);
    /// assert_eq!(g.index(), 1);
    ///
    /// let empty: [u32; 0] = [];
    /// let g = IndexedGenerator::starting_at(&empty, |s: &[u32; 0], i| s[i], 1);
    /// assert!(matches!(g, Err(Error::Misuse(..))));
    /// # Ok(()) }
    /// ```
    pub fn starting_at<T>(source: &'a S, indexer: F, start: usize) -> Result<Self, Error>
    where
        F: Fn(&S, usize) -> T,
    {
        if source.is_empty() && start != 0 {
            return Err(Error::Misuse("non-zero start over an empty source"));
        }

        if start > source.len() {
            return Err(Error::Misuse("start is past the end of the source"));
        }

        Ok(Self {
            source,
            indexer,
            start,
            position: start,
        })
    }

    /// Access the borrowed source.
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// The number of values left before the generator reaches its end.
    pub fn remaining(&self) -> usize {
        self.source.len().saturating_sub(self.position)
    }
}

impl<'a, T> IndexedGenerator<'a, [T], fn(&[T], usize) -> T>
where
    T: Clone,
{
    /// Construct a generator which produces clones of the elements of a
    /// slice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Generator, IndexedGenerator};
    ///
    /// let mut g = IndexedGenerator::elements(&["a", "b"]);
    /// assert_eq!(g.next().ok(), Some("a"));
    /// assert_eq!(g.current().ok(), Some("b"));
    /// ```
    pub fn elements(source: &'a [T]) -> Self {
        fn clone_at<T>(source: &[T], index: usize) -> T
        where
            T: Clone,
        {
            source[index].clone()
        }

        Self::new(source, clone_at::<T>)
    }
}

impl<S, F, T> Generator for IndexedGenerator<'_, S, F>
where
    S: ?Sized + Indexable,
    F: Fn(&S, usize) -> T,
{
    type Item = T;
    type Error = Infallible;

    #[inline]
    fn index(&self) -> usize {
        self.position - self.start
    }

    #[inline]
    fn is_end(&mut self) -> Result<bool, Error> {
        Ok(self.position >= self.source.len())
    }

    fn current(&mut self) -> Result<T, Error> {
        if self.position >= self.source.len() {
            return Err(Error::EndOfSequence);
        }

        Ok((self.indexer)(self.source, self.position))
    }

    fn next(&mut self) -> Result<T, Error> {
        let value = self.current()?;
        self.position += 1;
        Ok(value)
    }

    #[inline]
    fn rewind(&mut self) {
        self.position = self.start;
    }

    #[inline]
    fn size(&self) -> Option<usize> {
        Some(self.source.len() - self.start)
    }

    /// Make a fresh pass over the source from the starting offset.
    ///
    /// Unlike the default implementation this does not touch the position of
    /// the generator.
    fn each(&mut self, f: &mut dyn FnMut(T)) -> Result<(), Error> {
        for index in self.start..self.source.len() {
            f((self.indexer)(self.source, index));
        }

        Ok(())
    }
}

impl<S, F> fmt::Debug for IndexedGenerator<'_, S, F>
where
    S: ?Sized + Indexable,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedGenerator")
            .field("len", &self.source.len())
            .field("start", &self.start)
            .field("position", &self.position)
            .finish()
    }
}
