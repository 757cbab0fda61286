use crate::cursor::Successor;
use crate::{
    CursorGenerator, Error, Generator, Halt, Indexable, IndexedGenerator, ThreadedGenerator,
    Traverse, Yielder,
};
use std::convert::Infallible;
use std::fmt;

/// The strategy an [AnyGenerator] was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// See [IndexedGenerator].
    Indexed,
    /// See [CursorGenerator].
    Cursor,
    /// See [ThreadedGenerator].
    Threaded,
}

/// A generator built from any of the available strategies.
///
/// The strategy is picked once, by the constructor used, and doesn't change
/// for the lifetime of the generator. This makes it possible to mix sources
/// of different shapes as long as they produce the same type of value, for
/// example in a [SynchronizedZipper][crate::SynchronizedZipper].
///
/// Errors raised by the indexed and cursor strategies are widened into the
/// producer error type `E`.
///
/// # Examples
///
/// ```rust
/// use pullgen::{AnyGenerator, Generator, Halt, Kind, SynchronizedZipper, Yielder};
///
/// # fn main() -> anyhow::Result<()> {
/// let data = vec![10, 20, 30];
///
/// let generators = vec![
///     AnyGenerator::indexed(&data, |s: &Vec<u32>, i| s[i]),
///     AnyGenerator::cursor(1, 2, |n: &u32| n + 1),
///     AnyGenerator::body(|y: &mut dyn Yielder<u32>| {
///         y.yield_(7)?;
///         Err(Halt::Stop)
///     }),
/// ];
///
/// assert_eq!(generators[2].kind(), Kind::Threaded);
///
/// let mut zipper = generators.into_iter().collect::<SynchronizedZipper<_>>();
/// let mut rounds = Vec::new();
/// zipper.each(|round| rounds.push(round))?;
///
/// assert_eq!(rounds, [
///     vec![Some(10), Some(1), Some(7)],
///     vec![Some(20), Some(2), None],
///     vec![Some(30), None, None],
/// ]);
/// # Ok(()) }
/// ```
pub enum AnyGenerator<'a, T, E = Infallible, R = ()> {
    /// A generator over a random-access source.
    Indexed(Box<dyn Generator<Item = T, Error = Infallible> + 'a>),
    /// A generator over a succession of values.
    Cursor(CursorGenerator<T, Successor<'a, T>>),
    /// A generator adapting push-style code.
    Threaded(ThreadedGenerator<T, E, R>),
}

impl<'a, T, E, R> AnyGenerator<'a, T, E, R> {
    /// Construct a generator over a random-access source.
    ///
    /// See [IndexedGenerator::new].
    pub fn indexed<S, F>(source: &'a S, indexer: F) -> Self
    where
        S: ?Sized + Indexable,
        F: Fn(&S, usize) -> T + 'a,
    {
        Self::from(IndexedGenerator::new(source, indexer))
    }

    /// Construct a generator over the values from `start` up to and
    /// including `end`.
    ///
    /// See [CursorGenerator::new].
    pub fn cursor<F>(start: T, end: T, successor: F) -> Self
    where
        T: Clone + PartialEq,
        F: Fn(&T) -> T + 'a,
    {
        Self::from(CursorGenerator::new(start, end, successor))
    }

    /// Construct a generator over the values from `start` up to but excluding
    /// `end`.
    ///
    /// See [CursorGenerator::exclusive].
    pub fn cursor_exclusive<F>(start: T, end: T, successor: F) -> Self
    where
        T: Clone + PartialEq,
        F: Fn(&T) -> T + 'a,
    {
        Self::from(CursorGenerator::exclusive(start, end, successor))
    }

    /// The strategy this generator was built with.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Indexed(..) => Kind::Indexed,
            Self::Cursor(..) => Kind::Cursor,
            Self::Threaded(..) => Kind::Threaded,
        }
    }
}

impl<T, E, R> AnyGenerator<'_, T, E, R>
where
    T: Send + 'static,
    E: Send + 'static,
    R: Default + Send + 'static,
{
    /// Construct a generator out of a body which pushes values into a
    /// [Yielder].
    ///
    /// See [ThreadedGenerator::new].
    pub fn body<F>(body: F) -> Self
    where
        F: Fn(&mut dyn Yielder<T, R, E>) -> Result<(), Halt<E>> + Send + Sync + 'static,
    {
        Self::Threaded(ThreadedGenerator::new(body))
    }
}

impl<T, E> AnyGenerator<'_, T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Construct a generator out of an existing push-style source.
    ///
    /// See [ThreadedGenerator::from_traverse].
    pub fn traverse<S>(source: S) -> Self
    where
        S: Traverse<T, Error = E> + Send + Sync + 'static,
    {
        Self::Threaded(ThreadedGenerator::from_traverse(source))
    }
}

impl<'a, S, F, T, E, R> From<IndexedGenerator<'a, S, F>> for AnyGenerator<'a, T, E, R>
where
    S: ?Sized + Indexable,
    F: Fn(&S, usize) -> T + 'a,
{
    #[inline]
    fn from(generator: IndexedGenerator<'a, S, F>) -> Self {
        Self::Indexed(Box::new(generator))
    }
}

impl<'a, T, F, E, R> From<CursorGenerator<T, F>> for AnyGenerator<'a, T, E, R>
where
    F: Fn(&T) -> T + 'a,
{
    #[inline]
    fn from(generator: CursorGenerator<T, F>) -> Self {
        Self::Cursor(generator.boxed())
    }
}

impl<T, E, R> From<ThreadedGenerator<T, E, R>> for AnyGenerator<'_, T, E, R> {
    #[inline]
    fn from(generator: ThreadedGenerator<T, E, R>) -> Self {
        Self::Threaded(generator)
    }
}

impl<T, E, R> Generator for AnyGenerator<'_, T, E, R>
where
    T: Clone + PartialEq + Send + 'static,
    E: Send + 'static,
    R: Default + Send + 'static,
{
    type Item = T;
    type Error = E;

    fn index(&self) -> usize {
        match self {
            Self::Indexed(g) => g.index(),
            Self::Cursor(g) => g.index(),
            Self::Threaded(g) => g.index(),
        }
    }

    fn is_end(&mut self) -> Result<bool, Error<E>> {
        match self {
            Self::Indexed(g) => g.is_end().map_err(|e| e.lift()),
            Self::Cursor(g) => g.is_end().map_err(|e| e.lift()),
            Self::Threaded(g) => g.is_end(),
        }
    }

    fn current(&mut self) -> Result<T, Error<E>> {
        match self {
            Self::Indexed(g) => g.current().map_err(|e| e.lift()),
            Self::Cursor(g) => g.current().map_err(|e| e.lift()),
            Self::Threaded(g) => Generator::current(g),
        }
    }

    fn next(&mut self) -> Result<T, Error<E>> {
        match self {
            Self::Indexed(g) => g.next().map_err(|e| e.lift()),
            Self::Cursor(g) => g.next().map_err(|e| e.lift()),
            Self::Threaded(g) => g.next(),
        }
    }

    fn rewind(&mut self) {
        match self {
            Self::Indexed(g) => g.rewind(),
            Self::Cursor(g) => g.rewind(),
            Self::Threaded(g) => g.rewind(),
        }
    }

    fn size(&self) -> Option<usize> {
        match self {
            Self::Indexed(g) => g.size(),
            Self::Cursor(g) => g.size(),
            Self::Threaded(g) => g.size(),
        }
    }

    fn each(&mut self, f: &mut dyn FnMut(T)) -> Result<(), Error<E>> {
        match self {
            Self::Indexed(g) => g.each(f).map_err(|e| e.lift()),
            Self::Cursor(g) => g.each(f).map_err(|e| e.lift()),
            Self::Threaded(g) => g.each(f),
        }
    }
}

impl<T, E, R> fmt::Debug for AnyGenerator<'_, T, E, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed(g) => f
                .debug_struct("Indexed")
                .field("index", &g.index())
                .finish(),
            Self::Cursor(g) => f.debug_tuple("Cursor").field(g).finish(),
            Self::Threaded(g) => f.debug_tuple("Threaded").field(g).finish(),
        }
    }
}
