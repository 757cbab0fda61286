use crate::{Error, Generator};
use std::convert::Infallible;
use std::fmt;
use std::mem;

/// A boxed successor function.
pub type Successor<'a, T> = Box<dyn Fn(&T) -> T + 'a>;

/// Where a [CursorGenerator] currently is.
///
/// Reaching the end value and having yielded it are two different states:
/// the cursor sits on `end` while it's still to be yielded, and only moves
/// to `Ended` once it has been.
#[derive(Debug)]
enum Cursor<T> {
    Active(T),
    Ended,
}

/// A generator over a succession of values, from a start value to an end
/// value through repeated application of a successor function.
///
/// The end value has to be reachable from the start value. If it isn't, the
/// generator never ends.
///
/// # Examples
///
/// ```rust
/// use pullgen::{CursorGenerator, Generator};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut g = CursorGenerator::new('a', 'c', |c: &char| (*c as u8 + 1) as char);
///
/// assert_eq!(g.next()?, 'a');
/// assert_eq!(g.next()?, 'b');
/// assert_eq!(g.next()?, 'c');
/// assert!(g.is_end()?);
/// # Ok(()) }
/// ```
pub struct CursorGenerator<T, F> {
    start: T,
    end: T,
    successor: F,
    exclusive: bool,
    cursor: Cursor<T>,
    index: usize,
}

impl<T, F> CursorGenerator<T, F>
where
    T: Clone + PartialEq,
    F: Fn(&T) -> T,
{
    /// Construct a generator which yields every value from `start` up to and
    /// including `end`.
    ///
    /// If `start == end` exactly one value is yielded.
    pub fn new(start: T, end: T, successor: F) -> Self {
        Self::with_bounds(start, end, successor, false)
    }

    /// Construct a generator which yields every value from `start` up to but
    /// excluding `end`.
    ///
    /// If `start == end` nothing is yielded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{CursorGenerator, Generator};
    ///
    /// let mut g = CursorGenerator::exclusive(0, 3, |n: &u32| n + 1);
    /// let values = g.iter().collect::<Result<Vec<_>, _>>().unwrap();
    /// assert_eq!(values, [0, 1, 2]);
    ///
    /// let mut g = CursorGenerator::exclusive(3, 3, |n: &u32| n + 1);
    /// assert!(g.is_end().unwrap());
    /// ```
    pub fn exclusive(start: T, end: T, successor: F) -> Self {
        Self::with_bounds(start, end, successor, true)
    }

    fn with_bounds(start: T, end: T, successor: F, exclusive: bool) -> Self {
        let cursor = initial(&start, &end, exclusive);

        Self {
            start,
            end,
            successor,
            exclusive,
            cursor,
            index: 0,
        }
    }

    /// The value the generator starts at.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// The value the generator ends at.
    pub fn end(&self) -> &T {
        &self.end
    }

    /// Test if the end value is excluded from the sequence.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Compute where the cursor goes after `value` has been yielded.
    fn advance(&self, value: &T) -> Cursor<T> {
        if !self.exclusive && *value == self.end {
            return Cursor::Ended;
        }

        let next = (self.successor)(value);

        if self.exclusive && next == self.end {
            return Cursor::Ended;
        }

        Cursor::Active(next)
    }
}

impl<T, F> CursorGenerator<T, F> {
    /// Erase the type of the successor function, keeping the position.
    pub(crate) fn boxed<'a>(self) -> CursorGenerator<T, Successor<'a, T>>
    where
        F: Fn(&T) -> T + 'a,
    {
        CursorGenerator {
            start: self.start,
            end: self.end,
            successor: Box::new(self.successor),
            exclusive: self.exclusive,
            cursor: self.cursor,
            index: self.index,
        }
    }
}

fn initial<T>(start: &T, end: &T, exclusive: bool) -> Cursor<T>
where
    T: Clone + PartialEq,
{
    if exclusive && start == end {
        Cursor::Ended
    } else {
        Cursor::Active(start.clone())
    }
}

impl<T, F> Generator for CursorGenerator<T, F>
where
    T: Clone + PartialEq,
    F: Fn(&T) -> T,
{
    type Item = T;
    type Error = Infallible;

    #[inline]
    fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn is_end(&mut self) -> Result<bool, Error> {
        Ok(matches!(self.cursor, Cursor::Ended))
    }

    fn current(&mut self) -> Result<T, Error> {
        match &self.cursor {
            Cursor::Active(value) => Ok(value.clone()),
            Cursor::Ended => Err(Error::EndOfSequence),
        }
    }

    fn next(&mut self) -> Result<T, Error> {
        let value = match mem::replace(&mut self.cursor, Cursor::Ended) {
            Cursor::Active(value) => value,
            Cursor::Ended => return Err(Error::EndOfSequence),
        };

        self.cursor = self.advance(&value);
        self.index += 1;
        Ok(value)
    }

    fn rewind(&mut self) {
        self.cursor = initial(&self.start, &self.end, self.exclusive);
        self.index = 0;
    }

    /// Make a fresh pass from the start value, leaving the position of the
    /// generator untouched.
    fn each(&mut self, f: &mut dyn FnMut(T)) -> Result<(), Error> {
        let mut cursor = initial(&self.start, &self.end, self.exclusive);

        while let Cursor::Active(value) = cursor {
            cursor = self.advance(&value);
            f(value);
        }

        Ok(())
    }
}

impl<T, F> fmt::Debug for CursorGenerator<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorGenerator")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("exclusive", &self.exclusive)
            .field("cursor", &self.cursor)
            .field("index", &self.index)
            .finish()
    }
}
