use crate::{Error, Generator};
use std::iter::FromIterator;

/// A single round out of a [SynchronizedZipper], with one slot for every
/// wrapped generator. Generators which have reached their end contribute
/// `None`.
pub type Round<T> = Vec<Option<T>>;

/// Drives a number of generators in lockstep.
///
/// Every round pulls one value out of each generator. Generators which have
/// reached their end contribute `None`, and iteration is over once a round
/// would consist of nothing but `None`.
///
/// # Examples
///
/// ```rust
/// use pullgen::{IndexedGenerator, SynchronizedZipper};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut zipper = SynchronizedZipper::new(vec![
///     IndexedGenerator::elements(&[1, 2, 3]),
///     IndexedGenerator::elements(&[4]),
/// ]);
///
/// let mut rounds = Vec::new();
/// zipper.each(|round| rounds.push(round))?;
///
/// assert_eq!(rounds, [
///     vec![Some(1), Some(4)],
///     vec![Some(2), None],
///     vec![Some(3), None],
/// ]);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct SynchronizedZipper<G> {
    generators: Vec<G>,
}

impl<G> SynchronizedZipper<G>
where
    G: Generator,
{
    /// Construct a zipper over the given generators.
    ///
    /// The order of the generators is the order of the values in every
    /// round.
    pub fn new(generators: Vec<G>) -> Self {
        Self { generators }
    }

    /// The number of wrapped generators.
    ///
    /// Note that this is *not* the number of rounds.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Test if the zipper wraps no generators at all.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Access the generator at `index`.
    pub fn get(&self, index: usize) -> Option<&G> {
        self.generators.get(index)
    }

    /// Access the generator at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut G> {
        self.generators.get_mut(index)
    }

    /// Unwrap the zipper into the generators it wraps.
    pub fn into_inner(self) -> Vec<G> {
        self.generators
    }

    /// Test if the zipper has reached an end.
    ///
    /// Without an index this tests if *any* wrapped generator has reached its
    /// end. With an index it tests only the generator at that position.
    ///
    /// # Errors
    ///
    /// Errors with [Error::Misuse] if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Error, IndexedGenerator, SynchronizedZipper};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut zipper = SynchronizedZipper::new(vec![
    ///     IndexedGenerator::elements(&[1, 2]),
    ///     IndexedGenerator::elements(&[]),
    /// ]);
    ///
    /// assert!(zipper.is_end(None)?);
    /// assert!(!zipper.is_end(Some(0))?);
    /// assert!(zipper.is_end(Some(1))?);
    /// assert!(matches!(zipper.is_end(Some(2)), Err(Error::Misuse(..))));
    /// # Ok(()) }
    /// ```
    pub fn is_end(&mut self, index: Option<usize>) -> Result<bool, Error<G::Error>> {
        let index = match index {
            Some(index) => index,
            None => {
                for generator in &mut self.generators {
                    if generator.is_end()? {
                        return Ok(true);
                    }
                }

                return Ok(false);
            }
        };

        match self.generators.get_mut(index) {
            Some(generator) => generator.is_end(),
            None => Err(Error::Misuse("generator index out of bounds")),
        }
    }

    /// Pull the next round out of the wrapped generators.
    ///
    /// Returns `None` once every generator has reached its end. Unlike
    /// [each][SynchronizedZipper::each] this doesn't rewind anything.
    pub fn next_round(&mut self) -> Result<Option<Round<G::Item>>, Error<G::Error>> {
        let mut round = Vec::with_capacity(self.generators.len());
        let mut exhausted = true;

        for generator in &mut self.generators {
            if generator.is_end()? {
                round.push(None);
            } else {
                round.push(Some(generator.next()?));
                exhausted = false;
            }
        }

        if exhausted {
            return Ok(None);
        }

        Ok(Some(round))
    }

    /// Rewind every wrapped generator, then feed every round to `f`.
    pub fn each<F>(&mut self, mut f: F) -> Result<(), Error<G::Error>>
    where
        F: FnMut(Round<G::Item>),
    {
        self.rewind();

        while let Some(round) = self.next_round()? {
            f(round);
        }

        Ok(())
    }

    /// Rewind every wrapped generator.
    pub fn rewind(&mut self) {
        for generator in &mut self.generators {
            generator.rewind();
        }
    }
}

impl<G> FromIterator<G> for SynchronizedZipper<G>
where
    G: Generator,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = G>,
    {
        Self::new(iter.into_iter().collect())
    }
}
