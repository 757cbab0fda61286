use crate::{Error, Generator};
use std::iter::FusedIterator;

/// An iterator which consumes values out of a [Generator].
///
/// Yields `Ok` values until the generator reaches its end. A producer failure
/// is yielded once as an `Err`, after which the iterator is exhausted.
///
/// See [Generator::iter].
pub struct Iter<'a, G> {
    generator: &'a mut G,
    done: bool,
}

impl<'a, G> Iter<'a, G> {
    pub(crate) fn new(generator: &'a mut G) -> Self {
        Self {
            generator,
            done: false,
        }
    }
}

impl<G> Iterator for Iter<'_, G>
where
    G: Generator,
{
    type Item = Result<G::Item, Error<G::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.generator.next() {
            Ok(value) => Some(Ok(value)),
            Err(Error::EndOfSequence) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

impl<G> FusedIterator for Iter<'_, G> where G: Generator {}
