use std::convert::Infallible;
use std::io;
use thiserror::Error;

/// Errors raised while pulling values out of a [Generator][crate::Generator].
///
/// `E` is the error type of the producer feeding the generator. Generators
/// which can't fail on their own use [Infallible].
#[derive(Debug, Error)]
pub enum Error<E = Infallible> {
    /// The generator has no more values.
    ///
    /// This is the expected way for a sequence to end, callers who want to
    /// avoid it should check [Generator::is_end][crate::Generator::is_end]
    /// first.
    #[error("iteration reached an end")]
    EndOfSequence,
    /// The producer failed. The error is exactly the one the producer raised.
    #[error(transparent)]
    Producer(E),
    /// A feed value has already been staged for the next step.
    #[error("feed value already set")]
    FeedAlreadySet,
    /// The generator was constructed or used in a way that doesn't make sense.
    #[error("misuse: {0}")]
    Misuse(&'static str),
    /// The background worker driving a generator could not be spawned.
    #[error("failed to spawn generator worker")]
    Spawn(#[source] io::Error),
}

impl<E> Error<E> {
    /// Test if this is the end of the sequence rather than an actual failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Error, Generator, IndexedGenerator};
    ///
    /// let mut g = IndexedGenerator::elements(&[1]);
    /// assert_eq!(g.next().ok(), Some(1));
    /// assert!(g.next().unwrap_err().is_end_of_sequence());
    /// ```
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Self::EndOfSequence)
    }

    /// Access the producer error, if this is one.
    pub fn into_producer(self) -> Option<E> {
        match self {
            Self::Producer(error) => Some(error),
            _ => None,
        }
    }
}

impl Error<Infallible> {
    /// Widen an error from a generator that can't fail on its own into one
    /// with an arbitrary producer error type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::Error;
    ///
    /// let error: Error<std::io::Error> = Error::EndOfSequence.lift();
    /// assert!(error.is_end_of_sequence());
    /// ```
    pub fn lift<E>(self) -> Error<E> {
        match self {
            Self::EndOfSequence => Error::EndOfSequence,
            Self::Producer(never) => match never {},
            Self::FeedAlreadySet => Error::FeedAlreadySet,
            Self::Misuse(message) => Error::Misuse(message),
            Self::Spawn(error) => Error::Spawn(error),
        }
    }
}
