use std::collections::VecDeque;

/// A finite source which can be accessed by index.
///
/// Only the length is part of the trait. How a value is fetched at a given
/// index is up to the indexer function handed to the generator alongside the
/// source.
pub trait Indexable {
    /// The number of addressable positions.
    fn len(&self) -> usize;

    /// Test if there are no addressable positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> Indexable for &S
where
    S: ?Sized + Indexable,
{
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }
}

impl<T> Indexable for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T, const N: usize> Indexable for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }
}

impl<T> Indexable for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> Indexable for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl Indexable for str {
    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }
}

impl Indexable for String {
    #[inline]
    fn len(&self) -> usize {
        String::len(self)
    }
}
