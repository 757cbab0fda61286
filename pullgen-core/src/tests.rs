use crate::{Error, Generator, Halt, Indexable, Yielder};
use std::collections::VecDeque;

/// Counts down from `from`, failing instead of producing `fail_at`.
struct Countdown {
    from: u32,
    fail_at: Option<u32>,
    index: usize,
}

impl Countdown {
    fn new(from: u32) -> Self {
        Self {
            from,
            fail_at: None,
            index: 0,
        }
    }

    fn remaining(&self) -> u32 {
        self.from - self.index as u32
    }
}

impl Generator for Countdown {
    type Item = u32;
    type Error = &'static str;

    fn index(&self) -> usize {
        self.index
    }

    fn is_end(&mut self) -> Result<bool, Error<Self::Error>> {
        Ok(self.remaining() == 0)
    }

    fn current(&mut self) -> Result<u32, Error<Self::Error>> {
        match self.remaining() {
            0 => Err(Error::EndOfSequence),
            n if Some(n) == self.fail_at => Err(Error::Producer("boom")),
            n => Ok(n),
        }
    }

    fn next(&mut self) -> Result<u32, Error<Self::Error>> {
        let value = self.current()?;
        self.index += 1;
        Ok(value)
    }

    fn rewind(&mut self) {
        self.index = 0;
    }
}

#[test]
fn test_default_each_rewinds() {
    let mut g = Countdown::new(3);
    assert_eq!(g.next().ok(), Some(3));

    let mut seen = Vec::new();
    g.each(&mut |n| seen.push(n)).unwrap();

    assert_eq!(seen, [3, 2, 1]);
    assert!(g.is_end().unwrap());
    assert_eq!(g.index(), 3);
}

#[test]
fn test_iter_stops_at_end() {
    let mut g = Countdown::new(2);
    let values = g.iter().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(values, [2, 1]);
    assert!(g.next().unwrap_err().is_end_of_sequence());
}

#[test]
fn test_iter_fuses_after_error() {
    let mut g = Countdown {
        fail_at: Some(2),
        ..Countdown::new(3)
    };

    let mut iter = g.iter();
    assert_eq!(iter.next().map(Result::ok), Some(Some(3)));

    match iter.next() {
        Some(Err(Error::Producer(error))) => assert_eq!(error, "boom"),
        _ => panic!("expected producer error"),
    }

    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_has_next_is_inverse_of_is_end() {
    let mut g = Countdown::new(1);
    assert!(g.has_next().unwrap());
    g.next().unwrap();
    assert!(!g.has_next().unwrap());
}

#[test]
fn test_boxed_generator_forwards() {
    let mut g: Box<dyn Generator<Item = u32, Error = &'static str>> = Box::new(Countdown::new(2));

    assert_eq!(g.current().ok(), Some(2));
    assert_eq!(g.next().ok(), Some(2));
    assert_eq!(g.index(), 1);
    g.rewind();
    assert_eq!(g.index(), 0);

    let mut seen = Vec::new();
    g.each(&mut |n| seen.push(n)).unwrap();
    assert_eq!(seen, [2, 1]);
}

#[test]
fn test_borrowed_generator_forwards() {
    let mut g = Countdown::new(2);

    {
        let mut borrowed = &mut g;
        assert_eq!(Generator::next(&mut borrowed).ok(), Some(2));
    }

    assert_eq!(g.index(), 1);
}

#[test]
fn test_lift() {
    let error: Error<std::io::Error> = Error::Misuse("bad").lift();
    assert!(matches!(error, Error::Misuse("bad")));
    assert!(Error::<()>::FeedAlreadySet.into_producer().is_none());
    assert_eq!(Error::Producer(7).into_producer(), Some(7));
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::<std::convert::Infallible>::EndOfSequence.to_string(),
        "iteration reached an end"
    );

    let error = Error::Producer(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
    assert_eq!(error.to_string(), "disk");
}

#[test]
fn test_halt_from_error() {
    fn body() -> Result<(), Halt<std::num::ParseIntError>> {
        "nope".parse::<u32>()?;
        Ok(())
    }

    assert!(matches!(body(), Err(Halt::Error(..))));
}

#[test]
fn test_closure_yielder() {
    let mut seen = Vec::new();

    let mut yielder = |n: u32| -> Result<u32, Halt> {
        seen.push(n);
        Ok(n * 2)
    };

    fn drive(y: &mut dyn Yielder<u32, u32>) -> Result<u32, Halt> {
        let a = y.yield_(1)?;
        let b = y.yield_(2)?;
        Ok(a + b)
    }

    assert_eq!(drive(&mut yielder).ok(), Some(6));
    assert_eq!(seen, [1, 2]);
}

#[test]
fn test_indexable() {
    assert_eq!(Indexable::len(&vec![1, 2, 3]), 3);
    assert_eq!(Indexable::len(&[1u8; 4]), 4);
    assert_eq!(Indexable::len("hello"), 5);
    assert_eq!(Indexable::len(&String::from("hi")), 2);
    assert!(Indexable::is_empty(&VecDeque::<u32>::new()));
    assert!(Indexable::is_empty(&&[0u8; 0][..]));
}
