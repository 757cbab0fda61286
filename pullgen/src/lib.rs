//! Pull-based generators over indexed sources, successions, and push-style
//! code.
//!
//! A [Generator] is a stateful iterator which can be asked whether it has
//! reached its end, peeked at, and [rewound][Generator::rewind] to where it
//! started. This crate provides three ways of building one:
//!
//! * [IndexedGenerator] - over a finite random-access source, like a slice.
//! * [CursorGenerator] - over a succession of values from a start value to
//!   an end value.
//! * [ThreadedGenerator] - over code which *pushes* its values, either a
//!   generator body handed a [Yielder] or an existing source implementing
//!   [Traverse].
//!
//! The last one is the interesting one. The push-style code runs on a
//! background worker and values are handed over to the consumer one at a
//! time, so the producer never runs more than a single value ahead of the
//! consumer.
//!
//! ```rust
//! use pullgen::{Generator, ThreadedGenerator, Yielder};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut g = ThreadedGenerator::new(|y: &mut dyn Yielder<u32>| {
//!     y.yield_(1)?;
//!     y.yield_(2)?;
//!     Ok(())
//! });
//!
//! assert!(g.has_next()?);
//! assert_eq!(g.next()?, 1);
//! assert_eq!(g.current()?, 2);
//! assert_eq!(g.next()?, 2);
//! assert!(g.is_end()?);
//! assert!(g.next().unwrap_err().is_end_of_sequence());
//! # Ok(()) }
//! ```
//!
//! Generators built out of different strategies can be mixed through
//! [AnyGenerator], and driven in lockstep with a [SynchronizedZipper].
//!
//! ```rust
//! use pullgen::{AnyGenerator, SynchronizedZipper};
//!
//! # fn main() -> anyhow::Result<()> {
//! let letters = ['a', 'b', 'c'];
//!
//! let mut zipper = SynchronizedZipper::<AnyGenerator<'_, char>>::new(vec![
//!     AnyGenerator::indexed(&letters, |s: &[char; 3], i| s[i]),
//!     AnyGenerator::cursor('x', 'y', |c: &char| (*c as u8 + 1) as char),
//! ]);
//!
//! assert_eq!(zipper.next_round()?, Some(vec![Some('a'), Some('x')]));
//! assert_eq!(zipper.next_round()?, Some(vec![Some('b'), Some('y')]));
//! assert!(zipper.is_end(None)?);
//! assert_eq!(zipper.next_round()?, Some(vec![Some('c'), None]));
//! assert_eq!(zipper.next_round()?, None);
//! # Ok(()) }
//! ```
//!
//! # Logging
//!
//! Workers are logged through [tracing]. Spawning and retiring a worker is
//! logged at the `debug` level, and a worker which goes away without
//! finishing its producer is logged as a warning.

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]
#![allow(clippy::should_implement_trait)]


pub use pullgen_core::*;

/// The builder used to configure the workers of a [ThreadedGenerator].
pub use handoff::Builder;

mod any;
pub use self::any::{AnyGenerator, Kind};

mod cursor;
pub use self::cursor::{CursorGenerator, Successor};

mod indexed;
pub use self::indexed::IndexedGenerator;

mod threaded;
pub use self::threaded::ThreadedGenerator;

mod zipper;
pub use self::zipper::{Round, SynchronizedZipper};
