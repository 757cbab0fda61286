//! The core generator traits.
//!
//! A [Generator] is a stateful, pull-based iterator. Unlike [Iterator] it can
//! be asked whether it has reached its end without consuming anything, peeked
//! at through [Generator::current], and [rewound][Generator::rewind] back to
//! where it started.
//!
//! This crate only provides the contracts. Implementations live in the
//! [pullgen] crate, which also re-exports everything in here.
//!
//! * [Generator] - the consumer side contract.
//! * [Yielder] and [Halt] - what a push-style generator body is handed, and
//!   how it stops early.
//! * [Traverse] - an existing source with its own push-style iteration.
//! * [Indexable] - a finite random-access source.
//!
//! [pullgen]: https://docs.rs/pullgen

#![deny(missing_docs, rustdoc::broken_intra_doc_links)]
#![allow(clippy::should_implement_trait)]

#[cfg(test)]
mod tests;

mod error;
pub use self::error::Error;

mod generator;
pub use self::generator::Generator;

mod indexable;
pub use self::indexable::Indexable;

mod iter;
pub use self::iter::Iter;

mod producer;
pub use self::producer::{Halt, Traverse, Yielder};
