use crate::{Error, Generator, Halt, Traverse, Yielder};
use handoff::{Builder, Relay};
use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::panic;
use std::sync::Arc;

mod worker;
use self::worker::{Message, Producer};

/// The name given to worker threads unless configured otherwise.
const DEFAULT_THREAD_NAME: &str = "pullgen-worker";

/// What the consumer knows about the position it's sitting on.
enum State<T, E> {
    /// Nothing has been fetched for the current position.
    Pending,
    /// A value has been fetched but not consumed.
    Fetched(T),
    /// The producer failed, and the failure has not yet been observed.
    Failed(E),
    /// The sequence is over.
    Ended,
}

/// A generator which adapts push-style code into a pull-based one.
///
/// The producer runs on a background worker which is spawned the first time
/// a value is asked for. Every time the producer yields a value it's handed
/// over to the consumer and the worker is suspended until the consumer asks
/// for the next one, so at most one value is ever in flight and nothing is
/// computed ahead of time.
///
/// `T` is the type of values produced, `E` the error type of the producer
/// and `R` the type of values [fed][ThreadedGenerator::feed] back into it.
///
/// # Examples
///
/// ```rust
/// use pullgen::{Generator, Halt, ThreadedGenerator, Yielder};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut g = ThreadedGenerator::new(|y: &mut dyn Yielder<u32>| {
///     for n in 1.. {
///         if n > 3 {
///             return Err(Halt::Stop);
///         }
///
///         y.yield_(n)?;
///     }
///
///     Ok(())
/// });
///
/// assert_eq!(g.next()?, 1);
/// assert_eq!(g.next()?, 2);
/// assert_eq!(g.next()?, 3);
/// assert!(g.is_end()?);
///
/// g.rewind();
/// assert_eq!(g.next()?, 1);
/// # Ok(()) }
/// ```
///
/// # Cleaning up
///
/// A generator which is abandoned before reaching its end has a worker
/// suspended in the middle of the producer. [close][ThreadedGenerator::close]
/// retires it explicitly, and dropping the generator does the same. Either
/// way the producer sees [Halt::Closed] out of its current yield and is
/// expected to propagate it, and the worker is joined once it has.
pub struct ThreadedGenerator<T, E = Infallible, R = ()> {
    producer: Producer<T, R, E>,
    builder: Builder,
    relay: Option<Relay<Message<T, E>, R>>,
    state: State<T, E>,
    feed: Option<R>,
    /// The worker is waiting on a feed value before it continues.
    suspended: bool,
    index: usize,
    size: Option<usize>,
}

impl<T, E, R> ThreadedGenerator<T, E, R>
where
    T: Send + 'static,
    E: Send + 'static,
    R: Default + Send + 'static,
{
    /// Construct a generator out of a body which pushes values into the
    /// [Yielder] it's handed.
    ///
    /// The body is called anew every time the generator is rewound.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&mut dyn Yielder<T, R, E>) -> Result<(), Halt<E>> + Send + Sync + 'static,
    {
        Self::with_producer(Producer::Body(Arc::new(body)))
    }

    fn with_producer(producer: Producer<T, R, E>) -> Self {
        Self {
            producer,
            builder: Builder::new().name(DEFAULT_THREAD_NAME),
            relay: None,
            state: State::Pending,
            feed: None,
            suspended: false,
            index: 0,
            size: None,
        }
    }

    /// Configure how workers are spawned.
    ///
    /// The builder is kept around and used for every worker spawned by this
    /// generator, including the ones spawned after a rewind. Workers are
    /// still named `pullgen-worker` unless the builder names them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Builder, Generator, ThreadedGenerator, Yielder};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut g = ThreadedGenerator::new(|y: &mut dyn Yielder<String>| {
    ///     let name = std::thread::current().name().map(String::from);
    ///     y.yield_(name.unwrap_or_default())?;
    ///     Ok(())
    /// })
    /// .with_builder(Builder::new().name("numbers"));
    ///
    /// assert_eq!(g.next()?, "numbers");
    /// # Ok(()) }
    /// ```
    pub fn with_builder(mut self, builder: Builder) -> Self {
        self.builder = if builder.has_name() {
            builder
        } else {
            builder.name(DEFAULT_THREAD_NAME)
        };

        self
    }

    /// Stage a value to be handed back to the producer.
    ///
    /// The value is returned out of the yield which produced the value most
    /// recently fetched, once the producer is resumed by the next pull.
    /// Yields which resume without a staged value see `R::default()`.
    ///
    /// Note that [is_end][ThreadedGenerator::is_end] and
    /// [peek][ThreadedGenerator::peek] also pull, so the value needs to be
    /// staged before they're called.
    ///
    /// # Errors
    ///
    /// Errors with [Error::FeedAlreadySet] if a value is already staged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Generator, ThreadedGenerator, Yielder};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut g = ThreadedGenerator::new(|y: &mut dyn Yielder<u32, u32>| {
    ///     let a = y.yield_(1)?;
    ///     let b = y.yield_(2)?;
    ///     y.yield_(a + b)?;
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(g.next()?, 1);
    /// g.feed(10)?;
    /// assert_eq!(g.next()?, 2);
    /// assert_eq!(g.next()?, 10);
    /// # Ok(()) }
    /// ```
    pub fn feed(&mut self, value: R) -> Result<(), Error<E>> {
        if self.feed.is_some() {
            return Err(Error::FeedAlreadySet);
        }

        self.feed = Some(value);
        Ok(())
    }

    /// Test if the generator has reached its end.
    ///
    /// This spawns the worker if needed and waits for it to either produce a
    /// value or finish.
    pub fn is_end(&mut self) -> Result<bool, Error<E>> {
        self.fetch()?;
        Ok(matches!(self.state, State::Ended))
    }

    /// Access the next value without consuming it.
    ///
    /// A pending producer failure is surfaced here the same way as it is by
    /// [next][ThreadedGenerator::next], exactly once.
    pub fn peek(&mut self) -> Result<&T, Error<E>> {
        self.fetch()?;

        if let Some(error) = self.take_failure() {
            return Err(Error::Producer(error));
        }

        match &self.state {
            State::Fetched(value) => Ok(value),
            _ => Err(Error::EndOfSequence),
        }
    }

    /// Consume the next value.
    ///
    /// If the producer failed, its error is returned by the first call after
    /// the last value it yielded. The generator is at its end after that.
    pub fn next(&mut self) -> Result<T, Error<E>> {
        self.fetch()?;

        match mem::replace(&mut self.state, State::Pending) {
            State::Fetched(value) => {
                self.index += 1;
                Ok(value)
            }
            State::Failed(error) => {
                self.state = State::Ended;
                Err(Error::Producer(error))
            }
            State::Ended | State::Pending => {
                self.state = State::Ended;
                Err(Error::EndOfSequence)
            }
        }
    }

    /// Retire the current worker and return to the start of the sequence.
    ///
    /// A generator built from a [Traverse] source has its
    /// [rewind][Traverse::rewind] hook called. The producer itself is only
    /// restarted once the next value is asked for.
    pub fn rewind(&mut self) {
        self.retire();
        self.state = State::Pending;
        self.feed = None;
        self.index = 0;

        if let Producer::Source(source) = &self.producer {
            source.rewind();
        }
    }

    /// Feed every value the producer yields to `f`.
    ///
    /// This calls the producer directly on the current thread, bypassing the
    /// worker entirely. The position of the generator is left untouched.
    pub fn each(&mut self, f: &mut dyn FnMut(T)) -> Result<(), Error<E>> {
        let outcome = self.producer.run(&mut |value: T| -> Result<R, Halt<E>> {
            f(value);
            Ok(R::default())
        });

        match outcome {
            Ok(()) | Err(Halt::Stop) | Err(Halt::Closed) => Ok(()),
            Err(Halt::Error(error)) => Err(Error::Producer(error)),
        }
    }

    fn spawn(&self) -> Result<Relay<Message<T, E>, R>, Error<E>> {
        let producer = self.producer.clone();

        self.builder
            .spawn(move |port| worker::run(producer, port))
            .map_err(Error::Spawn)
    }

    /// Make sure the state reflects the value at the current position,
    /// receiving it from the worker if necessary.
    fn fetch(&mut self) -> Result<(), Error<E>> {
        if !matches!(self.state, State::Pending) {
            return Ok(());
        }

        let relay = match self.relay.take() {
            Some(relay) => relay,
            None => {
                let relay = self.spawn()?;
                self.suspended = false;
                relay
            }
        };

        let received = exchange(&relay, &mut self.feed, &mut self.suspended);
        self.relay = Some(relay);

        match received {
            Ok(Message::Value(value)) => {
                self.suspended = true;
                self.state = State::Fetched(value);
            }
            Ok(Message::Done) => {
                self.retire();
                self.state = State::Ended;
            }
            Ok(Message::Failed(error)) => {
                self.retire();
                self.state = State::Failed(error);
            }
            Ok(Message::Panicked(payload)) => {
                self.retire();
                self.state = State::Ended;
                panic::resume_unwind(payload);
            }
            Err(..) => {
                self.suspended = false;
                self.state = State::Ended;

                // A worker which panicked outside of the producer, like in its
                // prelude, never gets to send a message.
                if let Some(relay) = self.relay.take() {
                    if let Err(payload) = relay.try_join() {
                        panic::resume_unwind(payload);
                    }
                }

                tracing::warn!(
                    thread = self.builder.thread_name(),
                    "worker exited without finishing"
                );
            }
        }

        Ok(())
    }

    /// Take a failure which hasn't been observed yet, leaving the generator
    /// at its end.
    fn take_failure(&mut self) -> Option<E> {
        match mem::replace(&mut self.state, State::Ended) {
            State::Failed(error) => Some(error),
            state => {
                self.state = state;
                None
            }
        }
    }
}

impl<T, E> ThreadedGenerator<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Construct a generator which pulls values out of an existing push-style
    /// source.
    ///
    /// A source has no way of receiving fed values, so the generator is fixed
    /// to `R = ()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use pullgen::{Generator, ThreadedGenerator, Traverse};
    ///
    /// struct Evens(u32);
    ///
    /// impl Traverse<u32> for Evens {
    ///     type Error = std::convert::Infallible;
    ///
    ///     fn traverse(&self, visit: &mut dyn FnMut(u32) -> ControlFlow<()>) -> Result<(), Self::Error> {
    ///         for n in (0..self.0).step_by(2) {
    ///             if visit(n).is_break() {
    ///                 break;
    ///             }
    ///         }
    ///
    ///         Ok(())
    ///     }
    /// }
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let mut g = ThreadedGenerator::from_traverse(Evens(5));
    /// assert_eq!(g.next()?, 0);
    /// assert_eq!(g.next()?, 2);
    /// assert_eq!(g.next()?, 4);
    /// assert!(g.is_end()?);
    /// # Ok(()) }
    /// ```
    pub fn from_traverse<S>(source: S) -> Self
    where
        S: Traverse<T, Error = E> + Send + Sync + 'static,
    {
        Self::with_producer(Producer::Source(Arc::new(source)))
    }
}

impl<T, E, R> ThreadedGenerator<T, E, R> {
    /// The number of values consumed since construction or the last rewind.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Declare how many values a full pass of the producer yields.
    ///
    /// The producer can't be asked without running it, so this is only what
    /// [size][ThreadedGenerator::size] reports and isn't checked against what
    /// the producer actually does.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullgen::{Generator, ThreadedGenerator, Yielder};
    ///
    /// let g = ThreadedGenerator::new(|y: &mut dyn Yielder<u32>| {
    ///     y.yield_(1)?;
    ///     y.yield_(2)?;
    ///     Ok(())
    /// })
    /// .with_size(2);
    ///
    /// assert_eq!(g.size(), Some(2));
    /// ```
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// The declared number of values in a full pass, if any.
    #[inline]
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Test if a worker is currently live.
    ///
    /// Workers are spawned on demand and retired as soon as the producer
    /// finishes, so this is only true while the producer is suspended in the
    /// middle of the sequence.
    pub fn is_running(&self) -> bool {
        self.relay
            .as_ref()
            .map_or(false, |relay| !relay.is_detached())
    }

    /// Retire the worker and put the generator at its end.
    ///
    /// Closing is idempotent, and the generator stays at its end until it's
    /// [rewound][ThreadedGenerator::rewind].
    pub fn close(&mut self) {
        self.retire();
        self.state = State::Ended;
        self.feed = None;
    }

    fn retire(&mut self) {
        self.suspended = false;

        if let Some(relay) = self.relay.take() {
            match relay.join() {
                Ok(()) => tracing::debug!(thread = self.builder.thread_name(), "retired worker"),
                Err(error) => tracing::error!("failed to retire worker: {}", error),
            }
        }
    }
}

/// Resume a suspended worker and receive whatever it produces next.
fn exchange<T, E, R>(
    relay: &Relay<Message<T, E>, R>,
    feed: &mut Option<R>,
    suspended: &mut bool,
) -> Result<Message<T, E>, handoff::Closed>
where
    R: Default,
{
    if mem::take(suspended) {
        relay.send(feed.take().unwrap_or_default())?;
    }

    relay.recv()
}

impl<T, E, R> Drop for ThreadedGenerator<T, E, R> {
    fn drop(&mut self) {
        self.retire();
    }
}

impl<T, E, R> Generator for ThreadedGenerator<T, E, R>
where
    T: Clone + Send + 'static,
    E: Send + 'static,
    R: Default + Send + 'static,
{
    type Item = T;
    type Error = E;

    #[inline]
    fn index(&self) -> usize {
        ThreadedGenerator::index(self)
    }

    #[inline]
    fn is_end(&mut self) -> Result<bool, Error<E>> {
        ThreadedGenerator::is_end(self)
    }

    #[inline]
    fn current(&mut self) -> Result<T, Error<E>> {
        self.peek().map(T::clone)
    }

    #[inline]
    fn next(&mut self) -> Result<T, Error<E>> {
        ThreadedGenerator::next(self)
    }

    #[inline]
    fn rewind(&mut self) {
        ThreadedGenerator::rewind(self)
    }

    #[inline]
    fn size(&self) -> Option<usize> {
        ThreadedGenerator::size(self)
    }

    #[inline]
    fn each(&mut self, f: &mut dyn FnMut(T)) -> Result<(), Error<E>> {
        ThreadedGenerator::each(self, f)
    }
}

impl<T, E, R> fmt::Debug for ThreadedGenerator<T, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Pending => "pending",
            State::Fetched(..) => "fetched",
            State::Failed(..) => "failed",
            State::Ended => "ended",
        };

        f.debug_struct("ThreadedGenerator")
            .field("index", &self.index)
            .field("size", &self.size)
            .field("state", &state)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
