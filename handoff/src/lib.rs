//! A background worker thread which hands values over one at a time.
//!
//! This was primarily written for use in [pullgen] as a way to turn code
//! which *pushes* values through a callback into something a consumer can
//! *pull* values out of, but is otherwise a general purpose library that can
//! be used by anyone.
//!
//! A [Relay] owns a single background thread and two single-slot channels
//! between it and the consumer: one carrying values out of the worker, and
//! one carrying values back in. Each slot holds at most one value, so the
//! worker can never run more than a single value ahead of the consumer.
//!
//! ```rust
//! # fn main() -> anyhow::Result<()> {
//! let relay = handoff::spawn(|port: handoff::Port<u32, u32>| {
//!     let mut n = 0;
//!
//!     while port.send(n).is_ok() {
//!         match port.recv() {
//!             Ok(step) => n += step,
//!             Err(..) => break,
//!         }
//!     }
//! })?;
//!
//! assert_eq!(relay.recv()?, 0);
//! relay.send(10)?;
//! assert_eq!(relay.recv()?, 10);
//!
//! relay.join()?;
//! # Ok(()) }
//! ```
//!
//! # Shutting down
//!
//! Closing a relay wakes up a worker blocked in either [Port::send] or
//! [Port::recv] with a [Closed] error, which it is expected to propagate out
//! of whatever it's doing. Dropping a [Relay] closes it and joins the
//! background thread, so a worker which never returns to the relay after
//! it's been closed will block the drop.
//!
//! [pullgen]: https://docs.rs/pullgen

#![deny(missing_docs)]

use std::io;
use thiserror::Error;


mod loom;
use self::loom::sync::Arc;
use self::loom::thread;

mod worker;
pub use self::worker::Port;
use self::worker::{Prelude, Shared};

/// Error raised when we try to interact with a relay whose other side has
/// gone away.
#[derive(Debug, Error)]
#[error("relay closed")]
pub struct Closed(());

/// Error raised when we try to join a background thread that has panicked.
#[derive(Debug, Error)]
#[error("background thread panicked")]
pub struct Panicked(());

/// Spawn a worker with the default configuration.
///
/// These both do the same thing:
///
/// ```rust
/// # fn main() -> anyhow::Result<()> {
/// let relay1 = handoff::spawn(|port: handoff::Port<u32, ()>| drop(port.send(1)))?;
/// let relay2 = handoff::Builder::new().spawn(|port: handoff::Port<u32, ()>| drop(port.send(1)))?;
/// # Ok(()) }
/// ```
pub fn spawn<O, I, F>(task: F) -> io::Result<Relay<O, I>>
where
    F: FnOnce(Port<O, I>) + Send + 'static,
    O: Send + 'static,
    I: Send + 'static,
{
    Builder::new().spawn(task)
}

/// The consumer end of a background worker.
///
/// # Examples
///
/// ```rust
/// # fn main() -> anyhow::Result<()> {
/// let relay = handoff::spawn(|port: handoff::Port<&'static str, ()>| {
///     let _ = port.send("hello");
///     let _ = port.send("world");
/// })?;
///
/// assert_eq!(relay.recv()?, "hello");
/// assert_eq!(relay.recv()?, "world");
/// assert!(relay.recv().is_err());
///
/// relay.join()?;
/// # Ok(()) }
/// ```
#[must_use = "The relay should be joined with Relay::join once no longer used, \
    otherwise it will block while being dropped."]
pub struct Relay<O, I> {
    shared: Arc<Shared<O, I>>,
    /// The handle associated with the background thread.
    handle: Option<thread::JoinHandle<()>>,
}

impl<O, I> Relay<O, I> {
    /// Receive the next value handed over by the worker.
    ///
    /// Blocks until the worker sends something. Errors with [Closed] once the
    /// worker has exited without leaving a value behind, or if the relay has
    /// been closed.
    pub fn recv(&self) -> Result<O, Closed> {
        let value = self.shared.take_out();
        tracing::trace!(ok = value.is_ok(), "consumer took value");
        value
    }

    /// Send a value back to the worker.
    ///
    /// Blocks while a previously sent value has not yet been received.
    pub fn send(&self, value: I) -> Result<(), Closed> {
        self.shared.put_back(value)
    }

    /// Close the relay.
    ///
    /// A worker blocked on either slot is woken up and sees [Closed] from then
    /// on. Values still in transit are dropped. Closing is idempotent.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Test if the worker has let go of its port, after which no more values
    /// will be handed over beyond the one that might still be in transit.
    pub fn is_detached(&self) -> bool {
        self.handle.is_none() || self.shared.is_detached()
    }

    /// Close the relay and join the background thread.
    ///
    /// This is the clean way to shut down a worker, the alternative is to let
    /// [Relay] drop and this will be performed in the drop handler instead.
    pub fn join(mut self) -> Result<(), Panicked> {
        self.inner_join()
    }

    /// Close the relay and join the background thread, handing back the
    /// payload it panicked with if it did.
    ///
    /// This includes panics raised by the [prelude][Builder::prelude], so the
    /// caller can resume them with [std::panic::resume_unwind].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # fn main() -> anyhow::Result<()> {
    /// let relay = handoff::Builder::new()
    ///     .prelude(|| panic!("prelude failed"))
    ///     .spawn(|port: handoff::Port<u32, ()>| drop(port.send(1)))?;
    ///
    /// assert!(relay.recv().is_err());
    ///
    /// let payload = relay.try_join().unwrap_err();
    /// assert_eq!(payload.downcast_ref::<&str>(), Some(&"prelude failed"));
    /// # Ok(()) }
    /// ```
    pub fn try_join(mut self) -> std::thread::Result<()> {
        self.join_handle()
    }

    fn inner_join(&mut self) -> Result<(), Panicked> {
        self.join_handle().map_err(|_| Panicked(()))
    }

    fn join_handle(&mut self) -> std::thread::Result<()> {
        if let Some(handle) = self.handle.take() {
            self.shared.close();
            tracing::debug!("joining worker");
            return handle.join();
        }

        Ok(())
    }
}

impl<O, I> Drop for Relay<O, I> {
    fn drop(&mut self) {
        // Note: this only errors in case the background thread has panicked,
        // at which point it's no longer using the shared state.
        if let Err(e) = self.inner_join() {
            tracing::error!("failed to join worker: {}", e);
        }
    }
}

/// The builder for a [Relay] which can be configured a bit more.
///
/// A builder can be reused to spawn any number of identically configured
/// workers.
#[derive(Clone, Default)]
pub struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
    prelude: Option<std::sync::Arc<Prelude>>,
}

impl Builder {
    /// Construct a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the background thread. Defaults to `handoff-worker`.
    pub fn name<N>(self, name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    /// Set the stack size of the background thread in bytes.
    pub fn stack_size(self, stack_size: usize) -> Self {
        Self {
            stack_size: Some(stack_size),
            ..self
        }
    }

    /// Configure a prelude to the worker. This is code that will run just as
    /// the thread is spinning up, before the task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// fn say_hello(main_thread: std::thread::ThreadId) {
    ///     println!("Hello from the prelude!");
    ///     assert_ne!(main_thread, std::thread::current().id());
    /// }
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let main_thread = std::thread::current().id();
    ///
    /// let relay = handoff::Builder::new()
    ///     .prelude(move || say_hello(main_thread))
    ///     .spawn(|port: handoff::Port<(), ()>| drop(port))?;
    ///
    /// relay.join()?;
    /// # Ok(()) }
    /// ```
    pub fn prelude<P>(self, prelude: P) -> Self
    where
        P: Fn() + Send + Sync + 'static,
    {
        Self {
            prelude: Some(std::sync::Arc::new(prelude)),
            ..self
        }
    }

    /// Test if a name has been configured with [name][Builder::name].
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// The name the background thread will be given.
    pub fn thread_name(&self) -> &str {
        self.name.as_deref().unwrap_or("handoff-worker")
    }

    /// Spawn the background thread running `task`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # fn main() -> anyhow::Result<()> {
    /// let relay = handoff::Builder::new()
    ///     .name("counter")
    ///     .spawn(|port: handoff::Port<String, ()>| {
    ///         let name = std::thread::current().name().map(String::from);
    ///         let _ = port.send(name.unwrap_or_default());
    ///     })?;
    ///
    /// assert_eq!(relay.recv()?, "counter");
    /// relay.join()?;
    /// # Ok(()) }
    /// ```
    pub fn spawn<O, I, F>(&self, task: F) -> io::Result<Relay<O, I>>
    where
        F: FnOnce(Port<O, I>) + Send + 'static,
        O: Send + 'static,
        I: Send + 'static,
    {
        let shared = Arc::new(Shared::new());

        let port = Port {
            shared: shared.clone(),
        };

        let prelude = self.prelude.clone();
        tracing::debug!(thread = self.thread_name(), "spawning worker");

        let handle = self.spawn_thread(move || worker::run(prelude, task, port))?;

        Ok(Relay {
            shared,
            handle: Some(handle),
        })
    }

    #[cfg(not(loom))]
    fn spawn_thread<F>(&self, f: F) -> io::Result<thread::JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut builder = thread::Builder::new().name(String::from(self.thread_name()));

        if let Some(stack_size) = self.stack_size {
            builder = builder.stack_size(stack_size);
        }

        builder.spawn(f)
    }

    #[cfg(loom)]
    fn spawn_thread<F>(&self, f: F) -> io::Result<thread::JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        Ok(thread::spawn(f))
    }
}
