use crate::loom::sync::{Arc, Condvar, Mutex};
use crate::loom::{lock, wait};
use crate::Closed;

/// The type of the prelude function.
pub(super) type Prelude = dyn Fn() + Send + Sync + 'static;

// Shared state between the worker thread and [Relay][crate::Relay].
pub(super) struct Shared<O, I> {
    state: Mutex<State<O, I>>,
    condvar: Condvar,
}

struct State<O, I> {
    /// Value travelling from the worker to the consumer.
    out: Option<O>,
    /// Value travelling from the consumer back to the worker.
    back: Option<I>,
    /// The consumer has closed the relay.
    closed: bool,
    /// The worker has let go of its port.
    detached: bool,
}

impl<O, I> Shared<O, I> {
    /// Construct new shared state.
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                out: None,
                back: None,
                closed: false,
                detached: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Place a value in the outgoing slot, waiting for it to be vacated
    /// first.
    pub(super) fn put_out(&self, value: O) -> Result<(), Closed> {
        let mut state = lock(&self.state);

        while state.out.is_some() && !state.closed {
            state = wait(&self.condvar, state);
        }

        if state.closed {
            return Err(Closed(()));
        }

        state.out = Some(value);
        self.condvar.notify_all();
        Ok(())
    }

    /// Take the value in the outgoing slot, waiting until one is available.
    ///
    /// Errors once the slot is empty and the worker can no longer fill it.
    pub(super) fn take_out(&self) -> Result<O, Closed> {
        let mut state = lock(&self.state);

        loop {
            if let Some(value) = state.out.take() {
                self.condvar.notify_all();
                return Ok(value);
            }

            if state.closed || state.detached {
                return Err(Closed(()));
            }

            state = wait(&self.condvar, state);
        }
    }

    /// Place a value in the return slot, waiting for it to be vacated first.
    pub(super) fn put_back(&self, value: I) -> Result<(), Closed> {
        let mut state = lock(&self.state);

        while state.back.is_some() && !state.closed && !state.detached {
            state = wait(&self.condvar, state);
        }

        if state.closed || state.detached {
            return Err(Closed(()));
        }

        state.back = Some(value);
        self.condvar.notify_all();
        Ok(())
    }

    /// Take the value in the return slot, waiting until one is available.
    pub(super) fn take_back(&self) -> Result<I, Closed> {
        let mut state = lock(&self.state);

        loop {
            if let Some(value) = state.back.take() {
                self.condvar.notify_all();
                return Ok(value);
            }

            if state.closed {
                return Err(Closed(()));
            }

            state = wait(&self.condvar, state);
        }
    }

    /// Close the relay, waking up anyone blocked on it.
    ///
    /// Any value left in either slot is dropped here rather than with the
    /// last reference to the shared state.
    pub(super) fn close(&self) {
        let (out, back) = {
            let mut state = lock(&self.state);
            state.closed = true;
            self.condvar.notify_all();
            (state.out.take(), state.back.take())
        };

        drop(out);
        drop(back);
    }

    /// Mark the worker as detached, waking up the consumer.
    pub(super) fn detach(&self) {
        let mut state = lock(&self.state);
        state.detached = true;
        self.condvar.notify_all();
    }

    /// Test if the worker has let go of its port.
    pub(super) fn is_detached(&self) -> bool {
        lock(&self.state).detached
    }

    /// Test if the relay has been closed by the consumer.
    pub(super) fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }
}

/// The worker end of a relay.
///
/// Dropping the port tells the consumer that no more values will arrive, so
/// a consumer blocked waiting for a value wakes up with [Closed] instead of
/// waiting forever.
pub struct Port<O, I> {
    pub(super) shared: Arc<Shared<O, I>>,
}

impl<O, I> Port<O, I> {
    /// Hand a value over to the consumer.
    ///
    /// Blocks while the previously sent value has not yet been taken. Errors
    /// if the consumer has closed the relay.
    pub fn send(&self, value: O) -> Result<(), Closed> {
        tracing::trace!("worker handing over value");
        self.shared.put_out(value)
    }

    /// Receive a value sent back by the consumer.
    ///
    /// Blocks until the consumer sends one. Errors if the consumer has closed
    /// the relay.
    pub fn recv(&self) -> Result<I, Closed> {
        self.shared.take_back()
    }

    /// Test if the consumer has closed the relay.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }
}

impl<O, I> Drop for Port<O, I> {
    fn drop(&mut self) {
        self.shared.detach();
    }
}

/// Worker thread.
pub(super) fn run<O, I, F>(prelude: Option<std::sync::Arc<Prelude>>, task: F, port: Port<O, I>)
where
    F: FnOnce(Port<O, I>),
{
    // NB: if the prelude panics the port is dropped during unwinding, which
    // detaches the worker and releases the consumer.
    if let Some(prelude) = prelude {
        prelude();
    }

    task(port);
}
