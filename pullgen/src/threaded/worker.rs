use crate::{Halt, Traverse, Yielder};
use handoff::Port;
use std::any::Any;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// The type of a generator body.
pub(super) type Body<T, R, E> =
    dyn Fn(&mut dyn Yielder<T, R, E>) -> Result<(), Halt<E>> + Send + Sync + 'static;

/// The type of a wrapped push-style source.
pub(super) type Source<T, E> = dyn Traverse<T, Error = E> + Send + Sync + 'static;

/// A message handed from the worker to the consumer.
pub(super) enum Message<T, E> {
    /// A value yielded by the producer.
    Value(T),
    /// The producer ran to completion, or stopped.
    Done,
    /// The producer failed.
    Failed(E),
    /// The producer panicked with the given payload.
    Panicked(Box<dyn Any + Send + 'static>),
}

/// The push-style logic a threaded generator adapts.
pub(super) enum Producer<T, R, E> {
    Body(Arc<Body<T, R, E>>),
    Source(Arc<Source<T, E>>),
}

impl<T, R, E> Clone for Producer<T, R, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Body(body) => Self::Body(body.clone()),
            Self::Source(source) => Self::Source(source.clone()),
        }
    }
}

impl<T, R, E> Producer<T, R, E> {
    /// Run the producer to completion, pushing every value into `yielder`.
    pub(super) fn run(&self, yielder: &mut dyn Yielder<T, R, E>) -> Result<(), Halt<E>> {
        match self {
            Self::Body(body) => body(yielder),
            Self::Source(source) => {
                let mut halt = None;

                let result = source.traverse(&mut |value| match yielder.yield_(value) {
                    Ok(..) => ControlFlow::Continue(()),
                    Err(h) => {
                        halt = Some(h);
                        ControlFlow::Break(())
                    }
                });

                if let Some(halt) = halt {
                    return Err(halt);
                }

                result.map_err(Halt::Error)
            }
        }
    }
}

/// Worker thread.
///
/// Each yield hands the value over and then waits for the consumer to ask for
/// the next one, which is when the staged feed value arrives.
pub(super) fn run<T, R, E>(producer: Producer<T, R, E>, port: Port<Message<T, E>, R>) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        producer.run(&mut |value: T| -> Result<R, Halt<E>> {
            if port.send(Message::Value(value)).is_err() {
                return Err(Halt::Closed);
            }

            port.recv().map_err(|_| Halt::Closed)
        })
    }));

    let message = match outcome {
        Ok(Ok(())) | Ok(Err(Halt::Stop)) => Message::Done,
        Ok(Err(Halt::Error(error))) => Message::Failed(error),
        Ok(Err(Halt::Closed)) => {
            tracing::trace!("producer interrupted");
            return;
        }
        Err(payload) => Message::Panicked(payload),
    };

    if port.send(message).is_err() {
        tracing::trace!("consumer gone before the final message");
    }
}
