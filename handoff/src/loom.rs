#[cfg(loom)]
pub(crate) use loom::sync;
#[cfg(loom)]
pub(crate) use loom::thread;

#[cfg(not(loom))]
pub(crate) use ::std::sync;
#[cfg(not(loom))]
pub(crate) use ::std::thread;

use std::sync::PoisonError;

/// Lock the given mutex, ignoring poisoning.
///
/// The state protected by the relay is always left consistent before any
/// user code runs, so a poisoned lock carries no broken invariants.
pub(crate) fn lock<T>(mutex: &sync::Mutex<T>) -> sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wait on the condition variable, ignoring poisoning.
pub(crate) fn wait<'a, T>(
    condvar: &sync::Condvar,
    guard: sync::MutexGuard<'a, T>,
) -> sync::MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}
