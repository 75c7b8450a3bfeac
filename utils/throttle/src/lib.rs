//! Lossy call throttling.
//!
//! A throttle forwards at most one call per fixed interval and *drops* the
//! rest — calls arriving inside the window are lost, not queued or delayed.
//! This is the right shape for "repaint on a noisy event stream" handlers
//! where only call frequency matters, not call count.
//!
//! The gates take `now: Instant` from the caller rather than reading a clock
//! internally, so behavior is deterministic in tests.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// A single-owner throttle gate.
///
/// The first call always passes; after an admission, further calls are
/// rejected until at least `interval` has elapsed. A call at exactly the
/// window boundary is admitted.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    next_allowed_at: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_allowed_at: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns whether a call arriving at `now` may proceed, advancing the
    /// window on admission. Rejected calls leave the window untouched.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(next_allowed_at) = self.next_allowed_at
            && now < next_allowed_at
        {
            return false;
        }
        self.next_allowed_at = Some(now + self.interval);
        true
    }
}

/// A callback wrapped behind a [`Throttle`].
///
/// [`Throttled::call`] has the same calling convention as the callback: the
/// argument is forwarded unchanged when the gate admits, and dropped when it
/// does not. The callback runs synchronously inside `call`.
pub struct Throttled<A, F: FnMut(A)> {
    gate: Throttle,
    callback: F,
    _arg: PhantomData<fn(A)>,
}

impl<A, F: FnMut(A)> Throttled<A, F> {
    pub fn new(interval: Duration, callback: F) -> Self {
        Self {
            gate: Throttle::new(interval),
            callback,
            _arg: PhantomData,
        }
    }

    /// Forward `arg` to the callback iff the window has elapsed.
    pub fn call(&mut self, arg: A) {
        self.call_at(Instant::now(), arg);
    }

    /// As [`Throttled::call`], with an injected timestamp for tests.
    pub fn call_at(&mut self, now: Instant, arg: A) {
        if self.gate.admit(now) {
            (self.callback)(arg);
        }
    }
}

/// A cloneable throttle gate safe to share across threads.
///
/// Admission races are resolved with a compare-exchange on the deadline: of
/// several callers observing an open window, exactly one advances the
/// deadline and is told to proceed; the rest are rejected.
#[derive(Clone, Debug)]
pub struct SharedThrottle {
    inner: Arc<SharedThrottleState>,
}

#[derive(Debug)]
struct SharedThrottleState {
    epoch: Instant,
    interval_nanos: u64,
    /// Nanoseconds since `epoch` before which no call may pass.
    next_allowed_nanos: AtomicU64,
}

impl SharedThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(SharedThrottleState {
                epoch: Instant::now(),
                interval_nanos: u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX),
                next_allowed_nanos: AtomicU64::new(0),
            }),
        }
    }

    /// Lock-free equivalent of [`Throttle::admit`]. `now` must not precede
    /// the instant this gate was constructed.
    pub fn admit(&self, now: Instant) -> bool {
        let now_nanos =
            u64::try_from(now.saturating_duration_since(self.inner.epoch).as_nanos())
                .unwrap_or(u64::MAX);
        let mut next_allowed = self.inner.next_allowed_nanos.load(Ordering::Acquire);
        loop {
            if now_nanos < next_allowed {
                return false;
            }
            match self.inner.next_allowed_nanos.compare_exchange(
                next_allowed,
                now_nanos.saturating_add(self.inner.interval_nanos),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => next_allowed = observed,
            }
        }
    }
}
