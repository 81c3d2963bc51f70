#![forbid(unsafe_code)]

//! Wall-clock frame source for interactive hosts.
//!
//! A [`FrameTicker`] owns one background thread that emits a [`FrameTick`]
//! every interval until it is stopped or dropped. The host thread drains the
//! ticks and turns each drained batch into a single
//! [`FrameLoop::tick`](glitch_core::FrameLoop::tick), so a slow host skips
//! frames instead of queueing them.
//!
//! The engine itself stays on the host thread; only timestamps cross the
//! channel.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// One wall-clock frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Zero-based tick counter.
    pub index: u64,
    /// When the tick was emitted.
    pub at: Instant,
}

// ---------------------------------------------------------------------------
// Stop signal
// ---------------------------------------------------------------------------

type StopState = Arc<(Mutex<bool>, Condvar)>;

/// Cooperative stop flag observed by the ticker thread.
#[derive(Clone)]
pub struct StopSignal {
    inner: StopState,
}

impl StopSignal {
    fn new() -> (Self, StopTrigger) {
        let inner: StopState = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `duration` unless stopped first.
    ///
    /// Returns `true` if stopped, `false` if the full duration elapsed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + duration;
        loop {
            if *stopped {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

struct StopTrigger {
    inner: StopState,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------

/// Background thread emitting [`FrameTick`]s at a fixed interval.
pub struct FrameTicker {
    interval: Duration,
    signal: StopSignal,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
    ticks: Receiver<FrameTick>,
}

impl FrameTicker {
    /// Spawn the ticker thread. A zero interval is raised to one millisecond.
    pub fn start(interval: Duration) -> io::Result<Self> {
        let interval = interval.max(Duration::from_millis(1));
        let (signal, trigger) = StopSignal::new();
        let (sender, ticks) = mpsc::channel();
        let thread_signal = signal.clone();

        let thread = thread::Builder::new()
            .name("glitch-frame-ticker".into())
            .spawn(move || {
                let mut index: u64 = 0;
                tracing::debug!(?interval, "frame ticker started");
                loop {
                    if thread_signal.wait_timeout(interval) {
                        break;
                    }
                    let tick = FrameTick {
                        index,
                        at: Instant::now(),
                    };
                    if sender.send(tick).is_err() {
                        break;
                    }
                    index += 1;
                }
                tracing::debug!(sent = index, "frame ticker stopped");
            })?;

        Ok(Self {
            interval,
            signal,
            trigger,
            thread: Some(thread),
            ticks,
        })
    }

    /// Configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether [`stop`](Self::stop) was requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.signal.is_stopped()
    }

    /// Drain every tick received so far and return the latest one.
    ///
    /// Several queued ticks collapse into one, so the caller advances its
    /// frame loop at most once per call.
    pub fn drain_latest(&self) -> Option<FrameTick> {
        self.ticks.try_iter().last()
    }

    /// Block up to `timeout` for the next tick, then collapse any backlog.
    pub fn wait(&self, timeout: Duration) -> Option<FrameTick> {
        match self.ticks.recv_timeout(timeout) {
            Ok(tick) => Some(self.drain_latest().unwrap_or(tick)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

impl std::fmt::Debug for FrameTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTicker")
            .field("interval", &self.interval)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
