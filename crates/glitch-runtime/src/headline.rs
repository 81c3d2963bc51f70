#![forbid(unsafe_code)]

//! Headline cycling.
//!
//! On a fixed interval the heading scrambles to a random alternate line.
//! Once that transition settles, a revert timer fires after a short delay
//! and scrambles the heading back to its original text. Stopping the cycler
//! cancels any animation and writes back the text the heading showed before
//! its most recent transition. After a revert that is the alternate line, not
//! the original heading.
//!
//! Time is supplied by the host as a [`Duration`] since an arbitrary epoch,
//! the same way a deterministic clock is driven in tests.

use std::time::Duration;

use glitch_core::scramble::{
    Completion, CompletionStatus, FrameOutcome, FrameRequest, FrameScheduler, ScrambleEngine,
    SharedText,
};
use rand::Rng;
use rand::rngs::StdRng;

/// Heading shown before any cycling.
pub const DEFAULT_HEADING: &str = "ENTER YOUR EMAIL";

/// Lines the heading cycles through.
pub const DEFAULT_ALTERNATES: [&str; 5] = [
    "CONNECT TO SYSTEM",
    "ACCESS REQUIRED",
    "IDENTITY VERIFY",
    "JOIN THE NETWORK",
    "ENTER YOUR EMAIL",
];

/// Default period between cycles.
pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_millis(8000);

/// Default pause between a settled cycle and the revert.
pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(2000);

/// Heading cycling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineConfig {
    /// Text the heading starts with and reverts to.
    pub heading: String,
    /// Pool of alternate lines. An empty pool disables cycling.
    pub alternates: Vec<String>,
    /// Period between cycles.
    pub cycle_interval: Duration,
    /// Pause after a cycle settles before reverting.
    pub revert_delay: Duration,
}

impl Default for HeadlineConfig {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            alternates: DEFAULT_ALTERNATES.iter().map(|s| (*s).to_string()).collect(),
            cycle_interval: DEFAULT_CYCLE_INTERVAL,
            revert_delay: DEFAULT_REVERT_DELAY,
        }
    }
}

/// Something the cycler did during a [`HeadlineCycler::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlineEvent {
    /// Started scrambling towards an alternate line.
    Cycled(String),
    /// The alternate line finished settling; a revert is scheduled.
    Settled,
    /// Started scrambling back to the original heading.
    Reverted,
}

/// Drives one heading element through cycle and revert transitions.
pub struct HeadlineCycler<S: FrameScheduler, E: Rng = StdRng, R: Rng = StdRng> {
    engine: ScrambleEngine<S, SharedText, E>,
    heading: SharedText,
    config: HeadlineConfig,
    picker: R,
    active: bool,
    next_cycle_at: Duration,
    cycle: Option<Completion>,
    revert_at: Option<Duration>,
    cycles: u64,
}

impl<S: FrameScheduler, E: Rng, R: Rng> HeadlineCycler<S, E, R> {
    /// Create an inactive cycler. The heading element shows
    /// `config.heading` until [`start`](Self::start) is called.
    pub fn new(engine: ScrambleEngine<S, SharedText, E>, picker: R, config: HeadlineConfig) -> Self {
        let heading = SharedText::new(&config.heading);
        Self {
            engine,
            heading,
            config,
            picker,
            active: false,
            next_cycle_at: Duration::ZERO,
            cycle: None,
            revert_at: None,
            cycles: 0,
        }
    }

    /// Arm the cycle timer relative to `now`.
    pub fn start(&mut self, now: Duration) {
        self.active = true;
        self.next_cycle_at = now + self.config.cycle_interval;
        tracing::debug!(next = ?self.next_cycle_at, "headline cycling started");
    }

    /// Fire whatever timers are due at `now`.
    ///
    /// Order within one call: a settled cycle schedules its revert, a due
    /// revert starts, then a due cycle starts. A cycle started in the same
    /// call as a revert supersedes it.
    pub fn tick(&mut self, now: Duration) -> Vec<HeadlineEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }

        if let Some(done) = self.cycle.as_mut() {
            match done.status() {
                CompletionStatus::Complete => {
                    self.cycle = None;
                    self.revert_at = Some(now + self.config.revert_delay);
                    events.push(HeadlineEvent::Settled);
                }
                CompletionStatus::Superseded => self.cycle = None,
                CompletionStatus::Pending => {}
            }
        }

        if let Some(at) = self.revert_at
            && now >= at
        {
            self.revert_at = None;
            let _ = self
                .engine
                .set_text(self.heading.clone(), &self.config.heading);
            tracing::debug!(heading = %self.config.heading, "headline reverting");
            events.push(HeadlineEvent::Reverted);
        }

        if now >= self.next_cycle_at {
            while self.next_cycle_at <= now {
                self.next_cycle_at += self.config.cycle_interval.max(Duration::from_millis(1));
            }
            if let Some(line) = self.pick_alternate() {
                self.cycle = Some(self.engine.set_text(self.heading.clone(), &line));
                self.cycles += 1;
                tracing::debug!(%line, cycles = self.cycles, "headline cycling");
                events.push(HeadlineEvent::Cycled(line));
            }
        }

        events
    }

    /// Hand a delivered frame request to the engine.
    pub fn on_frame(&mut self, request: FrameRequest) -> FrameOutcome {
        self.engine.on_frame(request)
    }

    /// Stop cycling and cancel any animation.
    ///
    /// The heading is left showing the engine's
    /// [`original_text`](ScrambleEngine::original_text): the text before the
    /// most recent transition. Once a revert has started, that is the
    /// alternate line it scrambled away from.
    pub fn stop(&mut self) {
        if !self.active && !self.engine.is_animating() {
            return;
        }
        self.active = false;
        self.cycle = None;
        self.revert_at = None;
        self.engine.teardown();
        tracing::debug!(heading = %self.heading.text(), "headline cycling stopped");
    }

    /// Heading element; clone it to draw.
    #[must_use]
    pub fn heading(&self) -> &SharedText {
        &self.heading
    }

    /// Whether timers are armed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    /// When the next cycle fires.
    #[must_use]
    pub fn next_cycle_at(&self) -> Duration {
        self.next_cycle_at
    }

    /// When the pending revert fires, if one is scheduled.
    #[must_use]
    pub fn revert_at(&self) -> Option<Duration> {
        self.revert_at
    }

    /// Number of cycles started.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &HeadlineConfig {
        &self.config
    }

    /// Underlying engine.
    #[must_use]
    pub fn engine(&self) -> &ScrambleEngine<S, SharedText, E> {
        &self.engine
    }

    fn pick_alternate(&mut self) -> Option<String> {
        let pool = &self.config.alternates;
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.picker.gen_range(0..pool.len())].clone())
    }
}

impl<S: FrameScheduler, E: Rng, R: Rng> std::fmt::Debug for HeadlineCycler<S, E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlineCycler")
            .field("heading", &self.heading.text())
            .field("active", &self.active)
            .field("next_cycle_at", &self.next_cycle_at)
            .field("revert_at", &self.revert_at)
            .field("cycles", &self.cycles)
            .finish()
    }
}
