#![forbid(unsafe_code)]

//! The scramble engine: one active plan, one pending frame, one completion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::completion::{Completion, Resolver};
use super::plan::{ScrambleConfig, TransitionPlan};
use super::scheduler::{FrameRequest, FrameScheduler};
use super::target::{SharedText, TextTarget};

/// Lifecycle of the most recent plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPhase {
    /// Built, first advance not yet run.
    Created,
    /// At least one frame rendered, not all slots settled.
    Advancing,
    /// Every slot settled; the completion has resolved.
    Complete,
}

/// Result of handing a delivered frame to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The request was not this engine's pending frame.
    Ignored,
    /// One frame rendered; another frame was requested.
    Advanced,
    /// The frame settled every slot and resolved the completion.
    Completed,
}

struct EngineState<T> {
    plan: Option<TransitionPlan>,
    phase: Option<PlanPhase>,
    frame: u32,
    target: Option<T>,
    original_text: String,
    pending_completion: Option<Resolver>,
    pending_frame: Option<FrameRequest>,
    plans_started: u64,
}

impl<T> Default for EngineState<T> {
    fn default() -> Self {
        Self {
            plan: None,
            phase: None,
            frame: 0,
            target: None,
            original_text: String::new(),
            pending_completion: None,
            pending_frame: None,
            plans_started: 0,
        }
    }
}

/// Morphs a [`TextTarget`]'s text through randomized glyphs.
///
/// Owns one engine state per animated element. The scheduler is injected so
/// the host controls when frames happen; the random source is injected so
/// schedules can be reproduced.
pub struct ScrambleEngine<S: FrameScheduler, T: TextTarget = SharedText, R: Rng = StdRng> {
    scheduler: S,
    rng: R,
    config: ScrambleConfig,
    state: EngineState<T>,
}

impl<S: FrameScheduler, T: TextTarget> ScrambleEngine<S, T, StdRng> {
    /// Create an engine with default tunables and an entropy-seeded RNG.
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self::with_rng(scheduler, StdRng::from_entropy())
    }

    /// Create an engine whose schedules are reproducible from `seed`.
    #[must_use]
    pub fn seeded(scheduler: S, seed: u64) -> Self {
        Self::with_rng(scheduler, StdRng::seed_from_u64(seed))
    }
}

impl<S: FrameScheduler, T: TextTarget, R: Rng> ScrambleEngine<S, T, R> {
    /// Create an engine drawing from `rng`.
    #[must_use]
    pub fn with_rng(scheduler: S, rng: R) -> Self {
        Self {
            scheduler,
            rng,
            config: ScrambleConfig::default(),
            state: EngineState::default(),
        }
    }

    /// Replace the tunables (builder). Applies to plans started afterwards.
    #[must_use]
    pub fn with_config(mut self, config: ScrambleConfig) -> Self {
        self.config = config;
        self
    }

    /// Start morphing `target` towards `new_text`.
    ///
    /// Reads the target's current text (mid-scramble glyphs included) as the
    /// old text and remembers it for [`reset_to_original`](Self::reset_to_original).
    /// Any in-flight plan is superseded: its pending frame is cancelled and
    /// its completion never resolves. The first frame renders before this
    /// returns.
    pub fn set_text(&mut self, target: T, new_text: &str) -> Completion {
        let old_text = target.current_text();

        self.cancel_pending_frame();
        if self.state.pending_completion.take().is_some() {
            crate::debug!(
                plan = self.state.plans_started,
                frame = self.state.frame,
                "scramble plan superseded"
            );
        }

        let plan = TransitionPlan::build(&old_text, new_text, &self.config, &mut self.rng);
        let (resolver, completion) = Completion::channel();

        crate::debug!(
            slots = plan.len(),
            completion_frame = plan.completion_frame(),
            "scramble plan created"
        );

        self.state.original_text = old_text;
        self.state.plan = Some(plan);
        self.state.phase = Some(PlanPhase::Created);
        self.state.frame = 0;
        self.state.target = Some(target);
        self.state.pending_completion = Some(resolver);
        self.state.plans_started += 1;

        self.advance();
        completion
    }

    /// Handle a frame delivered by the scheduler.
    ///
    /// Only the engine's single pending request advances the plan; stale or
    /// foreign requests are ignored.
    pub fn on_frame(&mut self, request: FrameRequest) -> FrameOutcome {
        if self.state.pending_frame != Some(request) {
            return FrameOutcome::Ignored;
        }
        self.state.pending_frame = None;
        self.advance()
    }

    /// Write the text recorded by the most recent `set_text` back to
    /// `target`, as plain text.
    ///
    /// No-op when `set_text` was never called or the recorded text is empty.
    /// Leaves any pending frame and completion untouched.
    pub fn reset_to_original(&mut self, target: &mut T) {
        if self.state.original_text.is_empty() {
            return;
        }
        crate::trace!(text = %self.state.original_text, "reset to original text");
        target.write_plain(&self.state.original_text);
    }

    /// Stop the in-flight plan, if any. Its completion never resolves.
    pub fn cancel(&mut self) {
        self.cancel_pending_frame();
        if self.state.plan.take().is_some() {
            crate::debug!(frame = self.state.frame, "scramble plan cancelled");
            self.state.phase = None;
        }
        self.state.pending_completion = None;
    }

    /// Cancel scheduling and restore the bound target's original text.
    pub fn teardown(&mut self) {
        self.cancel();
        if self.state.original_text.is_empty() {
            return;
        }
        if let Some(target) = self.state.target.as_mut() {
            target.write_plain(&self.state.original_text);
        }
    }

    /// Phase of the most recent plan; `None` before the first plan and after
    /// a cancel.
    #[must_use]
    pub fn phase(&self) -> Option<PlanPhase> {
        self.state.phase
    }

    /// Frame counter of the current plan.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.state.frame
    }

    /// The active plan, if one is advancing.
    #[must_use]
    pub fn plan(&self) -> Option<&TransitionPlan> {
        self.state.plan.as_ref()
    }

    /// Whether a plan is still advancing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.plan.is_some()
    }

    /// Text in effect before the most recent plan started.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.state.original_text
    }

    /// The single outstanding frame request.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.state.pending_frame
    }

    /// Number of plans started over the engine's lifetime.
    #[must_use]
    pub fn plans_started(&self) -> u64 {
        self.state.plans_started
    }

    /// The element the engine last wrote to.
    #[must_use]
    pub fn target(&self) -> Option<&T> {
        self.state.target.as_ref()
    }

    /// Current tunables.
    #[must_use]
    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(request) = self.state.pending_frame.take() {
            self.scheduler.cancel_frame(request);
        }
    }

    fn advance(&mut self) -> FrameOutcome {
        let Some(plan) = self.state.plan.as_mut() else {
            return FrameOutcome::Ignored;
        };
        let frame_index = self.state.frame;
        let rendered = plan.render(frame_index, &self.config, &mut self.rng);
        let settled = plan.settled_count(frame_index);
        let total = plan.len();
        self.state.phase = Some(PlanPhase::Advancing);

        if let Some(target) = self.state.target.as_mut() {
            target.write_frame(&rendered);
        }

        crate::trace!(
            frame = frame_index,
            settled,
            total,
            decorative = rendered.decorative_count(),
            "scramble advance"
        );

        if settled == total {
            self.state.plan = None;
            self.state.phase = Some(PlanPhase::Complete);
            if let Some(resolver) = self.state.pending_completion.take() {
                resolver.resolve();
            }
            crate::debug!(frames = frame_index + 1, "scramble plan complete");
            return FrameOutcome::Completed;
        }

        self.state.frame = frame_index + 1;
        self.state.pending_frame = Some(self.scheduler.request_frame());
        FrameOutcome::Advanced
    }
}

impl<S: FrameScheduler, T: TextTarget, R: Rng> Drop for ScrambleEngine<S, T, R> {
    fn drop(&mut self) {
        self.cancel_pending_frame();
    }
}

impl<S: FrameScheduler, T: TextTarget, R: Rng> std::fmt::Debug for ScrambleEngine<S, T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrambleEngine")
            .field("phase", &self.state.phase)
            .field("frame", &self.state.frame)
            .field("slots", &self.state.plan.as_ref().map(TransitionPlan::len))
            .field("pending_frame", &self.state.pending_frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::{CompletionStatus, FrameLoop};

    type TestEngine = ScrambleEngine<FrameLoop, SharedText, StdRng>;

    fn engine(frames: &FrameLoop) -> TestEngine {
        ScrambleEngine::seeded(frames.clone(), 42)
    }

    /// Tick until the engine goes idle; returns the number of ticks.
    fn run(frames: &FrameLoop, engine: &mut TestEngine) -> usize {
        let mut ticks = 0;
        while engine.is_animating() {
            for request in frames.tick() {
                engine.on_frame(request);
            }
            ticks += 1;
            assert!(ticks < 1_000, "plan never settled");
        }
        ticks
    }

    #[test]
    fn empty_to_hi_settles_on_hi() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("");

        let mut done = engine.set_text(el.clone(), "HI");
        let plan = engine.plan().expect("plan active after set_text");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.slots()[0].from(), None);
        assert_eq!(plan.slots()[0].to(), Some("H"));
        assert_eq!(plan.slots()[1].to(), Some("I"));

        run(&frames, &mut engine);
        assert_eq!(el.text(), "HI");
        assert!(el.is_plain());
        assert_eq!(done.status(), CompletionStatus::Complete);
        assert_eq!(engine.phase(), Some(PlanPhase::Complete));
    }

    #[test]
    fn first_frame_renders_synchronously() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("OLD");
        let _done = engine.set_text(el.clone(), "NEW");
        assert_eq!(el.writes(), 1);
        assert_eq!(el.with_frame(|f| f.len()), 3);
    }

    #[test]
    fn supersession_drops_first_completion() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("");

        let mut first = engine.set_text(el.clone(), "AB");
        let mut second = engine.set_text(el.clone(), "XY");
        assert_eq!(first.status(), CompletionStatus::Superseded);

        run(&frames, &mut engine);
        assert_eq!(el.text(), "XY");
        assert!(second.is_complete());
        assert_eq!(first.status(), CompletionStatus::Superseded);
    }

    #[test]
    fn supersession_keeps_single_pending_frame() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames).with_config(ScrambleConfig::default().reveal_window(5));
        let el = SharedText::new("ABCDEFGH");
        let _a = engine.set_text(el.clone(), "12345678");
        let _b = engine.set_text(el.clone(), "ZYXWVUTS");
        assert!(frames.pending() <= 1);
    }

    #[test]
    fn supersession_reads_on_screen_text() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("ENTER YOUR EMAIL");
        let _first = engine.set_text(el.clone(), "ACCESS REQUIRED");
        for request in frames.tick() {
            engine.on_frame(request);
        }
        let on_screen = el.text();
        let _second = engine.set_text(el.clone(), "JOIN");
        assert_eq!(engine.original_text(), on_screen);
    }

    #[test]
    fn stale_request_is_ignored() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames).with_config(ScrambleConfig::default().reveal_window(10));
        let el = SharedText::new("abc");
        let _a = engine.set_text(el.clone(), "xyz");
        let stale = engine.pending_frame().expect("frame requested");
        let _b = engine.set_text(el.clone(), "uvw");
        assert_eq!(engine.on_frame(stale), FrameOutcome::Ignored);
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn empty_to_empty_completes_immediately() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("");
        let mut done = engine.set_text(el.clone(), "");
        assert!(done.is_complete());
        assert!(!engine.is_animating());
        assert!(frames.is_idle());
    }

    #[test]
    fn unit_windows_settle_on_first_frame() {
        let frames = FrameLoop::new();
        let cfg = ScrambleConfig::default().reveal_window(1).settle_window(1);
        let mut engine = engine(&frames).with_config(cfg);
        let el = SharedText::new("a");
        let _done = engine.set_text(el.clone(), "b");
        // reveal 0, settle 0: done in the synchronous first frame.
        assert!(!engine.is_animating());
        assert_eq!(el.text(), "b");
    }

    #[test]
    fn completion_frame_bounds_tick_count() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("ENTER YOUR EMAIL");
        let _done = engine.set_text(el.clone(), "IDENTITY VERIFY");
        let expected = engine.plan().map(TransitionPlan::completion_frame).unwrap_or(0);
        let ticks = run(&frames, &mut engine);
        assert_eq!(ticks as u32, expected);
    }

    #[test]
    fn reset_without_set_text_is_noop() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let mut el = SharedText::new("UNCHANGED");
        engine.reset_to_original(&mut el);
        assert_eq!(el.text(), "UNCHANGED");
        assert_eq!(el.writes(), 0);
    }

    #[test]
    fn reset_restores_pre_transition_text() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let mut el = SharedText::new("ENTER YOUR EMAIL");
        let _done = engine.set_text(el.clone(), "ACCESS REQUIRED");
        run(&frames, &mut engine);
        engine.reset_to_original(&mut el);
        assert_eq!(el.text(), "ENTER YOUR EMAIL");
        assert!(el.is_plain());
    }

    #[test]
    fn reset_mid_plan_keeps_pending_frame() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let mut el = SharedText::new("ENTER YOUR EMAIL");
        let mut done = engine.set_text(el.clone(), "ACCESS REQUIRED");
        let pending = engine.pending_frame();
        assert!(pending.is_some());

        engine.reset_to_original(&mut el);
        assert_eq!(el.text(), "ENTER YOUR EMAIL");
        assert_eq!(engine.pending_frame(), pending);
        assert!(engine.is_animating());

        run(&frames, &mut engine);
        assert!(done.is_complete());
        assert_eq!(el.text(), "ACCESS REQUIRED");
    }

    #[test]
    fn reset_with_empty_original_is_noop() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let mut el = SharedText::new("");
        let _done = engine.set_text(el.clone(), "HI");
        run(&frames, &mut engine);
        engine.reset_to_original(&mut el);
        assert_eq!(el.text(), "HI");
    }

    #[test]
    fn cancel_stops_scheduling() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames).with_config(ScrambleConfig::default().reveal_window(10));
        let el = SharedText::new("abcdef");
        let mut done = engine.set_text(el.clone(), "uvwxyz");
        engine.cancel();
        assert!(frames.is_idle());
        assert!(!engine.is_animating());
        assert_eq!(engine.phase(), None);
        assert_eq!(done.status(), CompletionStatus::Superseded);
    }

    #[test]
    fn teardown_restores_plain_original() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("ENTER YOUR EMAIL");
        let _done = engine.set_text(el.clone(), "JOIN THE NETWORK");
        engine.teardown();
        assert_eq!(el.text(), "ENTER YOUR EMAIL");
        assert!(el.is_plain());
        assert!(frames.is_idle());
    }

    #[test]
    fn dropping_engine_cancels_pending_frame() {
        let frames = FrameLoop::new();
        {
            let mut engine = engine(&frames).with_config(ScrambleConfig::default().reveal_window(10));
            let _done = engine.set_text(SharedText::new("abc"), "xyz");
        }
        assert!(frames.is_idle());
    }

    #[test]
    fn two_engines_share_one_loop() {
        let frames = FrameLoop::new();
        let mut a = engine(&frames);
        let mut b: TestEngine = ScrambleEngine::seeded(frames.clone(), 7);
        let el_a = SharedText::new("one");
        let el_b = SharedText::new("two");
        let mut done_a = a.set_text(el_a.clone(), "ONE");
        let mut done_b = b.set_text(el_b.clone(), "TWO");

        let mut guard = 0;
        while a.is_animating() || b.is_animating() {
            for request in frames.tick() {
                let hits = [a.on_frame(request), b.on_frame(request)]
                    .iter()
                    .filter(|o| **o != FrameOutcome::Ignored)
                    .count();
                assert_eq!(hits, 1, "each request belongs to exactly one engine");
            }
            guard += 1;
            assert!(guard < 1_000);
        }
        assert!(done_a.is_complete() && done_b.is_complete());
        assert_eq!(el_a.text(), "ONE");
        assert_eq!(el_b.text(), "TWO");
    }

    #[test]
    fn plans_started_counts_every_set_text() {
        let frames = FrameLoop::new();
        let mut engine = engine(&frames);
        let el = SharedText::new("");
        let _a = engine.set_text(el.clone(), "a");
        let _b = engine.set_text(el.clone(), "b");
        assert_eq!(engine.plans_started(), 2);
    }
}
