//! Property-based invariant tests for the scramble engine.
//!
//! 1. Slot count is `max(len(old), len(new))` in graphemes.
//! 2. `settle_frame >= reveal_frame` for every slot.
//! 3. Settled slots keep showing their target character.
//! 4. Every frame has one unit per slot.
//! 5. A plan run to exhaustion completes exactly once and ends on `new`.
//! 6. A superseded plan never completes; the final text is the last target.

use glitch_core::scramble::{
    CompletionStatus, FrameLoop, FrameOutcome, ScrambleConfig, ScrambleEngine, ScrambleUnit,
    SharedText, TransitionPlan,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use unicode_segmentation::UnicodeSegmentation;

// ── Helpers ─────────────────────────────────────────────────────────────

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z ]{0,24}",
        "[a-z0-9@._-]{0,32}",
        "\\PC{0,12}",
    ]
}

fn config_strategy() -> impl Strategy<Value = ScrambleConfig> {
    (0u32..=30, 0u32..=30, 0.0f64..=1.0).prop_map(|(reveal, settle, p)| {
        ScrambleConfig::default()
            .reveal_window(reveal)
            .settle_window(settle)
            .reroll_probability(p)
    })
}

fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

type Engine = ScrambleEngine<FrameLoop, SharedText, StdRng>;

/// Drive the loop until the engine idles, counting `Completed` outcomes.
fn drive(frames: &FrameLoop, engine: &mut Engine, max_ticks: usize) -> usize {
    let mut completed = 0;
    for _ in 0..max_ticks {
        if !engine.is_animating() {
            break;
        }
        for request in frames.tick() {
            if engine.on_frame(request) == FrameOutcome::Completed {
                completed += 1;
            }
        }
    }
    completed
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Plan shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slot_count_is_longest_text(old in text_strategy(), new in text_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = TransitionPlan::build(&old, &new, &ScrambleConfig::default(), &mut rng);
        prop_assert_eq!(plan.len(), grapheme_len(&old).max(grapheme_len(&new)));
    }

    #[test]
    fn settle_never_precedes_reveal(
        old in text_strategy(),
        new in text_strategy(),
        cfg in config_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = TransitionPlan::build(&old, &new, &cfg, &mut rng);
        for slot in plan.slots() {
            prop_assert!(slot.settle_frame() >= slot.reveal_frame());
        }
        prop_assert!(plan.completion_frame() <= cfg.max_settle_frame());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Settlement monotonicity and frame width
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn settled_slots_never_regress(
        old in text_strategy(),
        new in text_strategy(),
        cfg in config_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut plan = TransitionPlan::build(&old, &new, &cfg, &mut rng);
        let last = plan.completion_frame() + 3;
        let mut settled_before = vec![false; plan.len()];

        for frame in 0..=last {
            let rendered = plan.render(frame, &cfg, &mut rng);
            prop_assert_eq!(rendered.len(), plan.len());
            for (idx, (unit, slot)) in rendered.units().iter().zip(plan.slots()).enumerate() {
                let settled = slot.is_settled(frame);
                prop_assert!(settled || !settled_before[idx], "slot {} regressed at frame {}", idx, frame);
                if settled {
                    let expected = ScrambleUnit::Plain(slot.to().unwrap_or_default().to_string());
                    prop_assert_eq!(unit, &expected);
                }
                settled_before[idx] = settled;
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Exhausted plans complete once, on the new text
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exhausted_plan_completes_once(
        old in text_strategy(),
        new in text_strategy(),
        cfg in config_strategy(),
        seed in any::<u64>(),
    ) {
        let frames = FrameLoop::new();
        let max_ticks = cfg.max_settle_frame() as usize + 2;
        let mut engine: Engine = ScrambleEngine::seeded(frames.clone(), seed).with_config(cfg);
        let el = SharedText::new(&old);

        let mut done = engine.set_text(el.clone(), &new);
        let synchronous = usize::from(!engine.is_animating());
        let completed = drive(&frames, &mut engine, max_ticks);

        prop_assert_eq!(synchronous + completed, 1);
        prop_assert_eq!(done.status(), CompletionStatus::Complete);
        prop_assert_eq!(el.text(), new);
        prop_assert!(el.is_plain());
        prop_assert!(frames.is_idle());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Supersession
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn superseded_plan_never_completes(
        old in text_strategy(),
        first in text_strategy(),
        second in text_strategy(),
        ticks_before in 0usize..8,
        seed in any::<u64>(),
    ) {
        let frames = FrameLoop::new();
        let cfg = ScrambleConfig::default();
        let max_ticks = cfg.max_settle_frame() as usize + 2;
        let mut engine: Engine = ScrambleEngine::seeded(frames.clone(), seed).with_config(cfg);
        let el = SharedText::new(&old);

        let mut done_first = engine.set_text(el.clone(), &first);
        drive(&frames, &mut engine, ticks_before);
        let first_finished = done_first.is_complete();

        let on_screen = el.text();
        let mut done_second = engine.set_text(el.clone(), &second);
        prop_assert_eq!(engine.original_text(), on_screen.as_str());

        drive(&frames, &mut engine, max_ticks);
        if !first_finished {
            prop_assert_eq!(done_first.status(), CompletionStatus::Superseded);
        }
        prop_assert!(done_second.is_complete());
        prop_assert_eq!(el.text(), second);
    }
}
