#![forbid(unsafe_code)]

//! Transition plans: one [`CharacterSlot`] schedule per character position.

use rand::Rng;
use unicode_segmentation::UnicodeSegmentation;

use super::frame::{ScrambleFrame, ScrambleUnit};
use crate::glyphs::GlyphAlphabet;

/// Default upper bound (exclusive) for a slot's reveal frame.
pub const DEFAULT_REVEAL_WINDOW: u32 = 20;
/// Default upper bound (exclusive) for the extra frames before settling.
pub const DEFAULT_SETTLE_WINDOW: u32 = 20;
/// Default per-frame chance of re-rolling a scrambling slot's glyph.
pub const DEFAULT_REROLL_PROBABILITY: f64 = 0.28;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Tunables for building and rendering plans.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrambleConfig {
    reveal_window: u32,
    settle_window: u32,
    reroll_probability: f64,
    glyphs: GlyphAlphabet,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            reveal_window: DEFAULT_REVEAL_WINDOW,
            settle_window: DEFAULT_SETTLE_WINDOW,
            reroll_probability: DEFAULT_REROLL_PROBABILITY,
            glyphs: GlyphAlphabet::default(),
        }
    }
}

impl ScrambleConfig {
    /// Reveal frames are drawn from `0..window`. Zero pins every reveal to 0.
    #[must_use]
    pub fn reveal_window(mut self, window: u32) -> Self {
        self.reveal_window = window;
        self
    }

    /// Extra settle frames are drawn from `0..window`. Zero settles on reveal.
    #[must_use]
    pub fn settle_window(mut self, window: u32) -> Self {
        self.settle_window = window;
        self
    }

    /// Per-frame re-roll chance, clamped to `[0.0, 1.0]` (NaN becomes 0.0).
    #[must_use]
    pub fn reroll_probability(mut self, probability: f64) -> Self {
        self.reroll_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Replace the decorative alphabet.
    #[must_use]
    pub fn glyphs(mut self, glyphs: GlyphAlphabet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Current reveal window.
    #[must_use]
    pub fn reveal_window_frames(&self) -> u32 {
        self.reveal_window
    }

    /// Current settle window.
    #[must_use]
    pub fn settle_window_frames(&self) -> u32 {
        self.settle_window
    }

    /// Current re-roll probability.
    #[must_use]
    pub fn reroll_chance(&self) -> f64 {
        self.reroll_probability
    }

    /// Current decorative alphabet.
    #[must_use]
    pub fn glyph_alphabet(&self) -> &GlyphAlphabet {
        &self.glyphs
    }

    /// Upper bound on the frame at which any plan built with this config
    /// completes.
    #[must_use]
    pub fn max_settle_frame(&self) -> u32 {
        self.reveal_window
            .saturating_sub(1)
            .saturating_add(self.settle_window.saturating_sub(1))
    }
}

fn sample_below<R: Rng + ?Sized>(rng: &mut R, window: u32) -> u32 {
    if window == 0 {
        0
    } else {
        rng.gen_range(0..window)
    }
}

// ---------------------------------------------------------------------------
// CharacterSlot
// ---------------------------------------------------------------------------

/// The transition schedule of a single character position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSlot {
    from: Option<String>,
    to: Option<String>,
    reveal_frame: u32,
    settle_frame: u32,
    current_glyph: Option<char>,
}

impl CharacterSlot {
    /// Create a slot that starts scrambling at `reveal_frame` and settles
    /// `settle_delay` frames later.
    #[must_use]
    pub fn new(from: Option<&str>, to: Option<&str>, reveal_frame: u32, settle_delay: u32) -> Self {
        Self {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
            reveal_frame,
            settle_frame: reveal_frame.saturating_add(settle_delay),
            current_glyph: None,
        }
    }

    /// Character shown before the reveal frame; `None` when padding.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Character shown once settled; `None` when padding.
    #[must_use]
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// First frame that shows a decorative glyph.
    #[must_use]
    pub fn reveal_frame(&self) -> u32 {
        self.reveal_frame
    }

    /// First frame that shows the target character.
    #[must_use]
    pub fn settle_frame(&self) -> u32 {
        self.settle_frame
    }

    /// Last decorative glyph rolled for this slot.
    #[must_use]
    pub fn current_glyph(&self) -> Option<char> {
        self.current_glyph
    }

    /// Whether the slot shows its target character at `frame`.
    #[inline]
    #[must_use]
    pub fn is_settled(&self, frame: u32) -> bool {
        frame >= self.settle_frame
    }

    /// Whether the slot shows a decorative glyph at `frame`.
    #[inline]
    #[must_use]
    pub fn is_scrambling(&self, frame: u32) -> bool {
        frame >= self.reveal_frame && frame < self.settle_frame
    }

    /// Compute the unit this slot shows at `frame`, re-rolling its glyph
    /// when scrambling.
    pub(crate) fn emit<R: Rng + ?Sized>(
        &mut self,
        frame: u32,
        config: &ScrambleConfig,
        rng: &mut R,
    ) -> ScrambleUnit {
        if self.is_settled(frame) {
            return ScrambleUnit::Plain(self.to.clone().unwrap_or_default());
        }
        if frame >= self.reveal_frame {
            // The re-roll draw only happens once a glyph exists.
            let glyph = match self.current_glyph {
                Some(glyph) if !rng.gen_bool(config.reroll_probability) => glyph,
                _ => config.glyphs.pick(rng),
            };
            self.current_glyph = Some(glyph);
            return ScrambleUnit::Decorative(glyph);
        }
        ScrambleUnit::Plain(self.from.clone().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// TransitionPlan
// ---------------------------------------------------------------------------

/// Ordered slots covering `max(len(old), len(new))` grapheme positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionPlan {
    slots: Vec<CharacterSlot>,
}

impl TransitionPlan {
    /// Build a plan from `old` to `new`, sampling every slot's schedule
    /// independently from `rng`.
    pub fn build<R: Rng + ?Sized>(
        old: &str,
        new: &str,
        config: &ScrambleConfig,
        rng: &mut R,
    ) -> Self {
        let old: Vec<&str> = old.graphemes(true).collect();
        let new: Vec<&str> = new.graphemes(true).collect();
        let len = old.len().max(new.len());

        let slots = (0..len)
            .map(|idx| {
                let reveal = sample_below(rng, config.reveal_window);
                let delay = sample_below(rng, config.settle_window);
                CharacterSlot::new(old.get(idx).copied(), new.get(idx).copied(), reveal, delay)
            })
            .collect();

        Self { slots }
    }

    /// Wrap pre-built slots, e.g. for fixed schedules.
    #[must_use]
    pub fn from_slots(slots: Vec<CharacterSlot>) -> Self {
        Self { slots }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the plan has no slots (both texts were empty).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots in index order.
    #[must_use]
    pub fn slots(&self) -> &[CharacterSlot] {
        &self.slots
    }

    /// Number of slots settled at `frame`.
    #[must_use]
    pub fn settled_count(&self, frame: u32) -> usize {
        self.slots.iter().filter(|s| s.is_settled(frame)).count()
    }

    /// Whether every slot is settled at `frame`.
    #[must_use]
    pub fn is_settled(&self, frame: u32) -> bool {
        self.settled_count(frame) == self.slots.len()
    }

    /// Frame at which the last slot settles; 0 for an empty plan.
    #[must_use]
    pub fn completion_frame(&self) -> u32 {
        self.slots.iter().map(CharacterSlot::settle_frame).max().unwrap_or(0)
    }

    /// The text the plan settles on.
    #[must_use]
    pub fn target_text(&self) -> String {
        self.slots.iter().filter_map(CharacterSlot::to).collect()
    }

    /// Render every slot at `frame`, in index order.
    pub fn render<R: Rng + ?Sized>(
        &mut self,
        frame: u32,
        config: &ScrambleConfig,
        rng: &mut R,
    ) -> ScrambleFrame {
        let units = self
            .slots
            .iter_mut()
            .map(|slot| slot.emit(frame, config, rng))
            .collect();
        ScrambleFrame::new(units, frame)
    }
}
