#![forbid(unsafe_code)]

//! Masked email reveal.
//!
//! After submission the widget shows the address half-hidden behind
//! flickering symbols. Each call to [`mask_email`] produces a fresh mask; the
//! host re-rolls it on a short interval to make it shimmer.
//!
//! # Rules
//!
//! Positions are grapheme clusters. With `at` the index of the first `@`:
//!
//! 1. Positions 0 and 1 are always shown.
//! 2. Position `at - 1` is always shown (only when `at > 0`).
//! 3. Positions strictly between 1 and `at - 1` are shown with probability
//!    [`REVEAL_PROBABILITY`], otherwise replaced by a [`MASK_SYMBOLS`] glyph.
//! 4. Everything else (the `@`, the domain, or the whole tail when there is
//!    no `@`) is always replaced.
//!
//! The output has exactly as many graphemes as the input.

use rand::Rng;
use unicode_segmentation::UnicodeSegmentation;

/// Symbols substituted for hidden positions.
pub const MASK_SYMBOLS: &str = "*^%$#@!?";

/// Chance that a middle local-part character stays visible.
pub const REVEAL_PROBABILITY: f64 = 0.6;

/// Produce one masked rendition of `email`.
pub fn mask_email<R: Rng + ?Sized>(email: &str, rng: &mut R) -> String {
    let graphemes: Vec<&str> = email.graphemes(true).collect();
    let at = graphemes.iter().position(|g| *g == "@");
    let symbols: Vec<char> = MASK_SYMBOLS.chars().collect();
    let mut out = String::with_capacity(email.len());

    for (idx, grapheme) in graphemes.iter().enumerate() {
        let visible = match at {
            _ if idx < 2 => true,
            Some(at) if at > 0 && idx == at - 1 => true,
            Some(at) if idx < at.saturating_sub(1) => rng.gen_bool(REVEAL_PROBABILITY),
            _ => false,
        };
        if visible {
            out.push_str(grapheme);
        } else {
            out.push(symbols[rng.gen_range(0..symbols.len())]);
        }
    }

    out
}
