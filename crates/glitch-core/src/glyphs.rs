#![forbid(unsafe_code)]

//! Decorative glyph alphabets.
//!
//! A slot that is mid-scramble shows a glyph drawn from a [`GlyphAlphabet`].
//! Repeated entries weight the draw: the default alphabet ends in a run of
//! underscores so roughly a third of all rolls land on `_`.

use rand::Rng;

/// Glyphs shown while a heading slot is scrambling.
pub const DEFAULT_SCRAMBLE_GLYPHS: &str = "!<>-_\\/[]{}\u{2014}=+*^?#________";

/// Fallback glyph for an alphabet built from an empty string.
const FALLBACK_GLYPH: char = '_';

/// A non-empty, weighted set of decorative characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAlphabet {
    glyphs: Vec<char>,
}

impl GlyphAlphabet {
    /// Build an alphabet from the characters of `glyphs`.
    ///
    /// An empty string yields a single-glyph alphabet (`_`) so that drawing
    /// never has to fail.
    #[must_use]
    pub fn new(glyphs: &str) -> Self {
        let mut chars: Vec<char> = glyphs.chars().collect();
        if chars.is_empty() {
            chars.push(FALLBACK_GLYPH);
        }
        Self { glyphs: chars }
    }

    /// Number of entries, counting repeats.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the alphabet has no glyphs. Never true: `new` falls back to `_`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether `ch` is one of the alphabet's glyphs.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }

    /// Draw a glyph uniformly over the entries.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.glyphs[rng.gen_range(0..self.glyphs.len())]
    }
}

impl Default for GlyphAlphabet {
    fn default() -> Self {
        Self::new(DEFAULT_SCRAMBLE_GLYPHS)
    }
}
