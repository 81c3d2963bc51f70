#![forbid(unsafe_code)]

//! Rendered scramble frames.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// What one slot shows in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrambleUnit {
    /// Ordinary text: the old character, the settled new one, or empty
    /// padding.
    Plain(String),
    /// A transient glyph, drawn with a distinguishing treatment.
    Decorative(char),
}

impl ScrambleUnit {
    /// Whether this unit is a transient glyph.
    #[inline]
    #[must_use]
    pub fn is_decorative(&self) -> bool {
        matches!(self, Self::Decorative(_))
    }

    fn push_to(&self, out: &mut String) {
        match self {
            Self::Plain(text) => out.push_str(text),
            Self::Decorative(glyph) => out.push(*glyph),
        }
    }
}

/// One frame of output: a unit per slot, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrambleFrame {
    units: Vec<ScrambleUnit>,
    index: u32,
}

impl ScrambleFrame {
    pub(crate) fn new(units: Vec<ScrambleUnit>, index: u32) -> Self {
        Self { units, index }
    }

    /// A frame of plain text, one unit per grapheme cluster.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            units: text
                .graphemes(true)
                .map(|g| ScrambleUnit::Plain(g.to_string()))
                .collect(),
            index: 0,
        }
    }

    /// The units in slot order.
    #[must_use]
    pub fn units(&self) -> &[ScrambleUnit] {
        &self.units
    }

    /// Frame counter value this frame was rendered at.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of units (equals the plan's slot count).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether there are no units.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of decorative units.
    #[must_use]
    pub fn decorative_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_decorative()).count()
    }

    /// Whether no decorative units remain.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.decorative_count() == 0
    }

    /// Concatenated display text, decorative glyphs included verbatim.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.units.len());
        for unit in &self.units {
            unit.push_to(&mut out);
        }
        out
    }

    /// HTML rendition: decorative glyphs wrapped in
    /// `<span class="scramble-text">`, everything escaped.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.units.len() * 2);
        for unit in &self.units {
            match unit {
                ScrambleUnit::Plain(text) => escape_into(text, &mut out),
                ScrambleUnit::Decorative(glyph) => {
                    out.push_str("<span class=\"scramble-text\">");
                    escape_into(glyph.encode_utf8(&mut [0; 4]), &mut out);
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}

impl fmt::Display for ScrambleFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            match unit {
                ScrambleUnit::Plain(text) => f.write_str(text)?,
                ScrambleUnit::Decorative(glyph) => write!(f, "{glyph}")?,
            }
        }
        Ok(())
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
