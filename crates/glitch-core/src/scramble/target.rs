#![forbid(unsafe_code)]

//! Text-bearing UI handles the engine writes into.

use std::cell::RefCell;
use std::rc::Rc;

use super::frame::ScrambleFrame;

/// An addressable element that displays a string.
///
/// The engine reads the current text once per `set_text` and writes one
/// frame per advance. While a plan is active the engine is the only writer.
pub trait TextTarget {
    /// Text currently on display, decorative glyphs included.
    fn current_text(&self) -> String;

    /// Replace the content with a rendered frame.
    fn write_frame(&mut self, frame: &ScrambleFrame);

    /// Replace the content with plain text.
    fn write_plain(&mut self, text: &str);
}

#[derive(Debug, Default)]
struct TextContent {
    frame: ScrambleFrame,
    writes: u64,
}

/// Shared, single-threaded text element.
///
/// Clones point at the same content: the engine keeps one handle and the
/// view that draws the element keeps another.
#[derive(Debug, Clone, Default)]
pub struct SharedText {
    inner: Rc<RefCell<TextContent>>,
}

impl SharedText {
    /// Create an element showing `text` as plain content.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TextContent {
                frame: ScrambleFrame::plain(text),
                writes: 0,
            })),
        }
    }

    /// Current display text.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.borrow().frame.text()
    }

    /// Copy of the last written frame.
    #[must_use]
    pub fn frame(&self) -> ScrambleFrame {
        self.inner.borrow().frame.clone()
    }

    /// Run `f` against the last written frame without cloning it.
    pub fn with_frame<T>(&self, f: impl FnOnce(&ScrambleFrame) -> T) -> T {
        f(&self.inner.borrow().frame)
    }

    /// Number of writes since creation.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.inner.borrow().writes
    }

    /// Whether the content carries no decorative units.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.inner.borrow().frame.is_plain()
    }
}

impl TextTarget for SharedText {
    fn current_text(&self) -> String {
        self.text()
    }

    fn write_frame(&mut self, frame: &ScrambleFrame) {
        let mut content = self.inner.borrow_mut();
        content.frame = frame.clone();
        content.writes += 1;
    }

    fn write_plain(&mut self, text: &str) {
        let mut content = self.inner.borrow_mut();
        content.frame = ScrambleFrame::plain(text);
        content.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shows_plain_text() {
        let el = SharedText::new("HELLO");
        assert_eq!(el.text(), "HELLO");
        assert!(el.is_plain());
        assert_eq!(el.writes(), 0);
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(SharedText::default().current_text(), "");
    }

    #[test]
    fn clones_share_content() {
        let el = SharedText::new("a");
        let mut writer = el.clone();
        writer.write_plain("b");
        assert_eq!(el.text(), "b");
        assert_eq!(el.writes(), 1);
    }

    #[test]
    fn with_frame_reads_units() {
        let el = SharedText::new("xyz");
        assert_eq!(el.with_frame(ScrambleFrame::len), 3);
    }
}
