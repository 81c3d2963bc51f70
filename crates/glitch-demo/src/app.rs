#![forbid(unsafe_code)]

//! Demo model: one heading engine, one form, one frame loop.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glitch_core::scramble::{FrameLoop, ScrambleEngine, SharedText};
use glitch_runtime::{
    ENGINE_STREAM, EmailForm, GlitchConfig, HeadlineCycler, MASK_STREAM, PICKER_STREAM,
};

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The whole widget.
#[derive(Debug)]
pub struct GlitchApp {
    frames: FrameLoop,
    headline: HeadlineCycler<FrameLoop>,
    form: EmailForm,
    exit_after: Option<Duration>,
    frame_count: u64,
}

impl GlitchApp {
    /// Build the widget and arm the heading cycle at time zero.
    pub fn new(config: &GlitchConfig, exit_after: Option<Duration>) -> Self {
        let frames = FrameLoop::new();
        let engine = ScrambleEngine::with_rng(frames.clone(), config.rng(ENGINE_STREAM))
            .with_config(config.scramble.clone());
        let mut headline =
            HeadlineCycler::new(engine, config.rng(PICKER_STREAM), config.headline.clone());
        headline.start(Duration::ZERO);

        Self {
            frames,
            headline,
            form: EmailForm::new(config.form, config.rng(MASK_STREAM)),
            exit_after,
            frame_count: 0,
        }
    }

    /// One display frame at `now`: advance the heading, then fire timers.
    pub fn on_frame(&mut self, now: Duration) -> Control {
        self.frame_count += 1;
        for request in self.frames.tick() {
            self.headline.on_frame(request);
        }
        for event in self.headline.tick(now) {
            tracing::debug!(?event, frame = self.frame_count, "headline");
        }
        self.form.tick(now);

        match self.exit_after {
            Some(limit) if now >= limit => {
                tracing::info!(?now, "exit deadline reached");
                Control::Quit
            }
            _ => Control::Continue,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Duration) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('r') if ctrl => self.form.restart(),
            KeyCode::Enter => {
                self.form.submit(now);
            }
            KeyCode::Backspace => {
                self.form.backspace();
            }
            KeyCode::Char(ch) if !ctrl => {
                self.form.push_char(ch);
            }
            _ => {}
        }
        Control::Continue
    }

    /// Stop the heading cycle and cancel its animation.
    ///
    /// See [`HeadlineCycler::stop`] for the text left on screen.
    pub fn shutdown(&mut self) {
        self.headline.stop();
    }

    /// Heading element.
    #[must_use]
    pub fn heading(&self) -> &SharedText {
        self.headline.heading()
    }

    /// Form state.
    #[must_use]
    pub fn form(&self) -> &EmailForm {
        &self.form
    }

    /// Frames processed so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the heading is mid-transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.headline.is_animating()
    }
}
