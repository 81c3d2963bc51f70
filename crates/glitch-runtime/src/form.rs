#![forbid(unsafe_code)]

//! Email capture form state.
//!
//! The form moves `Editing -> Success -> Submitted` and back to `Editing` on
//! restart. Input is capped at a character limit and the counter warns near
//! it. After submission the email is shown masked, re-rolled on a short
//! interval so it keeps glitching.

use std::time::Duration;

use glitch_core::mask_email;
use rand::Rng;
use rand::rngs::StdRng;
use unicode_segmentation::UnicodeSegmentation;

/// Default input limit in characters.
pub const DEFAULT_MAX_CHARS: usize = 100;

/// Default counter warning threshold.
pub const DEFAULT_WARN_ABOVE: usize = 80;

/// Default length of the success flash.
pub const DEFAULT_SUCCESS_FLASH: Duration = Duration::from_millis(1000);

/// Default period between masked email re-rolls.
pub const DEFAULT_MASK_REFRESH: Duration = Duration::from_millis(150);

/// Form limits and timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Maximum accepted characters.
    pub max_chars: usize,
    /// Counter warns once the count exceeds this.
    pub warn_above: usize,
    /// How long the success flash shows before the submitted screen.
    pub success_flash: Duration,
    /// Masked email re-roll period.
    pub mask_refresh: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            warn_above: DEFAULT_WARN_ABOVE,
            success_flash: DEFAULT_SUCCESS_FLASH,
            mask_refresh: DEFAULT_MASK_REFRESH,
        }
    }
}

impl FormConfig {
    /// Change the input limit, keeping the warning at four fifths of it
    /// (rounded up).
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self.warn_above = max_chars - max_chars / 5;
        self
    }
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting input.
    Editing,
    /// Submit accepted; flashing until the deadline.
    Success {
        /// When the submitted screen takes over.
        until: Duration,
    },
    /// Showing the masked email.
    Submitted,
}

/// Email form with a masked "connected" screen.
pub struct EmailForm<R: Rng = StdRng> {
    config: FormConfig,
    email: String,
    char_count: usize,
    phase: FormPhase,
    masked: String,
    next_mask_at: Duration,
    rng: R,
}

impl<R: Rng> EmailForm<R> {
    /// Create an empty form in [`FormPhase::Editing`].
    pub fn new(config: FormConfig, rng: R) -> Self {
        Self {
            config,
            email: String::new(),
            char_count: 0,
            phase: FormPhase::Editing,
            masked: String::new(),
            next_mask_at: Duration::ZERO,
            rng,
        }
    }

    /// Replace the input. Values over the limit are rejected and leave the
    /// input unchanged. Returns whether the value was accepted.
    pub fn set_email(&mut self, value: &str) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }
        let count = value.graphemes(true).count();
        if count > self.config.max_chars {
            return false;
        }
        self.email = value.to_string();
        self.char_count = count;
        true
    }

    /// Append one character.
    pub fn push_char(&mut self, ch: char) -> bool {
        let mut next = self.email.clone();
        next.push(ch);
        self.set_email(&next)
    }

    /// Remove the last character.
    pub fn backspace(&mut self) -> bool {
        let Some((idx, _)) = self.email.grapheme_indices(true).next_back() else {
            return false;
        };
        let next = self.email[..idx].to_string();
        self.set_email(&next)
    }

    /// Submit the form. Empty input is ignored.
    pub fn submit(&mut self, now: Duration) -> bool {
        if self.phase != FormPhase::Editing || self.email.is_empty() {
            return false;
        }
        self.phase = FormPhase::Success {
            until: now + self.config.success_flash,
        };
        tracing::info!(chars = self.char_count, "email submitted");
        true
    }

    /// Advance timers. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.phase {
            FormPhase::Editing => false,
            FormPhase::Success { until } => {
                if now < until {
                    return false;
                }
                self.phase = FormPhase::Submitted;
                self.refresh_mask();
                self.next_mask_at = now + self.refresh_period();
                true
            }
            FormPhase::Submitted => {
                if now < self.next_mask_at {
                    return false;
                }
                self.refresh_mask();
                while self.next_mask_at <= now {
                    self.next_mask_at += self.refresh_period();
                }
                true
            }
        }
    }

    /// Clear the input and return to [`FormPhase::Editing`].
    pub fn restart(&mut self) {
        self.email.clear();
        self.char_count = 0;
        self.masked.clear();
        self.phase = FormPhase::Editing;
        tracing::debug!("form restarted");
    }

    /// Current input.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Input length in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Counter text, e.g. `12/100`.
    #[must_use]
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.char_count, self.config.max_chars)
    }

    /// Whether the counter should warn.
    #[must_use]
    pub fn near_limit(&self) -> bool {
        self.char_count > self.config.warn_above
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the success flash is showing.
    #[must_use]
    pub fn is_flashing(&self) -> bool {
        matches!(self.phase, FormPhase::Success { .. })
    }

    /// Whether the submitted screen is showing.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// Latest masked rendering of the email. Empty until submitted.
    #[must_use]
    pub fn masked_email(&self) -> &str {
        &self.masked
    }

    /// Limits and timings in use.
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    fn refresh_mask(&mut self) {
        self.masked = mask_email(&self.email, &mut self.rng);
    }

    fn refresh_period(&self) -> Duration {
        self.config.mask_refresh.max(Duration::from_millis(1))
    }
}

impl<R: Rng> std::fmt::Debug for EmailForm<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailForm")
            .field("char_count", &self.char_count)
            .field("phase", &self.phase)
            .finish()
    }
}
