#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! Defaults reproduce the stock widget. Each tunable can be overridden from
//! the environment:
//!
//! | Variable                    | Meaning                               |
//! |-----------------------------|---------------------------------------|
//! | `GLITCH_SEED`               | Seed for every RNG (random if unset)  |
//! | `GLITCH_FRAME_MS`           | Frame interval in milliseconds        |
//! | `GLITCH_REVEAL_WINDOW`      | Reveal window in frames               |
//! | `GLITCH_SETTLE_WINDOW`      | Settle window in frames               |
//! | `GLITCH_REROLL_PROBABILITY` | Glyph re-roll chance, `0.0..=1.0`     |
//! | `GLITCH_CYCLE_MS`           | Headline cycle interval               |
//! | `GLITCH_REVERT_MS`          | Delay before reverting the headline   |
//! | `GLITCH_MAX_CHARS`          | Email input limit                     |
//!
//! Blank values are treated as unset. Anything else that fails to parse is a
//! [`ConfigError`].

use std::fmt;
use std::time::Duration;

use glitch_core::ScrambleConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::form::FormConfig;
use crate::headline::HeadlineConfig;

pub const ENV_SEED: &str = "GLITCH_SEED";
pub const ENV_FRAME_MS: &str = "GLITCH_FRAME_MS";
pub const ENV_REVEAL_WINDOW: &str = "GLITCH_REVEAL_WINDOW";
pub const ENV_SETTLE_WINDOW: &str = "GLITCH_SETTLE_WINDOW";
pub const ENV_REROLL_PROBABILITY: &str = "GLITCH_REROLL_PROBABILITY";
pub const ENV_CYCLE_MS: &str = "GLITCH_CYCLE_MS";
pub const ENV_REVERT_MS: &str = "GLITCH_REVERT_MS";
pub const ENV_MAX_CHARS: &str = "GLITCH_MAX_CHARS";

/// Default frame interval, roughly one display refresh.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// An environment override that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Variable name.
    pub var: &'static str,
    /// Raw value as read.
    pub value: String,
    /// What was expected.
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.var, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Everything the widget needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchConfig {
    /// Seed for the engine, picker and mask RNGs. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Wall-clock frame interval.
    pub frame_interval: Duration,
    /// Scramble tunables.
    pub scramble: ScrambleConfig,
    /// Headline cycling.
    pub headline: HeadlineConfig,
    /// Email form.
    pub form: FormConfig,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            scramble: ScrambleConfig::default(),
            headline: HeadlineConfig::default(),
            form: FormConfig::default(),
        }
    }
}

impl GlitchConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup: &lookup };
        let mut config = Self::default();

        if let Some(seed) = env.u64(ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(ms) = env.positive_u64(ENV_FRAME_MS)? {
            config.frame_interval = Duration::from_millis(ms);
        }
        if let Some(window) = env.u32(ENV_REVEAL_WINDOW)? {
            config.scramble = config.scramble.reveal_window(window);
        }
        if let Some(window) = env.u32(ENV_SETTLE_WINDOW)? {
            config.scramble = config.scramble.settle_window(window);
        }
        if let Some(p) = env.probability(ENV_REROLL_PROBABILITY)? {
            config.scramble = config.scramble.reroll_probability(p);
        }
        if let Some(ms) = env.positive_u64(ENV_CYCLE_MS)? {
            config.headline.cycle_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = env.u64(ENV_REVERT_MS)? {
            config.headline.revert_delay = Duration::from_millis(ms);
        }
        if let Some(max) = env.positive_u64(ENV_MAX_CHARS)? {
            config.form = config
                .form
                .with_max_chars(usize::try_from(max).unwrap_or(usize::MAX));
        }

        Ok(config)
    }

    /// RNG for one consumer. Seeded configs give each `stream` its own
    /// reproducible sequence.
    #[must_use]
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ stream.rotate_left(32)),
            None => StdRng::from_entropy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

struct Env<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Env<'_> {
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name).and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parsed<T: std::str::FromStr>(
        &self,
        name: &'static str,
        reason: &'static str,
    ) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.string(name) else {
            return Ok(None);
        };
        value.parse::<T>().map(Some).map_err(|_| ConfigError {
            var: name,
            value,
            reason,
        })
    }

    fn u64(&self, name: &'static str) -> Result<Option<u64>, ConfigError> {
        self.parsed(name, "expected a non-negative integer")
    }

    fn u32(&self, name: &'static str) -> Result<Option<u32>, ConfigError> {
        self.parsed(name, "expected a non-negative integer")
    }

    fn positive_u64(&self, name: &'static str) -> Result<Option<u64>, ConfigError> {
        match self.u64(name)? {
            Some(0) => Err(ConfigError {
                var: name,
                value: "0".to_string(),
                reason: "must be greater than zero",
            }),
            other => Ok(other),
        }
    }

    fn probability(&self, name: &'static str) -> Result<Option<f64>, ConfigError> {
        let Some(p) = self.parsed::<f64>(name, "expected a number")? else {
            return Ok(None);
        };
        if (0.0..=1.0).contains(&p) {
            Ok(Some(p))
        } else {
            Err(ConfigError {
                var: name,
                value: p.to_string(),
                reason: "expected a probability between 0 and 1",
            })
        }
    }
}
