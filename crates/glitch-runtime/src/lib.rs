#![forbid(unsafe_code)]

//! Host-side runtime for the glitch widget.
//!
//! # Role in the workspace
//! `glitch-core` owns the scramble engine and has no notion of time or
//! threads. This crate adds what a host needs around it:
//!
//! - [`FrameTicker`]: a background thread emitting wall-clock frame ticks.
//! - [`HeadlineCycler`]: interval-driven heading cycling with revert.
//! - [`EmailForm`]: the capture form and its masked "connected" screen.
//! - [`GlitchConfig`]: defaults plus environment overrides.
//!
//! Cyclers and forms take the current time as a [`std::time::Duration`],
//! so tests drive them with plain numbers and hosts with a monotonic clock.

pub mod config;
pub mod form;
pub mod frame_ticker;
pub mod headline;

pub use config::{ConfigError, GlitchConfig};
pub use form::{EmailForm, FormConfig, FormPhase};
pub use frame_ticker::{FrameTick, FrameTicker, StopSignal};
pub use headline::{HeadlineConfig, HeadlineCycler, HeadlineEvent};

/// RNG stream used by the heading engine.
pub const ENGINE_STREAM: u64 = 1;
/// RNG stream used to pick alternate headings.
pub const PICKER_STREAM: u64 = 2;
/// RNG stream used by the masked email.
pub const MASK_STREAM: u64 = 3;
