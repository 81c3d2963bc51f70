#![forbid(unsafe_code)]

//! Core: the text-scramble engine, its frame scheduling primitive, and the
//! decorative glyph sources used by the glitch widget.
//!
//! Nothing in this crate spawns threads or touches I/O. Hosts supply a
//! [`scramble::TextTarget`] to write into and drive frames through a
//! [`scramble::FrameScheduler`].

pub mod glyphs;
pub mod logging;
pub mod mask;
pub mod scramble;

pub use glyphs::GlyphAlphabet;
pub use mask::{MASK_SYMBOLS, mask_email};
pub use scramble::{
    CharacterSlot, Completion, CompletionStatus, FrameLoop, FrameOutcome, FrameRequest,
    FrameScheduler, PlanPhase, ScrambleConfig, ScrambleEngine, ScrambleFrame, ScrambleUnit,
    SharedText, TextTarget, TransitionPlan,
};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
