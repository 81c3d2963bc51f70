#![forbid(unsafe_code)]

//! Text-scramble animation engine.
//!
//! A [`ScrambleEngine`] morphs the text shown by a [`TextTarget`] from its
//! current value to a new one. Every character position gets an independent
//! [`CharacterSlot`] schedule: it keeps showing the old character until its
//! reveal frame, flickers through decorative glyphs, and settles on the new
//! character at its settle frame. The engine advances one frame per tick of a
//! [`FrameScheduler`] and resolves a [`Completion`] once every slot settles.
//!
//! # Usage
//!
//! ```ignore
//! use glitch_core::scramble::{FrameLoop, ScrambleEngine, SharedText};
//!
//! let frames = FrameLoop::new();
//! let heading = SharedText::new("ENTER YOUR EMAIL");
//! let mut engine = ScrambleEngine::new(frames.clone());
//!
//! let mut done = engine.set_text(heading.clone(), "ACCESS REQUIRED");
//! while engine.is_animating() {
//!     for request in frames.tick() {
//!         engine.on_frame(request);
//!     }
//! }
//! assert!(done.status().is_complete());
//! assert_eq!(heading.text(), "ACCESS REQUIRED");
//! ```
//!
//! # Invariants
//!
//! 1. At most one plan is active per engine; starting a new plan cancels the
//!    pending frame and drops the old completion unresolved.
//! 2. `settle_frame >= reveal_frame` for every slot.
//! 3. A settled slot (`frame >= settle_frame`) never shows anything but its
//!    target character again within the same plan.
//! 4. Every rendered frame has exactly one unit per slot.
//! 5. At most one frame request is pending per engine.

mod completion;
mod engine;
mod frame;
mod plan;
mod scheduler;
mod target;

pub use completion::{Completion, CompletionStatus};
pub use engine::{FrameOutcome, PlanPhase, ScrambleEngine};
pub use frame::{ScrambleFrame, ScrambleUnit};
pub use plan::{CharacterSlot, ScrambleConfig, TransitionPlan};
pub use scheduler::{FrameLoop, FrameRequest, FrameScheduler};
pub use target::{SharedText, TextTarget};
