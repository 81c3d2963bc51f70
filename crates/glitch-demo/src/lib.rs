#![forbid(unsafe_code)]

//! Terminal rendition of the glitch email-capture widget.
//!
//! The binary in `main.rs` wires these pieces together: [`cli`] reads
//! options, [`logging`] installs a file subscriber, [`terminal`] owns the
//! raw-mode session, [`app`] holds the widget state and [`view`] draws it.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod terminal;
pub mod view;

pub use error::DemoError;
