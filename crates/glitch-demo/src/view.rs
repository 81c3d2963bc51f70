#![forbid(unsafe_code)]

//! Layout and painting.
//!
//! [`layout`] turns the app state into centred, styled lines without touching
//! the terminal; [`paint`] queues them through crossterm.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use glitch_core::scramble::{ScrambleFrame, ScrambleUnit};
use glitch_runtime::FormPhase;
use unicode_width::UnicodeWidthStr;

use crate::app::GlitchApp;

const PLACEHOLDER: &str = "your.email@example.com";
const SUBMIT_LABEL: &str = "[ SUBMIT ]";
const SUBMITTED_LINES: [&str; 2] = ["WELCOME TO THE", "FUTURE"];
const CONNECTED: &str = "CONNECTED";
const FOOTER: &str = "enter: submit  ctrl+r: restart  esc: quit";

/// Visual role of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Glitch,
    Input,
    Placeholder,
    Counter,
    Warning,
    Button,
    Success,
    Dim,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Self::Heading => Color::White,
            Self::Glitch | Self::Warning | Self::Button => Color::Magenta,
            Self::Input | Self::Counter | Self::Success => Color::Green,
            Self::Placeholder | Self::Dim => Color::DarkGrey,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Self::Heading | Self::Success)
    }
}

/// A run of text in one tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn single(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    /// Concatenated text.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }
}

/// Heading frame as spans; decorative glyphs get their own tone.
#[must_use]
pub fn heading_line(frame: &ScrambleFrame) -> Line {
    let mut spans: Vec<Span> = Vec::new();
    for unit in frame.units() {
        let (text, tone) = match unit {
            ScrambleUnit::Plain(s) => (s.clone(), Tone::Heading),
            ScrambleUnit::Decorative(c) => (c.to_string(), Tone::Glitch),
        };
        match spans.last_mut() {
            Some(last) if last.tone == tone => last.text.push_str(&text),
            _ => spans.push(Span::new(text, tone)),
        }
    }
    Line { spans }
}

/// Every row of the current screen, top to bottom.
#[must_use]
pub fn layout(app: &GlitchApp) -> Vec<Line> {
    let form = app.form();
    let mut lines = vec![app.heading().with_frame(heading_line), Line::default()];

    match form.phase() {
        FormPhase::Editing | FormPhase::Success { .. } => {
            let input = if form.email().is_empty() {
                Line::single(PLACEHOLDER, Tone::Placeholder)
            } else {
                Line::single(format!("{}_", form.email()), Tone::Input)
            };
            lines.push(input);

            let counter_tone = if form.near_limit() {
                Tone::Warning
            } else {
                Tone::Counter
            };
            lines.push(Line::single(form.counter_label(), counter_tone));
            lines.push(Line::default());

            let button_tone = if form.is_flashing() {
                Tone::Success
            } else {
                Tone::Button
            };
            lines.push(Line::single(SUBMIT_LABEL, button_tone));
        }
        FormPhase::Submitted => {
            for text in SUBMITTED_LINES {
                lines.push(Line::single(text, Tone::Heading));
            }
            lines.push(Line::single(form.masked_email(), Tone::Glitch));
            lines.push(Line::single(CONNECTED, Tone::Success));
        }
    }

    lines.push(Line::default());
    lines.push(Line::single(FOOTER, Tone::Dim));
    lines
}

/// Left padding that centres `width` cells in `cols`.
#[must_use]
pub fn centre_offset(width: usize, cols: u16) -> u16 {
    let cols = usize::from(cols);
    u16::try_from(cols.saturating_sub(width) / 2).unwrap_or(0)
}

/// Clear the screen and draw `lines` centred in a `cols` x `rows` area.
pub fn paint(out: &mut impl Write, lines: &[Line], (cols, rows): (u16, u16)) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = rows.saturating_sub(height) / 2;

    for (row, line) in (top..rows).zip(lines) {
        queue!(out, cursor::MoveTo(centre_offset(line.width(), cols), row))?;
        for span in &line.spans {
            queue!(out, SetForegroundColor(span.tone.color()))?;
            if span.tone.bold() {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(&span.text), SetAttribute(Attribute::Reset))?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}
