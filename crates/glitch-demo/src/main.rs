#![forbid(unsafe_code)]

//! glitch-demo binary entry point.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use glitch_demo::app::{Control, GlitchApp};
use glitch_demo::cli::{self, Command, Opts};
use glitch_demo::terminal::TerminalSession;
use glitch_demo::{DemoError, logging, view};
use glitch_runtime::{FrameTicker, GlitchConfig};

fn main() {
    if let Err(err) = run() {
        eprintln!("glitch-demo: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let opts = match Opts::parse()? {
        Command::Run(opts) => opts,
        Command::Help => {
            println!("{}", cli::HELP_TEXT);
            return Ok(());
        }
        Command::Version => {
            println!("glitch-demo {}", cli::VERSION);
            return Ok(());
        }
    };

    let mut config = GlitchConfig::from_env()?;
    opts.apply(&mut config);
    logging::init(opts.log_file.as_deref())?;
    tracing::info!(seed = ?config.seed, frame = ?config.frame_interval, "starting");

    let mut app = GlitchApp::new(&config, opts.exit_after());
    let session = TerminalSession::enter()?;
    let result = event_loop(&session, &mut app, config.frame_interval);

    app.shutdown();
    drop(session);
    tracing::info!(frames = app.frame_count(), "stopped");
    result
}

fn event_loop(
    session: &TerminalSession,
    app: &mut GlitchApp,
    frame_interval: Duration,
) -> Result<(), DemoError> {
    let ticker = FrameTicker::start(frame_interval)?;
    let started = Instant::now();
    let mut stdout = io::stdout();
    let mut dirty = true;

    loop {
        let now = started.elapsed();

        if let Some(event) = session.next_event(Duration::ZERO)? {
            match event {
                Event::Key(key) => {
                    if app.handle_key(key, now) == Control::Quit {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
            continue;
        }

        if let Some(tick) = ticker.wait(frame_interval) {
            let now = tick.at.saturating_duration_since(started);
            if app.on_frame(now) == Control::Quit {
                break;
            }
            dirty = true;
        }

        if dirty {
            view::paint(&mut stdout, &view::layout(app), session.size()?)?;
            dirty = false;
        }
    }

    ticker.stop();
    Ok(())
}
