#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Arguments are parsed by hand. `GLITCH_DEMO_*` variables provide defaults
//! that explicit flags override; the widget tunables themselves come from
//! `GLITCH_*` (see [`glitch_runtime::config`]) and the flags below override
//! those too.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use glitch_runtime::GlitchConfig;

use crate::error::DemoError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
glitch-demo: scrambling headline and email capture in the terminal

USAGE:
    glitch-demo [OPTIONS]

OPTIONS:
    --seed=N             Seed every RNG for a reproducible run
    --frame-ms=N         Frame interval in milliseconds (default: 16)
    --exit-after-ms=N    Quit automatically after N milliseconds
    --log-file=PATH      Write logs to PATH
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Type            Edit the email
    Backspace       Delete the last character
    Enter           Submit
    Ctrl+R          Restart the form
    Esc / Ctrl+C    Quit

ENVIRONMENT VARIABLES:
    GLITCH_SEED, GLITCH_FRAME_MS, GLITCH_REVEAL_WINDOW, GLITCH_SETTLE_WINDOW,
    GLITCH_REROLL_PROBABILITY, GLITCH_CYCLE_MS, GLITCH_REVERT_MS,
    GLITCH_MAX_CHARS          Widget tunables
    GLITCH_LOG_FILE           Same as --log-file
    GLITCH_LOG                Log filter, e.g. 'debug' (default: info)
    GLITCH_DEMO_EXIT_AFTER_MS Same as --exit-after-ms";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    /// RNG seed override.
    pub seed: Option<u64>,
    /// Frame interval override in milliseconds.
    pub frame_ms: Option<u64>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Log file destination.
    pub log_file: Option<PathBuf>,
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, DemoError> {
        Self::parse_from(env::args().skip(1), |name| env::var(name).ok())
    }

    /// Parse `args` (without the program name), reading defaults through
    /// `lookup`.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, DemoError> {
        let mut opts = Self::default();

        if let Some(val) = lookup("GLITCH_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = lookup("GLITCH_LOG_FILE")
            && !val.trim().is_empty()
        {
            opts.log_file = Some(PathBuf::from(val.trim()));
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_number("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--frame-ms=") {
                        let ms = parse_number("--frame-ms", val)?;
                        if ms == 0 {
                            return Err(DemoError::Usage(
                                "Invalid --frame-ms value: 0".to_string(),
                            ));
                        }
                        opts.frame_ms = Some(ms);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_number("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(DemoError::Usage(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Apply flag overrides on top of an environment-derived config.
    pub fn apply(&self, config: &mut GlitchConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.frame_ms {
            config.frame_interval = Duration::from_millis(ms);
        }
    }

    /// Auto-exit deadline, if enabled.
    #[must_use]
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}

fn parse_number(flag: &str, val: &str) -> Result<u64, DemoError> {
    val.parse()
        .map_err(|_| DemoError::Usage(format!("Invalid {flag} value: {val}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, DemoError> {
        Opts::parse_from(args.iter().map(|s| (*s).to_string()), |_| None)
    }

    fn run(args: &[&str]) -> Opts {
        match parse(args) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run(&[]);
        assert_eq!(opts, Opts::default());
        assert_eq!(opts.exit_after(), None);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = run(&["--seed=7", "--frame-ms=33", "--exit-after-ms=500", "--log-file=g.log"]);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.frame_ms, Some(33));
        assert_eq!(opts.exit_after(), Some(Duration::from_millis(500)));
        assert_eq!(opts.log_file, Some(PathBuf::from("g.log")));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert!(matches!(parse(&["--seed=1", "-h"]), Ok(Command::Help)));
        assert!(matches!(parse(&["--version"]), Ok(Command::Version)));
    }

    #[test]
    fn bad_values_are_usage_errors() {
        assert!(matches!(parse(&["--seed=abc"]), Err(DemoError::Usage(_))));
        assert!(matches!(parse(&["--frame-ms=0"]), Err(DemoError::Usage(_))));
        assert!(matches!(parse(&["--bogus"]), Err(DemoError::Usage(_))));
    }

    #[test]
    fn env_defaults_lose_to_flags() {
        let lookup = |name: &str| match name {
            "GLITCH_DEMO_EXIT_AFTER_MS" => Some("1000".to_string()),
            "GLITCH_LOG_FILE" => Some("env.log".to_string()),
            _ => None,
        };
        let Ok(Command::Run(opts)) =
            Opts::parse_from(["--exit-after-ms=5".to_string()], lookup)
        else {
            panic!("expected Run");
        };
        assert_eq!(opts.exit_after_ms, 5);
        assert_eq!(opts.log_file, Some(PathBuf::from("env.log")));
    }

    #[test]
    fn apply_overrides_config() {
        let mut config = GlitchConfig::default();
        run(&["--seed=3", "--frame-ms=40"]).apply(&mut config);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.frame_interval, Duration::from_millis(40));
    }

    #[test]
    fn help_text_lists_keys() {
        assert!(HELP_TEXT.contains("Ctrl+R"));
        assert!(HELP_TEXT.contains("GLITCH_SEED"));
        assert!(!VERSION.is_empty());
    }
}
