//! # Output Configuration
//!
//! User-facing status lines for the CLI. Logging (`log`/`env_logger`) goes
//! to stderr and is meant for diagnostics; the [`Reporter`] writes the short
//! summary a user reads on stdout.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Without color, markers fall back to plain tags such as `[OK]`.

use std::env;

use console::style;

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Info => "🔍",
            Status::Success => "✅",
            Status::Warning => "⚠️",
            Status::Error => "❌",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Info => "[INFO]",
            Status::Success => "[OK]",
            Status::Warning => "[WARN]",
            Status::Error => "[ERR]",
        }
    }
}

/// Resolve the `--color` flag against the environment.
///
/// In auto mode, colors are disabled if `NO_COLOR` is set, `CLICOLOR=0`,
/// `TERM=dumb`, or stdout is not a TTY (unless `CLICOLOR_FORCE=1`).
pub fn color_enabled(color_flag: &str) -> bool {
    match color_flag.to_lowercase().as_str() {
        "always" => true,
        "never" => false,
        _ => detect_color_support(),
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Formats and prints status lines
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    use_color: bool,
}

impl Reporter {
    /// Create a reporter from the `--color` flag value
    pub fn from_flag(color_flag: &str) -> Self {
        Self::new(color_enabled(color_flag))
    }

    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Format a status line without printing it
    pub fn line(&self, status: Status, message: &str) -> String {
        if !self.use_color {
            return format!("{} {}", status.plain(), message);
        }
        let message = match status {
            Status::Success => style(message).green().to_string(),
            Status::Warning => style(message).yellow().to_string(),
            Status::Error => style(message).red().bold().to_string(),
            Status::Info => message.to_string(),
        };
        format!("{} {}", status.emoji(), message)
    }

    /// Print a status line to stdout
    pub fn report(&self, status: Status, message: &str) {
        println!("{}", self.line(status, message));
    }

    /// Print an indented detail line to stdout
    pub fn detail(&self, message: &str) {
        println!("   {}", message);
    }
}
