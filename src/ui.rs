//! Terminal reporting for workflow progress.

use console::style;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress and errors.
    #[default]
    Normal,
    /// Errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows progress messages.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Adapter from the workflow's callbacks to the terminal.
///
/// Progress goes to stdout, errors to stderr. Styling follows the usual
/// `NO_COLOR` / non-tty rules via the `console` crate.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    mode: OutputMode,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Informational progress line.
    pub fn message(&self, msg: &str) {
        if !self.mode.shows_progress() {
            return;
        }
        if msg == "Done" {
            println!("{}", style(msg).green());
        } else {
            println!("{}", msg);
        }
    }

    /// Error line.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", style(msg).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_mode_shows_progress() {
        assert!(OutputMode::Normal.shows_progress());
        assert!(!OutputMode::Quiet.shows_progress());
    }

    #[test]
    fn default_mode_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn reporter_construction_carries_mode() {
        let reporter = Reporter::new(OutputMode::Quiet);
        assert_eq!(reporter.mode, OutputMode::Quiet);
    }
}
