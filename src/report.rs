//! Output channel for remote failures.
//!
//! Remote failures do not abort the caller. The failing operation hands the
//! error to an [`ErrorReporter`] and returns an empty result, so interactive
//! callers can carry on.

use crate::connection::params::OutputOptions;
use crate::error::RemoteError;
use nu_ansi_term::Style;
use std::io::Write;

/// Receives every remote failure observed by a session.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &RemoteError);
}

/// Format a remote failure as `Error: [code:errorNum] message`.
pub fn format_error(error: &RemoteError, color: bool) -> String {
    let prefix = if color {
        Style::new().bold().paint("Error: ").to_string()
    } else {
        "Error: ".to_string()
    };

    format!(
        "{}[{}:{}] {}",
        prefix,
        error.code(),
        error.error_num(),
        error.message()
    )
}

/// Writes reported errors to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(options: OutputOptions) -> Self {
        Self {
            color: options.color,
        }
    }
}

impl ErrorReporter for ConsoleReporter {
    fn report(&self, error: &RemoteError) {
        let line = format_error(error, self.color);
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}
