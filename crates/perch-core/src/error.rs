//! Error type shared by the core and the platform crates.

use thiserror::Error;

/// Errors surfaced by shell-integration operations.
///
/// Only [`Error::HostWindowUnavailable`] is fatal. Transient failures
/// on foreign windows are swallowed where they happen and never reach
/// this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The host window's native handle could not be resolved.
    #[error("cannot obtain the native host window handle")]
    HostWindowUnavailable,
    /// An OS call failed.
    #[error("{op} failed: {message}")]
    Platform { op: &'static str, message: String },
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps an OS error with the name of the call that produced it.
    pub fn platform(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Platform {
            op,
            message: err.to_string(),
        }
    }

    /// Returns whether this error must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::HostWindowUnavailable)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Passes fatal errors on and logs the rest, so a failed cosmetic step
/// does not stop the toolbar.
pub fn warn_unless_fatal(result: Result<()>, what: &str) -> Result<()> {
    match result {
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!("{what} failed: {e}");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_names_the_call() {
        let err = Error::platform("SetWindowRgn", "access denied");

        assert_eq!(err.to_string(), "SetWindowRgn failed: access denied");
        assert!(!err.is_fatal());
    }

    #[test]
    fn missing_host_window_is_fatal() {
        assert!(Error::HostWindowUnavailable.is_fatal());
    }

    #[test]
    fn only_fatal_errors_survive_the_warning_filter() {
        let shaped = Err(Error::platform("SetWindowRgn", "invalid window"));
        let orphaned = Err(Error::HostWindowUnavailable);

        assert!(warn_unless_fatal(shaped, "pill region").is_ok());
        assert!(matches!(
            warn_unless_fatal(orphaned, "pill region"),
            Err(Error::HostWindowUnavailable)
        ));
        assert!(warn_unless_fatal(Ok(()), "pill region").is_ok());
    }
}
