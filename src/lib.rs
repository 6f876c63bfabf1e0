//! monkeytest - disk write and random-read throughput benchmark
//!
//! Creates a scratch file, fills it with random blocks while timing each
//! flushed write, then reads back randomly ordered blocks and times each read.

use thiserror::Error;

pub mod app;
pub mod bench;
pub mod config;
pub mod io;
pub mod models;
pub mod util;

/// Errors surfaced by the benchmark engine and its front-ends
#[derive(Debug, Error)]
pub enum MonkeyError {
    /// Invalid benchmark parameters or settings file
    #[error("Configuration error: {0}")]
    Config(String),
    /// An I/O call failed for a reason other than a clean end of file
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// No samples or zero elapsed time, so throughput is undefined
    #[error("Degenerate result: {0}")]
    DegenerateResult(String),
    /// Result serialization failed
    #[error("Export error: {0}")]
    Export(String),
    /// The blocking benchmark worker did not finish
    #[error("Benchmark error: {0}")]
    Benchmark(String),
    /// Terminal UI setup or rendering failed
    #[error("TUI error: {0}")]
    Tui(String),
}

impl MonkeyError {
    /// Build a mapper that wraps an `io::Error` with what was being attempted.
    ///
    /// ```
    /// use monkeytest::MonkeyError;
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    /// let wrapped = MonkeyError::io("opening scratch file")(err);
    /// assert!(wrapped.to_string().contains("opening scratch file"));
    /// ```
    pub fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| MonkeyError::Io { context, source }
    }

    /// The underlying OS error kind, if this is an I/O failure
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            MonkeyError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MonkeyError {
    fn from(source: std::io::Error) -> Self {
        MonkeyError::Io {
            context: "performing I/O".to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for MonkeyError {
    fn from(err: serde_json::Error) -> Self {
        MonkeyError::Export(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for MonkeyError {
    fn from(err: toml::de::Error) -> Self {
        MonkeyError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for MonkeyError {
    fn from(err: toml::ser::Error) -> Self {
        MonkeyError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for monkeytest operations
pub type Result<T> = std::result::Result<T, MonkeyError>;

/// Error presentation helpers for front-ends
pub mod error {
    use super::MonkeyError;
    use std::io::ErrorKind;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &MonkeyError) -> String {
        match error {
            MonkeyError::Io { source, .. } if source.kind() == ErrorKind::PermissionDenied => {
                "Permission denied. Choose a scratch file location you can write to.".to_string()
            }
            MonkeyError::Io { source, .. } if source.kind() == ErrorKind::NotFound => {
                "Scratch file location does not exist. Check the directory part of the path."
                    .to_string()
            }
            MonkeyError::Io { source, .. } if is_out_of_space(source) => {
                "Insufficient disk space. Free up space or choose a smaller total size.".to_string()
            }
            MonkeyError::Config(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            MonkeyError::DegenerateResult(_) => {
                "The run finished too quickly to measure. Try a larger total size.".to_string()
            }
            MonkeyError::Export(_) => {
                "Failed to write JSON results. Check the output path and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }

    fn is_out_of_space(err: &std::io::Error) -> bool {
        // ENOSPC on unix, ERROR_DISK_FULL on windows
        matches!(err.raw_os_error(), Some(28) | Some(112))
    }
}

// Common types and constants
pub const APP_NAME: &str = "monkeytest";
pub const CONFIG_FILE: &str = "monkeytest.toml";
pub const DEFAULT_FILE_PATH: &str = "/tmp/monkeytest";
pub const DEFAULT_TOTAL_MB: u64 = 128;
pub const DEFAULT_WRITE_BLOCK_KB: u64 = 1024;
pub const DEFAULT_READ_BLOCK_BYTES: u64 = 512;

/// Printed after the CLI report.
// Text-image by Mic Barendsz (mic aka miK), ascii-art.de/ascii/mno/monkey.txt
pub const BANNER: &str = r#"Brought to you by coding monkeys.
Eat bananas, drink coffee & enjoy!
                 _
               ,//)
               ) /
              / /
        _,^^,/ /
       (G,66<_/
       _/\_,_)    _
      / _    \  ,' )
     / /"\    \/  ,_\
  __(,/   >  e ) / (_\.oO
  \_ /   (   -,_/    \_/
    U     \_, _)
           (  /
            >/
           (.oO
"#;
