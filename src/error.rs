//! Error types for flexcount.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for flexcount operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Startup configuration errors (credentials, host list)
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Interactive channel errors (login negotiation, command capture)
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Report sink errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Startup configuration errors. These abort the run before any
/// connection is attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential environment variable is not set
    #[error("environment variable {name} is not set")]
    MissingCredential { name: &'static str },

    /// The host list file could not be read
    #[error("cannot read host list {path}: {source}")]
    HostList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("connection to {host}:{port} failed: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: russh::Error,
    },

    /// Connection attempt exceeded the configured timeout
    #[error("connection to {host}:{port} timed out after {timeout:?}")]
    ConnectTimeout {
        host: String,
        port: u16,
        timeout: Duration,
    },

    /// SSH-level authentication was rejected
    #[error("authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH protocol error
    #[error("SSH error: {0}")]
    Ssh(russh::Error),
}

/// Interactive channel errors (prompt negotiation, command execution).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The remote side closed the channel
    #[error("channel closed by remote side")]
    Closed,

    /// Login negotiation did not reach an authenticated prompt in time
    #[error("login negotiation timed out after {0:?}")]
    LoginTimeout(Duration),

    /// No prompt followed a command within the per-command deadline
    #[error("no prompt after {command:?} within {timeout:?}")]
    CommandTimeout { command: String, timeout: Duration },

    /// The run was cancelled while the session was in flight
    #[error("session cancelled")]
    Cancelled,

    /// SSH protocol error on the channel
    #[error("channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Report sink errors, reported once after aggregation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O failure on a file-backed sink
    #[error("cannot write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Spreadsheet sink failure
    #[error("spreadsheet error: {0}")]
    Spreadsheet(rust_xlsxwriter::XlsxError),

    /// Relational sink failure
    #[error("database error: {0}")]
    Database(rusqlite::Error),
}

/// Result type alias using flexcount's Error.
pub type Result<T> = std::result::Result<T, Error>;
