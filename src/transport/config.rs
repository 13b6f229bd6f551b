//! SSH connection configuration.

use std::time::Duration;

use secrecy::SecretString;

use crate::config::{Credentials, RunLimits};

/// SSH connection configuration for one controller.
#[derive(Clone)]
pub struct SshConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// SSH port (default: 22).
    pub port: u16,

    /// Username for SSH-layer authentication.
    pub username: String,

    /// Password for SSH-layer authentication. AireOS prompts again in-band
    /// once the shell opens; the same credentials answer both.
    pub password: SecretString,

    /// Connection establishment timeout.
    pub connect_timeout: Duration,

    /// Terminal width for the PTY.
    pub terminal_width: u32,

    /// Terminal height for the PTY.
    pub terminal_height: u32,
}

impl SshConfig {
    /// Build the configuration for one host from run-wide settings.
    pub fn for_host(host: impl Into<String>, credentials: &Credentials, limits: &RunLimits) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            connect_timeout: limits.connect_timeout,
            terminal_width: 511,
            terminal_height: 24,
        }
    }
}
