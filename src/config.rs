//! Run configuration: credentials, host list, timing limits.

use std::fs;
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the CLI username.
pub const USERNAME_VAR: &str = "WLC_USERNAME";

/// Environment variable holding the CLI password.
pub const PASSWORD_VAR: &str = "WLC_PASSWORD";

/// Login credentials for both the SSH layer and the in-band prompt handshake.
#[derive(Clone)]
pub struct Credentials {
    /// Username sent at the SSH layer and in reply to the username prompt.
    pub username: String,

    /// Password, kept out of logs and debug output.
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Read credentials from `WLC_USERNAME` / `WLC_PASSWORD`.
    ///
    /// Either variable missing is a startup-fatal error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = get(USERNAME_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential { name: USERNAME_VAR })?;
        let password = get(PASSWORD_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential { name: PASSWORD_VAR })?;
        Ok(Self::new(username, password))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Load the target host list: one address per line, surrounding whitespace
/// trimmed, blank lines skipped. An unreadable file is a startup error; an
/// empty list is valid.
pub fn load_hosts(path: &Path) -> Result<Vec<String>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::HostList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Timing limits for one host session.
///
/// The poll interval and settle delay reproduce the cadence the controller
/// CLI expects; the deadlines bound every poll loop so a silent peer cannot
/// hold a worker slot forever.
#[derive(Debug, Clone)]
pub struct RunLimits {
    /// TCP/SSH connection establishment deadline.
    pub connect_timeout: Duration,

    /// Overall deadline for the login negotiation.
    pub login_timeout: Duration,

    /// Per-command deadline for prompt-bounded output capture.
    pub command_timeout: Duration,

    /// Deadline for draining output after the disconnect command.
    pub drain_timeout: Duration,

    /// How long a single poll waits for channel data.
    pub poll_interval: Duration,

    /// Pause after answering a login prompt.
    pub settle_delay: Duration,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(45),
            command_timeout: Duration::from_secs(30),
            drain_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(500),
            settle_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn credentials_from_source() {
        let vars: HashMap<&str, &str> =
            [(USERNAME_VAR, "admin"), (PASSWORD_VAR, "hunter2")].into();
        let creds = Credentials::from_source(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password.expose_secret(), "hunter2");
    }

    #[test]
    fn credentials_missing_password() {
        let err = Credentials::from_source(|k| {
            (k == USERNAME_VAR).then(|| "admin".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential { name } if name == PASSWORD_VAR
        ));
    }

    #[test]
    fn credentials_empty_value_is_missing() {
        let err = Credentials::from_source(|_| Some(String::new())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn load_hosts_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.1\n\n  10.0.0.2  \n\t\n10.0.0.3").unwrap();

        let hosts = load_hosts(file.path()).unwrap();
        assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn load_hosts_missing_file() {
        let err = load_hosts(Path::new("/nonexistent/wlc_servers.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::HostList { .. }));
    }

    #[test]
    fn empty_host_list_is_valid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_hosts(file.path()).unwrap().is_empty());
    }
}
