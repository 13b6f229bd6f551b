//! Per-host connection worker.
//!
//! One worker owns one controller session end-to-end: connect, negotiate the
//! in-band login, run the command sequence, parse the transcript, close.
//! Whatever goes wrong at any stage becomes that host's failure outcome,
//! never an error that escapes to the dispatcher.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::channel::{negotiate, run_sequence, ShellStream};
use crate::config::{Credentials, RunLimits};
use crate::error::Result;
use crate::parse::{parse_transcript, GroupRecord};
use crate::platform::CliGrammar;
use crate::transport::{SshConfig, SshTransport};

/// Shared per-run state handed to every worker.
pub struct RunContext {
    pub credentials: Credentials,
    pub grammar: CliGrammar,
    pub limits: RunLimits,
    pub cancel: CancellationToken,
}

/// Terminal result of one host's processing. Produced exactly once per host.
#[derive(Debug, Clone, Serialize)]
pub struct HostOutcome {
    /// The controller this outcome belongs to.
    pub host: String,

    /// Success with the parsed records, or failure with a cause.
    pub outcome: Outcome,
}

/// The two terminal states of a worker.
#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    /// The session completed; the record list may be empty.
    Success { records: Vec<GroupRecord> },

    /// The session failed; the cause is human-readable and non-empty.
    Failure { cause: String },
}

impl HostOutcome {
    /// Successful outcome with parsed records.
    pub fn success(host: impl Into<String>, records: Vec<GroupRecord>) -> Self {
        Self {
            host: host.into(),
            outcome: Outcome::Success { records },
        }
    }

    /// Failed outcome with a cause.
    pub fn failure(host: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            outcome: Outcome::Failure {
                cause: cause.into(),
            },
        }
    }

    /// Whether the host completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Records collected from this host, empty on failure.
    pub fn records(&self) -> &[GroupRecord] {
        match &self.outcome {
            Outcome::Success { records } => records,
            Outcome::Failure { .. } => &[],
        }
    }
}

impl fmt::Display for HostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success { records } => {
                write!(f, "{}: ok - {} group(s)", self.host, records.len())
            }
            Outcome::Failure { cause } => write!(f, "{}: failed - {}", self.host, cause),
        }
    }
}

/// Process one host to completion. Infallible by contract: every error is
/// converted into a failure outcome at this boundary.
pub async fn collect_host(host: String, ctx: Arc<RunContext>) -> HostOutcome {
    match drive(&host, &ctx).await {
        Ok(records) => HostOutcome::success(host, records),
        Err(err) => HostOutcome::failure(host, err.to_string()),
    }
}

async fn drive(host: &str, ctx: &RunContext) -> Result<Vec<GroupRecord>> {
    debug!("{host}: connecting");
    let transport =
        SshTransport::connect(SshConfig::for_host(host, &ctx.credentials, &ctx.limits)).await?;

    // Run the session, then release the connection on both paths before
    // surfacing the session result.
    let session = session(&transport, ctx).await;
    if let Err(err) = transport.close().await {
        match &session {
            Ok(_) => debug!("{host}: close after logout: {err}"),
            Err(_) => warn!("{host}: close after failed session: {err}"),
        }
    }

    let transcript = session?;
    Ok(parse_transcript(&transcript, host))
}

async fn session(transport: &SshTransport, ctx: &RunContext) -> Result<String> {
    let mut shell = transport.open_shell().await?;
    run_session(&mut shell, ctx).await
}

/// Transport-independent session core: login handshake, then the command
/// sequence, returning the joined transcript.
pub async fn run_session<S: ShellStream>(shell: &mut S, ctx: &RunContext) -> Result<String> {
    negotiate(shell, &ctx.grammar, &ctx.credentials, &ctx.limits, &ctx.cancel).await?;
    run_sequence(shell, &ctx.grammar, &ctx.limits, &ctx.cancel).await
}
