//! Login negotiation over the interactive shell.
//!
//! The controller authenticates in-band: after the SSH channel opens it
//! prints `User:` and `Password:` prompts mixed with banner text, all
//! unframed on the same stream. The negotiator polls the channel, answers
//! each marker it sees, and succeeds once the authenticated prompt shows up.

use log::{debug, trace};
use secrecy::ExposeSecret;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::{Credentials, RunLimits};
use crate::error::{ChannelError, Result};
use crate::platform::CliGrammar;

use super::{PatternBuffer, ShellStream};

/// Drive the login handshake until the authenticated prompt appears.
///
/// Each poll appends received bytes to an accumulating buffer and runs three
/// independent checks: the username marker and password marker are answered
/// and clear the buffer (followed by a settle delay the controller needs);
/// the authenticated-prompt pattern ends the negotiation. The buffer is
/// returned without clearing so trailing content stays available.
///
/// The loop is bounded by `limits.login_timeout` and by the cancellation
/// token; a silent or looping peer fails instead of holding its slot forever.
pub async fn negotiate<S: ShellStream>(
    shell: &mut S,
    grammar: &CliGrammar,
    credentials: &Credentials,
    limits: &RunLimits,
    cancel: &CancellationToken,
) -> Result<PatternBuffer> {
    let deadline = Instant::now() + limits.login_timeout;
    let mut buffer = PatternBuffer::default();

    loop {
        if cancel.is_cancelled() {
            return Err(ChannelError::Cancelled.into());
        }
        if Instant::now() >= deadline {
            return Err(ChannelError::LoginTimeout(limits.login_timeout).into());
        }

        let Some(chunk) = shell.read_chunk(limits.poll_interval).await? else {
            continue;
        };
        buffer.extend(&chunk);
        trace!("login buffer: {} bytes", buffer.len());

        // The three triggers are checked independently on every poll; a
        // marker match consumes the buffer, so later checks in the same
        // poll see the post-answer state.
        if buffer.contains(grammar.username_prompt) {
            debug!("answering username prompt");
            shell.send_line(&credentials.username).await?;
            buffer.clear();
            tokio::time::sleep(limits.settle_delay).await;
        }

        if buffer.contains(grammar.password_prompt) {
            debug!("answering password prompt");
            shell
                .send_line(credentials.password.expose_secret())
                .await?;
            buffer.clear();
            tokio::time::sleep(limits.settle_delay).await;
        }

        if buffer.tail_matches(&grammar.prompt) {
            debug!("authenticated prompt reached");
            return Ok(buffer);
        }
    }
}
