//! Prompt-bounded command execution.
//!
//! There is no framing on the channel: the only signal that a command has
//! finished is the authenticated prompt showing up again in freshly received
//! output. Each command's output is captured into its own accumulator and
//! the per-command deadline bounds the poll loop.

use log::{debug, trace};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::RunLimits;
use crate::error::{ChannelError, Error, Result};
use crate::platform::CliGrammar;

use super::{clean, ShellStream};

/// Send one command and capture output until the prompt returns.
///
/// Completion is detected on the freshly received chunk, not the accumulated
/// buffer: the prompt already sitting in earlier output (the echo of a
/// previous prompt, say) must not end the capture early.
pub async fn run_command<S: ShellStream>(
    shell: &mut S,
    grammar: &CliGrammar,
    command: &str,
    limits: &RunLimits,
    cancel: &CancellationToken,
) -> Result<String> {
    debug!("sending command {command:?}");
    shell.send_line(command).await?;

    let deadline = Instant::now() + limits.command_timeout;
    let mut captured = Vec::new();

    loop {
        if cancel.is_cancelled() {
            return Err(ChannelError::Cancelled.into());
        }
        if Instant::now() >= deadline {
            return Err(ChannelError::CommandTimeout {
                command: command.to_owned(),
                timeout: limits.command_timeout,
            }
            .into());
        }

        let Some(chunk) = shell.read_chunk(limits.poll_interval).await? else {
            continue;
        };

        let cleaned = clean(&chunk);
        let finished = grammar.prompt.is_match(&cleaned);
        captured.extend_from_slice(&cleaned);
        trace!("command {command:?}: +{} bytes", cleaned.len());

        if finished {
            debug!("command {command:?} completed, {} bytes", captured.len());
            return Ok(String::from_utf8_lossy(&captured).into_owned());
        }
    }
}

/// Run the grammar's full command sequence and return the joined transcript.
///
/// Setup and collection commands are prompt-bounded; the close command is
/// sent last and the channel is drained until the remote side closes it or
/// the drain deadline passes; a close here is normal termination.
pub async fn run_sequence<S: ShellStream>(
    shell: &mut S,
    grammar: &CliGrammar,
    limits: &RunLimits,
    cancel: &CancellationToken,
) -> Result<String> {
    let mut transcript = String::new();

    for command in grammar
        .on_open_commands
        .iter()
        .chain(grammar.collect_commands)
    {
        transcript.push_str(&run_command(shell, grammar, command, limits, cancel).await?);
    }

    debug!("sending close command {:?}", grammar.close_command);
    shell.send_line(grammar.close_command).await?;
    drain(shell, limits, cancel, &mut transcript).await?;

    Ok(transcript)
}

/// Collect whatever the device still emits after the close command.
async fn drain<S: ShellStream>(
    shell: &mut S,
    limits: &RunLimits,
    cancel: &CancellationToken,
    transcript: &mut String,
) -> Result<()> {
    let deadline = Instant::now() + limits.drain_timeout;

    loop {
        if cancel.is_cancelled() || Instant::now() >= deadline {
            return Ok(());
        }
        match shell.read_chunk(limits.poll_interval).await {
            Ok(Some(chunk)) => {
                transcript.push_str(&String::from_utf8_lossy(&clean(&chunk)));
            }
            Ok(None) => {}
            Err(Error::Channel(ChannelError::Closed)) => return Ok(()),
            Err(other) => return Err(other),
        }
    }
}
