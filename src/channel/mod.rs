//! Interactive channel layer.
//!
//! This module drives the controller CLI over a raw byte-stream shell:
//! login negotiation, prompt-bounded command capture, and the pattern
//! buffer both are built on. The shell itself is abstracted behind
//! [`ShellStream`] so the protocol logic is independent of the SSH
//! transport.

mod buffer;
mod negotiate;
mod runner;

pub use buffer::{clean, PatternBuffer};
pub use negotiate::negotiate;
pub use runner::{run_command, run_sequence};

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;

use crate::error::Result;

/// A byte-stream shell channel delivering unframed, asynchronous output.
///
/// `read_chunk` is a bounded poll: it resolves with `Some(chunk)` as soon as
/// data arrives, with `None` when `wait` elapses without data, and with an
/// error when the channel is closed or the transport fails. `send_line`
/// appends the line terminator.
pub trait ShellStream: Send {
    /// Poll the channel for the next chunk of output.
    fn read_chunk(
        &mut self,
        wait: Duration,
    ) -> impl Future<Output = Result<Option<Bytes>>> + Send;

    /// Send one line of input, terminated.
    fn send_line(&mut self, line: &str) -> impl Future<Output = Result<()>> + Send;
}
