//! SSH transport implementation using russh.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use log::debug;
use russh::client::{self, Handle, Msg};
use russh::keys::PublicKey;
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use crate::channel::ShellStream;
use crate::error::{ChannelError, Result, TransportError};

use super::config::SshConfig;

/// SSH transport wrapping a russh client session.
pub struct SshTransport {
    session: Handle<SshHandler>,
    config: SshConfig,
}

impl SshTransport {
    /// Connect to the controller and authenticate.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let ssh_config = Arc::new(client::Config::default());

        let mut session = tokio::time::timeout(
            config.connect_timeout,
            client::connect(
                ssh_config,
                (config.host.as_str(), config.port),
                SshHandler,
            ),
        )
        .await
        .map_err(|_| TransportError::ConnectTimeout {
            host: config.host.clone(),
            port: config.port,
            timeout: config.connect_timeout,
        })?
        .map_err(|source| TransportError::ConnectionFailed {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;

        let authenticated = session
            .authenticate_password(&config.username, config.password.expose_secret())
            .await
            .map_err(TransportError::Ssh)?
            .success();

        if !authenticated {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        debug!("{}: SSH session established", config.host);
        Ok(Self { session, config })
    }

    /// Open the interactive PTY shell channel.
    pub async fn open_shell(&self) -> Result<SshShell> {
        let channel = self
            .session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_pty(
                true,
                "xterm",
                self.config.terminal_width,
                self.config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_shell(true)
            .await
            .map_err(TransportError::Ssh)?;

        Ok(SshShell { channel })
    }

    /// Close the connection.
    pub async fn close(self) -> Result<()> {
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// The PTY shell channel of one session.
pub struct SshShell {
    channel: Channel<Msg>,
}

impl ShellStream for SshShell {
    async fn read_chunk(&mut self, wait: Duration) -> Result<Option<Bytes>> {
        match tokio::time::timeout(wait, self.channel.wait()).await {
            // No channel event within this poll
            Err(_) => Ok(None),
            Ok(None) => Err(ChannelError::Closed.into()),
            Ok(Some(msg)) => match msg {
                ChannelMsg::Data { ref data } | ChannelMsg::ExtendedData { ref data, .. } => {
                    Ok(Some(Bytes::copy_from_slice(data)))
                }
                ChannelMsg::Eof | ChannelMsg::Close => Err(ChannelError::Closed.into()),
                // Window adjusts, exit status and the like carry no output
                _ => Ok(None),
            },
        }
    }

    async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut framed = String::with_capacity(line.len() + 1);
        framed.push_str(line);
        framed.push('\n');
        self.channel
            .data(framed.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }
}

/// Client handler that accepts any host key.
struct SshHandler;

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(true)
    }
}
