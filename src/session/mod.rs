//! RCON protocol session
//!
//! One session is one TCP connection serving one logical operation:
//! connect, authenticate, send one command, read one reply, close. Sessions
//! are never pooled or reused. Every blocking step is bounded by the
//! per-step [`RconTimeout`], and the socket is released on every exit path.

mod state;

pub use state::SessionState;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

use crate::config::RconConfig;
use crate::connection_error::SessionError;
use crate::constants::request_id;
use crate::protocol::{CodecError, Packet, decode_within, write_packet};
use crate::types::{HostName, Password, Port, RconTimeout};

/// A single-use RCON session over `S`
#[derive(Debug)]
pub struct RconSession<S = TcpStream> {
    stream: Option<S>,
    state: SessionState,
    timeout: RconTimeout,
}

impl RconSession<TcpStream> {
    /// Open a TCP connection to `host:port`
    ///
    /// Refused or unreachable maps to [`SessionError::ConnectRefused`]; no
    /// handshake within `timeout` maps to [`SessionError::ConnectTimeout`].
    pub async fn connect(
        host: &HostName,
        port: Port,
        timeout: RconTimeout,
    ) -> Result<Self, SessionError> {
        let connect = TcpStream::connect((host.as_str(), port.get()));

        let stream = match time::timeout(timeout.as_duration(), connect).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(SessionError::ConnectRefused {
                    host: host.to_string(),
                    port: port.get(),
                    source,
                });
            }
            Err(_) => {
                return Err(SessionError::ConnectTimeout {
                    host: host.to_string(),
                    port: port.get(),
                    timeout: timeout.as_duration(),
                });
            }
        };

        // Small request/reply frames
        stream.set_nodelay(true)?;
        debug!(
            "RCON {}:{} {} -> {}",
            host,
            port,
            SessionState::Disconnected,
            SessionState::Connected
        );

        Ok(Self::from_stream(stream, timeout))
    }
}

impl<S> RconSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an already-connected stream; the session starts in `Connected`
    pub fn from_stream(stream: S, timeout: RconTimeout) -> Self {
        Self {
            stream: Some(stream),
            state: SessionState::Connected,
            timeout,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Send the login packet and wait for its reply
    ///
    /// The login is accepted iff the reply's request id equals the login
    /// request id. The reply's packet type is not checked; servers are only
    /// correlated by id. A rejected password (id `-1`) or no reply in time
    /// fails with an authentication error and closes the session.
    pub async fn authenticate(&mut self, password: &Password) -> Result<(), SessionError> {
        if !self.state.can_authenticate() {
            return Err(self.invalid_state("authenticate"));
        }

        let timeout = self.timeout.as_duration();
        let reply = match self.exchange(&Packet::auth(password.as_str())).await {
            Ok(reply) => reply,
            Err(ExchangeError::TimedOut) => {
                return Err(self.fail(SessionError::AuthTimeout { timeout }).await);
            }
            Err(ExchangeError::Session(e)) => return Err(self.fail(e).await),
        };

        if reply.request_id != request_id::AUTH {
            debug!(
                "RCON login rejected: id={} type={}",
                reply.request_id, reply.packet_type
            );
            return Err(self
                .fail(SessionError::AuthRejected {
                    request_id: reply.request_id,
                })
                .await);
        }

        debug!("RCON authenticated (reply type {})", reply.packet_type);
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Send `command` and return the raw reply body
    ///
    /// Exactly one reply packet is read. The session is closed afterwards,
    /// whatever the result.
    pub async fn execute(&mut self, command: &str) -> Result<String, SessionError> {
        if !self.state.can_execute() {
            return Err(self.invalid_state("execute"));
        }
        self.state = SessionState::Executing;

        let timeout = self.timeout.as_duration();
        let reply = match self.exchange(&Packet::command(command)).await {
            Ok(reply) => reply,
            Err(ExchangeError::TimedOut) => {
                return Err(self.fail(SessionError::CommandTimeout { timeout }).await);
            }
            Err(ExchangeError::Session(e)) => return Err(self.fail(e).await),
        };

        if reply.request_id != request_id::COMMAND {
            return Err(self
                .fail(SessionError::MismatchedId {
                    expected: request_id::COMMAND,
                    actual: reply.request_id,
                    body: reply.body,
                })
                .await);
        }

        debug!("RCON reply to {:?}: {:?}", command, reply.body);
        self.close().await;
        Ok(reply.body)
    }

    /// Release the socket; idempotent
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take()
            && let Err(e) = stream.shutdown().await
        {
            debug!("RCON shutdown error (ignored): {}", e);
        }
        self.state = SessionState::Closed;
    }

    /// Write `packet` and read one reply, both within the step timeout
    async fn exchange(&mut self, packet: &Packet) -> Result<Packet, ExchangeError> {
        let timeout = self.timeout.as_duration();
        let state = self.state;
        let stream = self.stream.as_mut().ok_or(ExchangeError::Session(
            SessionError::InvalidState {
                operation: "exchange",
                state,
            },
        ))?;

        match time::timeout(timeout, write_packet(stream, packet)).await {
            Ok(result) => result.map_err(|e| ExchangeError::Session(e.into()))?,
            Err(_) => return Err(ExchangeError::TimedOut),
        }

        decode_within(stream, timeout).await.map_err(|e| match e {
            CodecError::TimedOut => ExchangeError::TimedOut,
            other => ExchangeError::Session(other.into()),
        })
    }

    /// Close the session and hand back `err`
    async fn fail(&mut self, err: SessionError) -> SessionError {
        self.close().await;
        err
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

/// Failure of one write-then-read exchange
enum ExchangeError {
    /// The step deadline expired before a reply started arriving
    TimedOut,
    Session(SessionError),
}

/// Run one full session: connect, authenticate, execute `command`, close
///
/// Returns the raw reply body. No retries.
pub async fn run_command(config: &RconConfig, command: &str) -> Result<String, SessionError> {
    let mut session = RconSession::connect(&config.host, config.port, config.timeout).await?;
    session.authenticate(&config.password).await?;
    session.execute(command).await
}

#[cfg(test)]
mod tests;
