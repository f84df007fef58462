use std::io;

use protocol::{
    IdentQuery, READ_CHUNK_LEN, ReplyBuffer, ReplyProgress, Response, format_ident_request,
    parse_ident_reply,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::ExchangeError;
use crate::state::ExchangeState;

const CONNECT_TARGET: &str = "ident::connect";
const REPLY_TARGET: &str = "ident::reply";

/// Drives one query/reply exchange with an identd.
///
/// The exchange owns the reply buffer for exactly one request and records the
/// [`ExchangeState`] it reached, which callers can inspect after
/// [`run`](Self::run) returns.
#[derive(Debug)]
pub struct IdentExchange {
    state: ExchangeState,
    buffer: ReplyBuffer,
}

impl IdentExchange {
    /// Creates an exchange that aborts oversized unterminated replies when `abort` is set.
    #[must_use]
    pub fn new(abort: bool) -> Self {
        Self {
            state: ExchangeState::Idle,
            buffer: ReplyBuffer::with_abort(abort),
        }
    }

    /// State reached so far.
    #[must_use]
    pub const fn state(&self) -> ExchangeState {
        self.state
    }

    /// Opens a TCP connection to the identd at `address:port`.
    ///
    /// Failures are returned unchanged as [`ExchangeError::Io`]; nothing is retried.
    pub async fn connect(&mut self, address: &str, port: u16) -> Result<TcpStream, ExchangeError> {
        self.transition(ExchangeState::Connecting);
        match TcpStream::connect((address, port)).await {
            Ok(stream) => {
                tracing::debug!(
                    target: CONNECT_TARGET,
                    address = %address,
                    port,
                    "connected to identd"
                );
                Ok(stream)
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Sends the query for `query` over `stream` and reads back one reply line.
    ///
    /// Bytes are read in chunks of [`READ_CHUNK_LEN`] until CR LF arrives. On
    /// success the write half is shut down before the line is parsed. When the
    /// abort threshold trips, the stream is dropped without a shutdown. A peer
    /// that closes the connection before terminating its reply yields an
    /// [`io::ErrorKind::UnexpectedEof`] transport error.
    pub async fn run<S>(&mut self, mut stream: S, query: IdentQuery) -> Result<Response, ExchangeError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        self.transition(ExchangeState::AwaitingReply);

        let request = format_ident_request(query);
        if let Err(error) = stream.write_all(request.as_bytes()).await {
            return Err(self.fail(error));
        }
        tracing::trace!(
            target: REPLY_TARGET,
            server_port = query.server_port(),
            client_port = query.client_port(),
            "ident query sent"
        );

        let mut chunk = [0u8; READ_CHUNK_LEN];
        let line = loop {
            let read = match stream.read(&mut chunk).await {
                Ok(0) => {
                    return Err(self.fail(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed before the ident reply was terminated",
                    )));
                }
                Ok(read) => read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(self.fail(error)),
            };

            match self.buffer.push(&chunk[..read]) {
                Ok(ReplyProgress::NeedMore) => {
                    tracing::trace!(
                        target: REPLY_TARGET,
                        read,
                        buffered = self.buffer.len(),
                        "awaiting ident reply terminator"
                    );
                }
                Ok(ReplyProgress::Complete(line)) => break line,
                Err(exceeded) => {
                    self.transition(ExchangeState::Aborted);
                    tracing::warn!(
                        target: REPLY_TARGET,
                        buffered = exceeded.length,
                        limit = exceeded.limit,
                        "ident reply exceeded the abort threshold; dropping connection"
                    );
                    drop(stream);
                    return Err(exceeded.into());
                }
            }
        };

        self.transition(ExchangeState::Complete);
        if let Err(error) = stream.shutdown().await {
            tracing::debug!(
                target: CONNECT_TARGET,
                %error,
                "shutdown after ident reply failed"
            );
        }
        drop(stream);

        tracing::debug!(
            target: REPLY_TARGET,
            length = line.len(),
            "ident reply received"
        );
        parse_ident_reply(&line).map_err(ExchangeError::from)
    }

    /// Connects to `address:port` and runs the exchange for `query`.
    pub async fn perform(
        &mut self,
        address: &str,
        port: u16,
        query: IdentQuery,
    ) -> Result<Response, ExchangeError> {
        let stream = self.connect(address, port).await?;
        self.run(stream, query).await
    }

    fn transition(&mut self, next: ExchangeState) {
        tracing::trace!(
            target: CONNECT_TARGET,
            from = %self.state,
            to = %next,
            "ident exchange state change"
        );
        self.state = next;
    }

    fn fail(&mut self, error: io::Error) -> ExchangeError {
        self.transition(ExchangeState::TransportFailed);
        tracing::debug!(target: CONNECT_TARGET, %error, "ident transport failure");
        ExchangeError::Io(error)
    }
}
