//! Module `control`
//!
//! Line-oriented control channel: sends commands and reads replies,
//! folding multi-line replies into their terminating line.

use log::debug;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::ControlError;
use crate::protocol::{Command, ServerResponse, multiline_terminator, parse_response};

/// Reply line limit used when none is configured
pub const DEFAULT_MAX_LINE_LEN: usize = 2048;

/// Control connection to an FTP server.
///
/// Bytes of a reply line that arrive across a timed-out read stay in
/// `pending` and are completed by the next read.
pub struct ControlChannel {
    reader: BufReader<TcpStream>,
    pending: Vec<u8>,
    terminator: Option<String>,
    max_line_len: usize,
}

impl ControlChannel {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_max_line_len(stream, DEFAULT_MAX_LINE_LEN)
    }

    /// Channel that rejects reply lines longer than `max_line_len` bytes
    pub fn with_max_line_len(stream: TcpStream, max_line_len: usize) -> Self {
        Self {
            reader: BufReader::new(stream),
            pending: Vec::new(),
            terminator: None,
            max_line_len,
        }
    }

    /// Write one newline-terminated command
    pub async fn send(&mut self, command: &Command) -> Result<(), ControlError> {
        debug!("--> {}", command.redacted());
        let stream = self.reader.get_mut();
        stream.write_all(command.to_wire().as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Send a command and read its reply
    pub async fn exchange(&mut self, command: &Command) -> Result<ServerResponse, ControlError> {
        self.send(command).await?;
        self.read_response().await
    }

    /// Read one complete reply, blocking until it arrives
    pub async fn read_response(&mut self) -> Result<ServerResponse, ControlError> {
        loop {
            let line = self.read_line().await?;
            debug!("<-- {}", line);

            let closes_block = self
                .terminator
                .as_deref()
                .map(|terminator| line.starts_with(terminator));
            match closes_block {
                Some(true) => {
                    self.terminator = None;
                    return Ok(parse_response(&line)?);
                }
                Some(false) => continue,
                None => match multiline_terminator(&line) {
                    Some(terminator) => self.terminator = Some(terminator),
                    None => return Ok(parse_response(&line)?),
                },
            }
        }
    }

    /// Read one reply if it arrives within `window`.
    ///
    /// `Ok(None)` means the window elapsed with no complete reply.
    pub async fn read_response_within(
        &mut self,
        window: Duration,
    ) -> Result<Option<ServerResponse>, ControlError> {
        match tokio::time::timeout(window, self.read_response()).await {
            Ok(result) => result.map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Next line with its terminator stripped.
    async fn read_line(&mut self) -> Result<String, ControlError> {
        // read_until appends to `pending` and is cancel safe
        let remaining = self.max_line_len.saturating_sub(self.pending.len()) as u64;
        let n = (&mut self.reader)
            .take(remaining)
            .read_until(b'\n', &mut self.pending)
            .await?;
        if n == 0 && self.pending.is_empty() {
            return Err(ControlError::Closed);
        }
        if !self.pending.ends_with(b"\n") && self.pending.len() >= self.max_line_len {
            self.pending.clear();
            return Err(ControlError::LineTooLong(self.max_line_len));
        }

        let raw = std::mem::take(&mut self.pending);
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
