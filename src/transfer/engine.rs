//! Module `engine`
//!
//! Drives one passive-mode transfer on an authenticated control channel:
//! TYPE, PASV, RETR or STOR, a bounded wait for an early rejection, then
//! the data channel copy and the completion reply.

use log::{debug, info, warn};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use crate::config::ClientConfig;
use crate::error::{ControlError, TransferError};
use crate::protocol::{Command, DataEndpoint, ServerResponse, Verdict, classify, parse_pasv};
use crate::transfer::connection::open_connection;
use crate::transfer::control::ControlChannel;
use crate::transfer::file_ops::copy_stream;
use crate::transfer::modes::TransferType;

/// Download `remote_path` into `sink`, returning the number of bytes received.
///
/// `sink` must already be open; it is flushed but not closed here.
pub async fn retrieve<W>(
    control: &mut ControlChannel,
    kind: TransferType,
    remote_path: &str,
    sink: &mut W,
    config: &ClientConfig,
) -> Result<u64, TransferError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let endpoint = preamble(control, kind).await?;
    let command = Command::RETR(remote_path.to_string());
    control.send(&command).await?;
    let early = await_early_rejection(control, &command, config.early_reply_window()).await?;

    let mut data = open_connection(&endpoint.host, endpoint.port, config.connect_timeout())
        .await
        .map_err(TransferError::DataConnect)?;
    info!("Receiving {} from {}", remote_path, endpoint);

    let received = copy_stream(&mut data, sink, config.buffer_size).await?;
    drop(data);

    if needs_completion(early.as_ref()) {
        await_completion(control, &command, config.completion_window()).await?;
    }

    info!("Download of {} complete ({} bytes)", remote_path, received);
    Ok(received)
}

/// Upload everything readable from `source` to `remote_path`, returning
/// the number of bytes sent.
pub async fn store<R>(
    control: &mut ControlChannel,
    kind: TransferType,
    source: &mut R,
    remote_path: &str,
    config: &ClientConfig,
) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let endpoint = preamble(control, kind).await?;
    let command = Command::STOR(remote_path.to_string());
    control.send(&command).await?;
    let early = await_early_rejection(control, &command, config.early_reply_window()).await?;

    let mut data = open_connection(&endpoint.host, endpoint.port, config.connect_timeout())
        .await
        .map_err(TransferError::DataConnect)?;
    info!("Sending {} to {}", remote_path, endpoint);

    let sent = copy_stream(source, &mut data, config.buffer_size).await?;
    // the server only confirms STOR once it sees EOF
    data.shutdown().await?;
    drop(data);

    if needs_completion(early.as_ref()) {
        await_completion(control, &command, config.completion_window()).await?;
    }

    info!("Upload of {} complete ({} bytes)", remote_path, sent);
    Ok(sent)
}

/// TYPE + PASV, yielding the data endpoint
async fn preamble(
    control: &mut ControlChannel,
    kind: TransferType,
) -> Result<DataEndpoint, TransferError> {
    let command = Command::TYPE(kind);
    let reply = control.exchange(&command).await?;
    accept_preamble(&command, &reply)?;

    let command = Command::PASV;
    let reply = control.exchange(&command).await?;
    accept_preamble(&command, &reply)?;

    let endpoint = parse_pasv(&reply.message).map_err(TransferError::MalformedPasv)?;
    debug!("Passive data endpoint {}", endpoint);
    Ok(endpoint)
}

fn accept_preamble(command: &Command, reply: &ServerResponse) -> Result<(), TransferError> {
    match classify(reply) {
        Verdict::Accepted => Ok(()),
        Verdict::Rejected { code, message } => Err(TransferError::Preamble {
            command: command.name(),
            code,
            message,
        }),
    }
}

fn reject_command(command: &Command, reply: &ServerResponse) -> Result<(), TransferError> {
    match classify(reply) {
        Verdict::Accepted => Ok(()),
        Verdict::Rejected { code, message } => Err(TransferError::CommandRejected {
            command: command.name(),
            code,
            message,
        }),
    }
}

/// Give the server `window` to refuse the command on the control channel
/// before the data channel is opened. Silence means proceed.
async fn await_early_rejection(
    control: &mut ControlChannel,
    command: &Command,
    window: Duration,
) -> Result<Option<ServerResponse>, TransferError> {
    match control.read_response_within(window).await? {
        Some(reply) => {
            reject_command(command, &reply)?;
            debug!("{} accepted early: {}", command.name(), reply);
            Ok(Some(reply))
        }
        None => {
            debug!(
                "No reply to {} within {:?}, opening data channel",
                command.name(),
                window
            );
            Ok(None)
        }
    }
}

/// A final (non-1xx) early reply already settled the command
fn needs_completion(early: Option<&ServerResponse>) -> bool {
    early.is_none_or(ServerResponse::is_preliminary)
}

/// Wait for the final reply to RETR/STOR, skipping preliminaries.
///
/// The data channel has already reached EOF by now, so a missing reply
/// is tolerated with a warning.
async fn await_completion(
    control: &mut ControlChannel,
    command: &Command,
    window: Duration,
) -> Result<(), TransferError> {
    let deadline = Instant::now() + window;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match control.read_response_within(remaining).await {
            Ok(Some(reply)) if reply.is_preliminary() => continue,
            Ok(Some(reply)) => return reject_command(command, &reply),
            Ok(None) => {
                warn!(
                    "No completion reply to {} within {:?}",
                    command.name(),
                    window
                );
                return Ok(());
            }
            Err(ControlError::Closed) => {
                warn!(
                    "Control connection closed before {} completed",
                    command.name()
                );
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
}
