//! Client session
//!
//! Runs one complete copy: prepares the local file, connects, logs in and
//! hands the control channel to the transfer engine.

use log::info;

use crate::auth::login;
use crate::client::plan::{RemoteTarget, TransferDirection, TransferPlan};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transfer::{
    ControlChannel, LocalSink, TransferType, open_connection, open_source, retrieve, store,
};

/// Everything a single copy needs
#[derive(Clone)]
pub struct Invocation {
    pub plan: TransferPlan,
    pub port: u16,
    pub password: String,
    pub transfer_type: TransferType,
}

/// Perform the copy described by `invocation`, returning bytes transferred.
///
/// The local file is opened before any network activity. Sockets and
/// files are released on every path out of this function.
pub async fn run(invocation: &Invocation, config: &ClientConfig) -> Result<u64, ClientError> {
    let plan = &invocation.plan;
    info!(
        "Starting {} of {} ({} mode)",
        plan.direction, plan.remote, invocation.transfer_type
    );

    match plan.direction {
        TransferDirection::Download => download(invocation, config).await,
        TransferDirection::Upload => upload(invocation, config).await,
    }
}

async fn download(invocation: &Invocation, config: &ClientConfig) -> Result<u64, ClientError> {
    let plan = &invocation.plan;
    let mut sink = LocalSink::create(&plan.local_path, config.keep_partial_downloads).await?;

    let result = async {
        let mut control = connect(&plan.remote, invocation, config).await?;
        let received = retrieve(
            &mut control,
            invocation.transfer_type,
            &plan.remote.path,
            sink.writer(),
            config,
        )
        .await?;
        Ok::<u64, ClientError>(received)
    }
    .await;

    match result {
        Ok(received) => {
            sink.commit().await?;
            Ok(received)
        }
        Err(e) => {
            sink.discard().await;
            Err(e)
        }
    }
}

async fn upload(invocation: &Invocation, config: &ClientConfig) -> Result<u64, ClientError> {
    let plan = &invocation.plan;
    let mut source = open_source(&plan.local_path).await?;

    let mut control = connect(&plan.remote, invocation, config).await?;
    let sent = store(
        &mut control,
        invocation.transfer_type,
        &mut source,
        &plan.remote.path,
        config,
    )
    .await?;
    Ok(sent)
}

async fn connect(
    remote: &RemoteTarget,
    invocation: &Invocation,
    config: &ClientConfig,
) -> Result<ControlChannel, ClientError> {
    let stream = open_connection(&remote.host, invocation.port, config.connect_timeout()).await?;
    let mut control = ControlChannel::with_max_line_len(stream, config.max_line_len);
    login(&mut control, &remote.user, &invocation.password).await?;
    Ok(control)
}
