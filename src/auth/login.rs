//! Session authenticator
//!
//! Runs the greeting / USER / PASS exchange on a fresh control channel.
//! Credentials travel in plaintext, as plain FTP requires.

use log::info;

use crate::error::{AuthError, AuthStage, ControlError};
use crate::protocol::responses::LOGGED_IN;
use crate::protocol::{Command, ServerResponse, Verdict, classify};
use crate::transfer::ControlChannel;

/// Log in as `user`. The first rejected stage ends the session; nothing is retried.
pub async fn login(control: &mut ControlChannel, user: &str, pass: &str) -> Result<(), AuthError> {
    // 120 means "ready in n minutes"; the real greeting follows
    let mut greeting = read_greeting(control).await?;
    while greeting.is_preliminary() {
        info!("Server not ready yet: {}", greeting);
        greeting = read_greeting(control).await?;
    }
    accept(AuthStage::Greeting, &greeting)?;

    let reply = control
        .exchange(&Command::USER(user.to_string()))
        .await
        .map_err(|source| channel_error(AuthStage::User, source))?;
    accept(AuthStage::User, &reply)?;

    // Some servers admit the user without a password
    if reply.code == LOGGED_IN {
        info!("Logged in as {} (no password requested)", user);
        return Ok(());
    }

    let reply = control
        .exchange(&Command::PASS(pass.to_string()))
        .await
        .map_err(|source| channel_error(AuthStage::Pass, source))?;
    accept(AuthStage::Pass, &reply)?;

    info!("Logged in as {}", user);
    Ok(())
}

async fn read_greeting(control: &mut ControlChannel) -> Result<ServerResponse, AuthError> {
    control
        .read_response()
        .await
        .map_err(|source| channel_error(AuthStage::Greeting, source))
}

fn accept(stage: AuthStage, reply: &ServerResponse) -> Result<(), AuthError> {
    match classify(reply) {
        Verdict::Accepted => Ok(()),
        Verdict::Rejected { code, message } => Err(AuthError::Rejected {
            stage,
            code,
            message,
        }),
    }
}

fn channel_error(stage: AuthStage, source: ControlError) -> AuthError {
    AuthError::Channel { stage, source }
}
