//! ftpcp - Entry Point
//!
//! Copies one file to or from an FTP server, scp style.

use clap::Parser;
use env_logger::Env;
use log::info;
use std::process::ExitCode;

use ftpcp::cli::{Args, USAGE};
use ftpcp::client::{self, TransferDirection};
use ftpcp::config::ClientConfig;
use ftpcp::error::handlers::{EXIT_SUCCESS, EXIT_USAGE};
use ftpcp::error::{ClientError, error_to_exit_code, handle_error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            return exit_code(code);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    let mut direction = None;
    let code = match copy(args, &mut direction).await {
        Ok(bytes) => {
            info!("Transferred {} bytes", bytes);
            println!("ftpcp succeeded.");
            EXIT_SUCCESS
        }
        Err(err) => {
            handle_error(&err);
            eprintln!("{}", err);
            if matches!(err, ClientError::Usage(_)) {
                eprintln!("usage\n {}", USAGE);
            }
            println!("ftpcp failed.");
            error_to_exit_code(&err, direction)
        }
    };

    exit_code(code)
}

async fn copy(args: Args, direction: &mut Option<TransferDirection>) -> Result<u64, ClientError> {
    let config = ClientConfig::load(args.config.as_deref())?;
    let plan = args.plan()?;
    *direction = Some(plan.direction);

    let invocation = args.into_invocation(plan, &config)?;
    client::run(&invocation, &config).await
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
