//! Command-line interface
//!
//! `ftpcp [-p port] [-P password] [-t ascii|binary] [user@host:]file1 [user@host:]file2`

use clap::{ArgAction, Parser, ValueEnum};
use log::warn;
use std::path::PathBuf;

use crate::client::{Invocation, TransferPlan};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transfer::TransferType;

const PASSWORD_PROMPT: &str = "input password of ftp user: ";

/// Usage line shown by `--help` and after usage errors
pub const USAGE: &str =
    "ftpcp [-p port] [-P password] [-t ascii|binary] [user@host:]file1 [user@host:]file2";

/// `-t` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Ascii,
    Binary,
}

impl From<TypeArg> for TransferType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Ascii => TransferType::Ascii,
            TypeArg::Binary => TransferType::Binary,
        }
    }
}

/// Copy a single file to or from an FTP server
#[derive(Debug, Parser)]
#[command(
    name = "ftpcp",
    version,
    override_usage = USAGE
)]
pub struct Args {
    /// Control port of the server
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Password; prompted for when omitted
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// Transfer type
    #[arg(short = 't', long = "type", value_enum, default_value_t = TypeArg::Binary)]
    pub transfer_type: TypeArg,

    /// Recursive copy (accepted, not supported)
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./ftpcp.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source, local path or user@host:path
    pub source: String,

    /// Destination, local path or user@host:path
    pub destination: String,
}

impl Args {
    /// Default `env_logger` filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Resolve the transfer plan only; no prompting
    pub fn plan(&self) -> Result<TransferPlan, ClientError> {
        TransferPlan::resolve(&self.source, &self.destination)
    }

    /// Build the invocation, prompting for the password if none was given
    pub fn into_invocation(
        self,
        plan: TransferPlan,
        config: &ClientConfig,
    ) -> Result<Invocation, ClientError> {
        if self.recursive {
            warn!("Recursive transfer is not supported; copying a single file");
        }

        let password = match self.password {
            Some(password) => password,
            None => rpassword::prompt_password(PASSWORD_PROMPT)
                .map_err(|e| ClientError::Usage(format!("failed to read password: {}", e)))?,
        };

        Ok(Invocation {
            plan,
            port: self.port.unwrap_or(config.default_port),
            password,
            transfer_type: self.transfer_type.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TransferDirection;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["ftpcp", "bob@host:/a.txt", "a.txt"]).unwrap();
        assert_eq!(TransferType::from(args.transfer_type), TransferType::Binary);
        assert_eq!(args.port, None);
        assert!(!args.recursive);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "ftpcp", "-p", "2121", "-P", "secret", "-t", "ascii", "-R", "-vv", "a.txt",
            "bob@host:/a.txt",
        ])
        .unwrap();
        assert_eq!(args.port, Some(2121));
        assert_eq!(args.transfer_type, TypeArg::Ascii);
        assert!(args.recursive);
        assert_eq!(args.log_filter(), "debug");

        let plan = args.plan().unwrap();
        assert_eq!(plan.direction, TransferDirection::Upload);

        let invocation = args
            .into_invocation(plan, &ClientConfig::default())
            .unwrap();
        assert_eq!(invocation.port, 2121);
        assert_eq!(invocation.password, "secret");
        assert_eq!(invocation.transfer_type, TransferType::Ascii);
    }

    #[test]
    fn test_port_falls_back_to_config() {
        let args =
            Args::try_parse_from(["ftpcp", "-P", "x", "bob@host:/a.txt", "a.txt"]).unwrap();
        let plan = args.plan().unwrap();
        let config = ClientConfig {
            default_port: 2121,
            ..ClientConfig::default()
        };
        let invocation = args.into_invocation(plan, &config).unwrap();
        assert_eq!(invocation.port, 2121);
    }

    #[test]
    fn test_help_shows_shared_usage_line() {
        let err = Args::try_parse_from(["ftpcp", "--help"]).unwrap_err();
        assert!(err.to_string().contains(USAGE));
    }

    #[test]
    fn test_rejects_unknown_type_and_missing_paths() {
        assert!(Args::try_parse_from(["ftpcp", "-t", "ebcdic", "a", "b@h:c"]).is_err());
        assert!(Args::try_parse_from(["ftpcp", "a"]).is_err());
    }
}
