//! Invocation planning
//!
//! Works out which side of a `source destination` pair is remote and
//! which way the file moves.

use std::fmt;
use std::path::PathBuf;

use crate::error::{ClientError, ParseError};

/// Which way the file moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Remote source, local destination (RETR)
    Download,
    /// Local source, remote destination (STOR)
    Upload,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferDirection::Download => write!(f, "download"),
            TransferDirection::Upload => write!(f, "upload"),
        }
    }
}

/// Remote side of the copy, written `user@host:path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub user: String,
    pub host: String,
    pub path: String,
}

impl RemoteTarget {
    /// Split at the first `@`, then at the first `:` after it.
    pub fn parse(arg: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::MalformedTarget(arg.to_string());

        let (user, rest) = arg.split_once('@').ok_or_else(malformed)?;
        let (host, path) = rest.split_once(':').ok_or_else(malformed)?;
        if user.is_empty() || host.is_empty() || path.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            user: user.to_string(),
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    /// An argument is treated as remote when it names a user
    pub fn is_remote_form(arg: &str) -> bool {
        arg.contains('@')
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.path)
    }
}

/// A resolved copy: direction, remote end and local path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub direction: TransferDirection,
    pub remote: RemoteTarget,
    pub local_path: PathBuf,
}

impl TransferPlan {
    /// Exactly one of `source` and `destination` must be remote.
    pub fn resolve(source: &str, destination: &str) -> Result<Self, ClientError> {
        match (
            RemoteTarget::is_remote_form(source),
            RemoteTarget::is_remote_form(destination),
        ) {
            (true, false) => Ok(Self {
                direction: TransferDirection::Download,
                remote: RemoteTarget::parse(source)?,
                local_path: PathBuf::from(destination),
            }),
            (false, true) => Ok(Self {
                direction: TransferDirection::Upload,
                remote: RemoteTarget::parse(destination)?,
                local_path: PathBuf::from(source),
            }),
            (true, true) => Err(ClientError::Usage(
                "source and destination cannot both be remote".into(),
            )),
            (false, false) => Err(ClientError::Usage(
                "one of source or destination must be user@host:path".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_target() {
        let target = RemoteTarget::parse("alice@ftp.example.com:/out/report.bin").unwrap();
        assert_eq!(target.user, "alice");
        assert_eq!(target.host, "ftp.example.com");
        assert_eq!(target.path, "/out/report.bin");
    }

    #[test]
    fn test_path_may_contain_colons_and_at_signs() {
        let target = RemoteTarget::parse("bob@10.0.0.1:dir/a:b@c").unwrap();
        assert_eq!(target.host, "10.0.0.1");
        assert_eq!(target.path, "dir/a:b@c");
    }

    #[test]
    fn test_missing_delimiters_are_rejected() {
        assert_eq!(
            RemoteTarget::parse("alice@host"),
            Err(ParseError::MalformedTarget("alice@host".into()))
        );
        assert!(RemoteTarget::parse("host:/path").is_err());
        assert!(RemoteTarget::parse("@host:/path").is_err());
        assert!(RemoteTarget::parse("alice@:/path").is_err());
        assert!(RemoteTarget::parse("alice@host:").is_err());
    }

    #[test]
    fn test_remote_destination_means_upload() {
        let plan =
            TransferPlan::resolve("./report.bin", "alice@ftp.example.com:/out/report.bin").unwrap();
        assert_eq!(plan.direction, TransferDirection::Upload);
        assert_eq!(plan.remote.path, "/out/report.bin");
        assert_eq!(plan.local_path, PathBuf::from("./report.bin"));
    }

    #[test]
    fn test_remote_source_means_download() {
        let plan = TransferPlan::resolve("demo@test.rebex.net:/readme.txt", "readme.txt").unwrap();
        assert_eq!(plan.direction, TransferDirection::Download);
        assert_eq!(plan.remote.user, "demo");
        assert_eq!(plan.local_path, PathBuf::from("readme.txt"));
    }

    #[test]
    fn test_both_or_neither_remote_is_usage_error() {
        assert!(matches!(
            TransferPlan::resolve("a@h:/x", "b@h:/y"),
            Err(ClientError::Usage(_))
        ));
        assert!(matches!(
            TransferPlan::resolve("x", "y"),
            Err(ClientError::Usage(_))
        ));
    }

    #[test]
    fn test_malformed_remote_is_parse_error() {
        assert!(matches!(
            TransferPlan::resolve("alice@host", "local.txt"),
            Err(ClientError::Parse(ParseError::MalformedTarget(_)))
        ));
    }
}
