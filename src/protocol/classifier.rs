//! Reply classification
//!
//! Any reply at or above 400 fails the command that produced it. 1xx, 2xx
//! and 3xx replies are all treated as success.

use crate::protocol::responses::{FIRST_FAILURE_CODE, ServerResponse};

/// Outcome of a single reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected { code: u16, message: String },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Classify a parsed reply, surfacing the server message verbatim on rejection
pub fn classify(resp: &ServerResponse) -> Verdict {
    if resp.code >= FIRST_FAILURE_CODE {
        Verdict::Rejected {
            code: resp.code,
            message: resp.message.clone(),
        }
    } else {
        Verdict::Accepted
    }
}

/// User-facing diagnostic for a rejected reply
pub fn rejection_message(code: u16, message: &str) -> String {
    format!("error from server. {} {}", code, message.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_codes_are_accepted() {
        assert_eq!(
            classify(&ServerResponse::new(227, "Entering Passive Mode")),
            Verdict::Accepted
        );
        assert!(classify(&ServerResponse::new(150, "Opening")).is_accepted());
        assert!(classify(&ServerResponse::new(331, "need pw")).is_accepted());
    }

    #[test]
    fn test_failure_codes_are_rejected_with_message() {
        assert_eq!(
            classify(&ServerResponse::new(550, "No such file")),
            Verdict::Rejected {
                code: 550,
                message: "No such file".into()
            }
        );
    }

    #[test]
    fn test_boundary_between_accept_and_reject() {
        assert!(classify(&ServerResponse::new(399, "")).is_accepted());
        assert!(!classify(&ServerResponse::new(400, "")).is_accepted());
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(
            rejection_message(530, "Login incorrect.\r\n"),
            "error from server. 530 Login incorrect."
        );
    }
}
