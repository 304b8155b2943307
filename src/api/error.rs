use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Failure of a single exam listing request, classified right after the call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS failure, refused or unreachable host.
    #[error("failed to connect to exam API: {0}")]
    Connectivity(String),

    #[error("exam API request timed out: {0}")]
    Timeout(String),

    #[error("exam API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed exam API response: {0}")]
    Malformed(String),

    #[error("exam API request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Only connectivity failures are worth waking someone up for.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::Connectivity(_))
    }

    /// The underlying failure text, without the variant's own wording.
    pub fn message(&self) -> String {
        match self {
            FetchError::Connectivity(m)
            | FetchError::Timeout(m)
            | FetchError::Malformed(m)
            | FetchError::Request(m) => m.clone(),
            FetchError::Status { status, body } => format!("HTTP {status}: {body}"),
        }
    }

    /// A short, stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Connectivity(_) => "connectivity",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status { .. } => "status",
            FetchError::Malformed(_) => "malformed",
            FetchError::Request(_) => "request",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The URL is logged separately and would only clutter alerts.
        let err = err.without_url();
        let message = error_chain(&err);

        // A connect timeout reports both flags; it is still a timeout.
        if err.is_timeout() {
            FetchError::Timeout(message)
        } else if err.is_connect() && is_network_failure(&err) {
            FetchError::Connectivity(message)
        } else if err.is_decode() {
            FetchError::Malformed(message)
        } else {
            FetchError::Request(message)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// True when the cause chain shows the host could not be reached at all:
/// refused or unreachable sockets and failed name resolution. TLS and other
/// handshake failures against a reachable host do not count.
pub fn is_network_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::HostUnreachable
                    | io::ErrorKind::NetworkUnreachable
            ) {
                return true;
            }
        }

        let text = cause.to_string();
        if text.starts_with("dns error") || text.contains("failed to lookup address information") {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Joins an error with all of its sources, e.g.
/// `error sending request: tcp connect error: Connection refused (os error 111)`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
