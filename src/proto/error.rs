//! Error types.

use std::io;

use thiserror::Error;

/// Result type alias for scriptis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
///
/// Server error replies are classified once, at the point the reply frame is
/// interpreted: `NOSCRIPT` and `BUSY` prefixed replies map to their own
/// variants, everything else is passed through verbatim as [`Error::Server`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An IO error occurred.
    #[error("IO error: {source}")]
    Io {
        /// The underlying IO error.
        #[from]
        source: io::Error,
    },

    /// The peer sent bytes that do not form a valid or expected RESP reply.
    #[error("protocol error: {message}")]
    Protocol {
        /// Description of the error.
        message: String,
    },

    /// The server returned an error reply.
    #[error("server error: {message}")]
    Server {
        /// Error message from the server, verbatim.
        message: String,
    },

    /// Authentication failed.
    #[error("authentication failed")]
    Auth,

    /// Invalid argument provided.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// EVALSHA referenced a digest that is not in the server script cache.
    ///
    /// Load the script with `script_load` (or fall back to `eval`) and retry.
    #[error("no matching script in cache: {message}")]
    NoScript {
        /// Error message from the server.
        message: String,
    },

    /// The server is busy running a script and cannot accept the command.
    #[error("server busy running a script: {message}")]
    ScriptBusy {
        /// Error message from the server.
        message: String,
    },
}

impl Error {
    /// Classifies a raw server error reply into the matching variant.
    pub(crate) fn from_server_reply(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.starts_with("NOSCRIPT") {
            Error::NoScript { message }
        } else if message.starts_with("BUSY") {
            Error::ScriptBusy { message }
        } else {
            Error::Server { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let error = Error::Io { source: io_err };
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn display_protocol() {
        let error = Error::Protocol {
            message: "invalid frame".to_string(),
        };
        assert_eq!(error.to_string(), "protocol error: invalid frame");
    }

    #[test]
    fn display_auth() {
        assert_eq!(Error::Auth.to_string(), "authentication failed");
    }

    #[test]
    fn classify_noscript_reply() {
        let error = Error::from_server_reply("NOSCRIPT No matching script.");
        assert!(matches!(error, Error::NoScript { .. }));
        assert!(error.to_string().contains("NOSCRIPT"));
    }

    #[test]
    fn classify_busy_reply() {
        let error = Error::from_server_reply("BUSY Redis is busy running a script.");
        assert!(matches!(error, Error::ScriptBusy { .. }));
    }

    #[test]
    fn classify_plain_server_reply() {
        let error = Error::from_server_reply("ERR wrong number of arguments");
        match error {
            Error::Server { message } => {
                assert_eq!(message, "ERR wrong number of arguments");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn from_io() {
        let io_err = io::Error::other("test");
        let error: Error = io_err.into();
        assert!(matches!(error, Error::Io { .. }));
    }
}
