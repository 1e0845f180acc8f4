//! Server-side Lua scripting commands.
//!
//! Mirrors the Redis scripting command set on [`Client`](crate::Client):
//! `EVAL`, `EVALSHA`, `SCRIPT EXISTS`, `SCRIPT FLUSH`, `SCRIPT KILL` and
//! `SCRIPT LOAD`, plus local SHA1 [`digest`] computation.
//!
//! Every command method forwards its arguments unchanged onto the wire,
//! suspends the caller until the multiplexed connection yields the response,
//! and converts that response without adding retries, timeouts or fallbacks.
//! The one exception is [`digest`]: the digest of a script body is a pure
//! local computation, so it never touches the connection.

#![warn(missing_docs)]

use sha1::{Digest, Sha1};

pub mod commands;
mod output;

mod client;

pub use output::ScriptValue;

/// How the reply of a server-side script execution is interpreted.
///
/// Lua scripts can return any reply shape; the caller states the shape it
/// expects and the reply is converted accordingly. A reply that does not fit
/// the selector is a [`Protocol`](crate::Error::Protocol) error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// Integer reply interpreted as a flag: nonzero is `true`, a null reply
    /// (Lua `false`) is `false`.
    Boolean,
    /// 64-bit integer reply.
    Integer,
    /// Simple-string reply, e.g. `OK`.
    Status,
    /// Single bulk reply, `None` for null.
    Value,
    /// Array reply; elements are converted structurally.
    Multi,
}

/// The flush mode of `SCRIPT FLUSH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    /// Flush the script cache synchronously (the server default).
    Sync,
    /// Flush the script cache asynchronously, off the command path.
    Async,
}

impl FlushMode {
    pub(crate) fn as_arg(self) -> &'static str {
        match self {
            FlushMode::Sync => "SYNC",
            FlushMode::Async => "ASYNC",
        }
    }
}

/// Computes the SHA1 digest of a script body as lowercase hex text.
///
/// This is the digest `SCRIPT LOAD` returns and `EVALSHA` expects. It is
/// computed locally, without a server round trip.
///
/// # Example
///
/// ```
/// let digest = scriptis::script::digest("return 1");
/// assert_eq!(digest, "e0e1f9fabfc9d4800c877a703b823ac0578ff8db");
/// ```
pub fn digest(script: impl AsRef<[u8]>) -> String {
    hex::encode(Sha1::digest(script.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference digests produced by a real server's SCRIPT LOAD.
    #[test]
    fn digest_matches_server_script_load() {
        assert_eq!(
            digest("return 1"),
            "e0e1f9fabfc9d4800c877a703b823ac0578ff8db"
        );
        assert_eq!(
            digest("return redis.call('GET', KEYS[1])"),
            "d3c21d0c2b9ca22f82737626a27bcaf5d288f99f"
        );
    }

    #[test]
    fn digest_accepts_text_and_raw_bytes() {
        let as_text = digest("return 1");
        let as_bytes = digest(b"return 1".as_slice());
        assert_eq!(as_text, as_bytes);
    }

    #[test]
    fn flush_mode_arguments() {
        assert_eq!(FlushMode::Sync.as_arg(), "SYNC");
        assert_eq!(FlushMode::Async.as_arg(), "ASYNC");
    }
}
