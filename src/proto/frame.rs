//! RESP frame types.

use bytes::Bytes;

/// A single RESP2 protocol unit.
///
/// Commands are sent as arrays of bulk strings; replies may be any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Simple string reply (`+OK`).
    SimpleString(Vec<u8>),
    /// Error reply (`-ERR ...`).
    Error(Vec<u8>),
    /// Integer reply (`:1000`).
    Integer(i64),
    /// Bulk string (`$6\r\nfoobar`); `None` is the null bulk string (`$-1`).
    BulkString(Option<Bytes>),
    /// Array reply (`*2\r\n...`).
    Array(Vec<Frame>),
    /// Null array (`*-1`).
    Null,
}

impl Frame {
    /// Builds a command frame from its arguments, one bulk string each.
    pub fn command<I>(args: I) -> Frame
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        Frame::Array(
            args.into_iter()
                .map(|a| Frame::BulkString(Some(a.into())))
                .collect(),
        )
    }

    /// Returns true for the two null encodings (`$-1` and `*-1`).
    pub fn is_null(&self) -> bool {
        matches!(self, Frame::Null | Frame::BulkString(None))
    }
}
