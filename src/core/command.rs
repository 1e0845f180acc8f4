use bytes::Bytes;

use crate::proto::frame::Frame;

/// A command ready to be sent to the server.
///
/// Built up argument by argument and converted to a RESP array frame for
/// transmission. Arguments are forwarded exactly as given: no reordering,
/// no transformation.
///
/// # Example
///
/// ```
/// use scriptis::core::command::Cmd;
///
/// let cmd = Cmd::new("SCRIPT").arg("LOAD").arg("return 1");
/// ```
#[derive(Debug)]
pub struct Cmd {
    args: Vec<Bytes>,
}

impl Cmd {
    /// Creates a new command with the given name.
    #[inline]
    pub fn new(name: impl Into<Bytes>) -> Self {
        Self {
            args: vec![name.into()],
        }
    }

    /// Appends an argument to the command.
    #[inline]
    pub fn arg<T: Into<Bytes>>(mut self, arg: T) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Converts the command to a RESP array frame.
    #[inline]
    pub fn into_frame(self) -> Frame {
        Frame::command(self.args)
    }
}

/// Creates a PING command.
#[inline]
pub fn ping() -> Cmd {
    Cmd::new("PING")
}

/// Creates an ECHO command.
#[inline]
pub fn echo(msg: impl Into<Bytes>) -> Cmd {
    Cmd::new("ECHO").arg(msg)
}

/// Creates an AUTH command with password only.
#[inline]
pub fn auth(password: impl Into<Bytes>) -> Cmd {
    Cmd::new("AUTH").arg(password)
}

/// Creates an AUTH command with username and password (ACL style).
#[inline]
pub fn auth_with_username(username: impl Into<Bytes>, password: impl Into<Bytes>) -> Cmd {
    Cmd::new("AUTH").arg(username).arg(password)
}

/// Creates a SELECT command.
#[inline]
pub fn select(db: u8) -> Cmd {
    Cmd::new("SELECT").arg(db.to_string())
}

/// Creates a CLIENT SETNAME command.
#[inline]
pub fn client_setname(name: impl Into<Bytes>) -> Cmd {
    Cmd::new("CLIENT").arg("SETNAME").arg(name)
}

/// Surfaces a server error reply as an [`Error`](crate::Error), passing any
/// other frame through.
#[inline]
pub(crate) fn reply(frame: Frame) -> crate::Result<Frame> {
    match frame {
        Frame::Error(e) => Err(crate::Error::from_server_reply(
            String::from_utf8_lossy(&e).into_owned(),
        )),
        other => Ok(other),
    }
}

/// Expects a simple-string reply (`+OK` and friends), discarding its text.
#[inline]
pub(crate) fn expect_simple(frame: Frame) -> crate::Result<()> {
    match reply(frame)? {
        Frame::SimpleString(_) => Ok(()),
        other => Err(unexpected(&other)),
    }
}

/// Converts a bulk or simple-string reply to UTF-8 text.
#[inline]
pub(crate) fn frame_to_string(frame: Frame) -> crate::Result<String> {
    match reply(frame)? {
        Frame::SimpleString(s) => Ok(String::from_utf8_lossy(&s).into_owned()),
        Frame::BulkString(Some(b)) => Ok(String::from_utf8_lossy(&b).into_owned()),
        other => Err(unexpected(&other)),
    }
}

/// Converts a bulk reply to bytes, mapping null to `None`.
#[inline]
pub(crate) fn frame_to_bytes(frame: Frame) -> crate::Result<Option<Bytes>> {
    match reply(frame)? {
        Frame::BulkString(b) => Ok(b),
        Frame::Null => Ok(None),
        other => Err(unexpected(&other)),
    }
}

/// Converts an array-of-integers reply to booleans, one per element.
#[inline]
pub(crate) fn frame_to_vec_bool(frame: Frame) -> crate::Result<Vec<bool>> {
    match reply(frame)? {
        Frame::Array(items) => {
            let mut flags = Vec::with_capacity(items.len());
            for item in items {
                match reply(item)? {
                    Frame::Integer(n) => flags.push(n == 1),
                    other => return Err(unexpected(&other)),
                }
            }
            Ok(flags)
        }
        other => Err(unexpected(&other)),
    }
}

pub(crate) fn unexpected(frame: &Frame) -> crate::Error {
    crate::Error::Protocol {
        message: format!("unexpected reply frame: {frame:?}"),
    }
}
