use bytes::{BufMut, BytesMut};

use crate::proto::frame::Frame;

/// Encodes a single frame into a fresh buffer.
pub fn encode_frame(frame: &Frame) -> BytesMut {
    let mut buf = BytesMut::new();
    write_frame(&mut buf, frame);
    buf
}

/// A RESP encoder that accumulates encoded frames in an internal buffer.
///
/// # Example
///
/// ```
/// use scriptis::proto::codec::Encoder;
/// use scriptis::proto::frame::Frame;
///
/// let mut encoder = Encoder::new();
/// encoder.encode(&Frame::SimpleString(b"OK".to_vec()));
/// assert_eq!(encoder.take().as_ref(), b"+OK\r\n");
/// ```
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    /// Creates an encoder with an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    /// Appends the RESP encoding of `frame` to the internal buffer.
    pub fn encode(&mut self, frame: &Frame) {
        write_frame(&mut self.buf, frame);
    }

    /// Takes the accumulated bytes, leaving the buffer empty for reuse.
    pub fn take(&mut self) -> BytesMut {
        std::mem::take(&mut self.buf)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_frame(buf: &mut BytesMut, frame: &Frame) {
    match frame {
        Frame::SimpleString(s) => write_line(buf, b'+', s),
        Frame::Error(e) => write_line(buf, b'-', e),
        Frame::Integer(n) => write_line(buf, b':', n.to_string().as_bytes()),
        Frame::BulkString(Some(data)) => {
            write_line(buf, b'$', data.len().to_string().as_bytes());
            buf.extend_from_slice(data);
            buf.extend_from_slice(b"\r\n");
        }
        Frame::BulkString(None) => buf.extend_from_slice(b"$-1\r\n"),
        Frame::Array(items) => {
            write_line(buf, b'*', items.len().to_string().as_bytes());
            for item in items {
                write_frame(buf, item);
            }
        }
        Frame::Null => buf.extend_from_slice(b"*-1\r\n"),
    }
}

fn write_line(buf: &mut BytesMut, tag: u8, payload: &[u8]) {
    buf.put_u8(tag);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(b"\r\n");
}
