use bytes::{Buf, Bytes, BytesMut};

use crate::proto::frame::Frame;

const DEFAULT_MAX_FRAME_SIZE: usize = 512 * 1024 * 1024;

// Lower bound on the wire size of one array element, used to reject
// absurd array headers before allocating.
const MIN_ELEMENT_SIZE: usize = 4;

/// A streaming RESP decoder that turns bytes into [`Frame`]s.
///
/// Feed incoming bytes with [`append`](Decoder::append), then call
/// [`decode`](Decoder::decode) until it returns `Ok(None)`, which means the
/// buffer holds no complete frame yet. Partial input is never consumed: the
/// buffer only advances once a whole frame has been parsed.
///
/// # Example
///
/// ```
/// use scriptis::proto::codec::Decoder;
/// use scriptis::proto::frame::Frame;
///
/// let mut decoder = Decoder::new();
/// decoder.append(b"+OK\r\n");
/// let frame = decoder.decode().unwrap().unwrap();
/// assert_eq!(frame, Frame::SimpleString(b"OK".to_vec()));
/// ```
#[derive(Debug)]
pub struct Decoder {
    buf: BytesMut,
    max_frame_size: usize,
}

impl Decoder {
    /// Creates a decoder with the default 512 MB frame size limit.
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Creates a decoder with a custom maximum frame size in bytes.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_frame_size,
        }
    }

    /// Appends raw bytes received from the network.
    pub fn append(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Attempts to decode one frame from the buffer.
    ///
    /// Returns `Ok(Some(frame))` when a complete frame was parsed,
    /// `Ok(None)` when more data is needed, and `Err` on malformed input.
    pub fn decode(&mut self) -> Result<Option<Frame>, String> {
        if self.buf.is_empty() {
            return Ok(None);
        }
        if self.buf.len() > self.max_frame_size {
            return Err("buffered data exceeds maximum frame size".to_string());
        }

        match self.parse_at(0)? {
            Some((frame, end)) => {
                self.buf.advance(end);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }

    /// Parses the frame starting at `pos`, without consuming anything.
    ///
    /// On success returns the frame and the buffer offset just past it.
    fn parse_at(&self, pos: usize) -> Result<Option<(Frame, usize)>, String> {
        let tag = match self.buf.get(pos) {
            Some(&tag) => tag,
            None => return Ok(None),
        };
        let (line, body) = match self.line_at(pos + 1) {
            Some(found) => found,
            None => return Ok(None),
        };

        match tag {
            b'+' => Ok(Some((Frame::SimpleString(line.to_vec()), body))),
            b'-' => Ok(Some((Frame::Error(line.to_vec()), body))),
            b':' => Ok(Some((Frame::Integer(parse_decimal(line)?), body))),
            b'$' => self.parse_bulk(line, body),
            b'*' => self.parse_array(line, body),
            other => Err(format!("unknown frame type: {}", other as char)),
        }
    }

    fn parse_bulk(&self, header: &[u8], body: usize) -> Result<Option<(Frame, usize)>, String> {
        let len = parse_decimal(header)?;
        if len == -1 {
            return Ok(Some((Frame::BulkString(None), body)));
        }
        if len < 0 {
            return Err(format!("negative bulk string length: {len}"));
        }
        let len = len as usize;
        if len > self.max_frame_size {
            return Err("bulk string length exceeds maximum frame size".to_string());
        }
        if self.buf.len() < body + len + 2 {
            return Ok(None);
        }
        if &self.buf[body + len..body + len + 2] != b"\r\n" {
            return Err("bulk string payload not terminated by CRLF".to_string());
        }
        let data = Bytes::copy_from_slice(&self.buf[body..body + len]);
        Ok(Some((Frame::BulkString(Some(data)), body + len + 2)))
    }

    fn parse_array(&self, header: &[u8], body: usize) -> Result<Option<(Frame, usize)>, String> {
        let len = parse_decimal(header)?;
        if len == -1 {
            return Ok(Some((Frame::Null, body)));
        }
        if len < 0 {
            return Err(format!("negative array length: {len}"));
        }
        let len = len as usize;
        if len > self.max_frame_size / MIN_ELEMENT_SIZE {
            return Err("array length exceeds maximum frame size".to_string());
        }

        let mut items = Vec::with_capacity(len);
        let mut cursor = body;
        for _ in 0..len {
            match self.parse_at(cursor)? {
                Some((frame, end)) => {
                    items.push(frame);
                    cursor = end;
                }
                None => return Ok(None),
            }
        }
        Ok(Some((Frame::Array(items), cursor)))
    }

    /// Finds the CRLF-terminated line starting at `start`.
    ///
    /// Returns the line without its terminator and the offset just past it.
    fn line_at(&self, start: usize) -> Option<(&[u8], usize)> {
        let buf = &self.buf[..];
        let mut i = start;
        while i + 1 < buf.len() {
            if buf[i] == b'\r' && buf[i + 1] == b'\n' {
                return Some((&buf[start..i], i + 2));
            }
            i += 1;
        }
        None
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_decimal(line: &[u8]) -> Result<i64, String> {
    std::str::from_utf8(line)
        .map_err(|e| e.to_string())?
        .parse::<i64>()
        .map_err(|e| e.to_string())
}
