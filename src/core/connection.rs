use std::fmt;
use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};

use crate::proto::codec::{Decoder, Encoder};
use crate::proto::frame::Frame;

const READ_CHUNK_SIZE: usize = 4096;

/// A framed connection to a Redis server.
///
/// Wraps an underlying stream and handles RESP encoding and decoding. The
/// connection can be [`split`](Connection::split) into independent reader and
/// writer halves so reads and writes can run on separate tasks.
pub struct Connection<S> {
    stream: S,
    decoder: Decoder,
    encoder: Encoder,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection over the given stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            decoder: Decoder::new(),
            encoder: Encoder::new(),
        }
    }

    /// Encodes and writes a single frame.
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), io::Error> {
        self.encoder.encode(frame);
        let data = self.encoder.take();
        self.stream.write_all(&data).await?;
        self.stream.flush().await
    }

    /// Reads one complete frame, waiting for more data as needed.
    pub async fn read_frame(&mut self) -> crate::Result<Frame> {
        next_frame(&mut self.stream, &mut self.decoder).await
    }

    /// Splits the connection into reader and writer halves.
    ///
    /// Any bytes already buffered by the decoder stay with the reader half.
    pub fn split(self) -> (ConnectionReader<S>, ConnectionWriter<S>) {
        let (read, write) = tokio::io::split(self.stream);
        (
            ConnectionReader {
                read,
                decoder: self.decoder,
            },
            ConnectionWriter {
                write,
                encoder: self.encoder,
            },
        )
    }
}

impl<S> fmt::Debug for Connection<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("stream", &self.stream)
            .finish()
    }
}

/// The read half of a split [`Connection`].
pub struct ConnectionReader<S> {
    read: ReadHalf<S>,
    decoder: Decoder,
}

impl<S> ConnectionReader<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Reads one complete frame, waiting for more data as needed.
    pub async fn read_frame(&mut self) -> crate::Result<Frame> {
        next_frame(&mut self.read, &mut self.decoder).await
    }
}

/// The write half of a split [`Connection`].
pub struct ConnectionWriter<S> {
    write: WriteHalf<S>,
    encoder: Encoder,
}

impl<S> ConnectionWriter<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Encodes and writes a single frame.
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), io::Error> {
        self.encoder.encode(frame);
        let data = self.encoder.take();
        self.write.write_all(&data).await?;
        self.write.flush().await
    }
}

async fn next_frame<R>(read: &mut R, decoder: &mut Decoder) -> crate::Result<Frame>
where
    R: AsyncRead + Unpin,
{
    loop {
        match decoder.decode() {
            Ok(Some(frame)) => return Ok(frame),
            Ok(None) => {
                let mut buf = vec![0u8; READ_CHUNK_SIZE];
                let n = read.read(&mut buf).await?;
                if n == 0 {
                    return Err(crate::Error::Protocol {
                        message: "connection closed".to_string(),
                    });
                }
                decoder.append(&buf[..n]);
            }
            Err(message) => return Err(crate::Error::Protocol { message }),
        }
    }
}
