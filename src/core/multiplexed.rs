use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, instrument};

use crate::core::connection::{Connection, ConnectionReader, ConnectionWriter};
use crate::proto::frame::Frame;

/// A command queued for the writer task, paired with the channel its
/// response will be delivered on.
struct Request {
    frame: Frame,
    response_tx: oneshot::Sender<crate::Result<Frame>>,
}

/// A handle to a multiplexed connection.
///
/// The handle is cheap to clone and safe to share across tasks. A writer task
/// drains queued commands onto the socket; a reader task matches responses to
/// callers strictly in FIFO order, which is the order Redis answers in.
///
/// [`send_command`](MultiplexedConnection::send_command) is the suspension
/// point of the client: the calling task parks on a oneshot channel until its
/// response frame arrives. Dropping the caller's future drops that channel,
/// so a cancelled call simply never observes its response; the command itself
/// stays in flight on the server.
#[derive(Clone)]
pub struct MultiplexedConnection {
    sender: mpsc::Sender<Request>,
}

impl MultiplexedConnection {
    /// Spawns the writer and reader tasks over `connection`.
    ///
    /// `queue_size` bounds the number of commands waiting to be written.
    pub fn new<S>(connection: Connection<S>, queue_size: usize) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (reader, writer) = connection.split();
        let (request_tx, request_rx) = mpsc::channel(queue_size);
        // Waiters move from the writer to the reader in write order, so the
        // queue never holds more than queue_size pending responses.
        let (waiter_tx, waiter_rx) = mpsc::channel(queue_size);

        tokio::spawn(write_loop(writer, request_rx, waiter_tx));
        tokio::spawn(read_loop(reader, waiter_rx));

        Self { sender: request_tx }
    }

    /// Sends a command and suspends the caller until its response arrives.
    #[instrument(skip(self), level = "debug")]
    pub async fn send_command(&self, frame: Frame) -> crate::Result<Frame> {
        let (response_tx, response_rx) = oneshot::channel();
        let request = Request { frame, response_tx };

        self.sender
            .send(request)
            .await
            .map_err(|_| closed_error())?;

        response_rx.await.map_err(|_| closed_error())?
    }
}

impl fmt::Debug for MultiplexedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiplexedConnection")
            .field("sender", &self.sender)
            .finish()
    }
}

fn closed_error() -> crate::Error {
    crate::Error::Io {
        source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection closed"),
    }
}

async fn write_loop<S>(
    mut writer: ConnectionWriter<S>,
    mut request_rx: mpsc::Receiver<Request>,
    waiter_tx: mpsc::Sender<oneshot::Sender<crate::Result<Frame>>>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(req) = request_rx.recv().await {
        debug!(?req.frame, "sending frame");
        if let Err(e) = writer.write_frame(&req.frame).await {
            error!(error = ?e, "failed to write frame");
            let _ = req.response_tx.send(Err(crate::Error::Io { source: e }));
            return;
        }

        // Hand the waiter to the reader; if that fails the reader is gone.
        if waiter_tx.send(req.response_tx).await.is_err() {
            return;
        }
    }
}

async fn read_loop<S>(
    mut reader: ConnectionReader<S>,
    mut waiter_rx: mpsc::Receiver<oneshot::Sender<crate::Result<Frame>>>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let tx = match waiter_rx.recv().await {
            Some(tx) => tx,
            None => return, // Writer closed, no more requests coming.
        };

        match reader.read_frame().await {
            Ok(frame) => {
                debug!(?frame, "received frame");
                let _ = tx.send(Ok(frame));
            }
            Err(e) => {
                error!(error = ?e, "failed to read frame");
                let _ = tx.send(Err(e));
                // The stream is out of sync or dead; stop reading.
                return;
            }
        }
    }
}
