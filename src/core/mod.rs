//! Connection handling and the high-level [`Client`].
//!
//! - [`connection`] - framed single connection
//! - [`multiplexed`] - multiplexed connection shared across tasks
//! - [`command`] - command builders and reply converters
//! - [`builder`] - client configuration

#![warn(missing_docs)]

use std::time::Duration;

pub use crate::proto::error::{Error, Result};

/// Client builder configuration.
pub mod builder;
/// Command construction helpers.
pub mod command;
/// Low-level connection management.
pub mod connection;
/// Multiplexing logic.
pub mod multiplexed;

/// An asynchronous Redis client geared towards server-side Lua scripting.
///
/// The client is a thin handle over a [`multiplexed::MultiplexedConnection`];
/// cloning it is cheap and clones share the same connection. Scripting
/// commands live in [`crate::script`].
///
/// # Example
///
/// ```no_run
/// use scriptis::{Client, OutputType, ScriptValue};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = Client::connect("redis://localhost:6379").await?;
///     let reply = client.eval("return 1", OutputType::Integer, &[]).await?;
///     assert_eq!(reply, ScriptValue::Integer(1));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    connection: multiplexed::MultiplexedConnection,
}

impl Client {
    pub(crate) async fn connect_inner(
        address: String,
        username: Option<String>,
        password: Option<String>,
        database: Option<u8>,
        client_name: Option<String>,
        connect_timeout: Option<Duration>,
        queue_size: usize,
    ) -> Result<Self> {
        let parsed_url = url::Url::parse(&address).map_err(|_| Error::InvalidArgument {
            message: "invalid address format".to_string(),
        })?;

        match parsed_url.scheme() {
            "redis" => {}
            "rediss" => {
                return Err(Error::InvalidArgument {
                    message: "TLS (rediss://) is not supported".to_string(),
                })
            }
            _ => {
                return Err(Error::InvalidArgument {
                    message: "invalid scheme, expected redis://".to_string(),
                })
            }
        }

        let host = parsed_url
            .host_str()
            .ok_or_else(|| Error::InvalidArgument {
                message: "missing host in address".to_string(),
            })?;
        let port = parsed_url.port().unwrap_or(6379);
        let addr = format!("{}:{}", host, port);

        let connect = tokio::net::TcpStream::connect(&addr);
        let stream = match connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connect)
                .await
                .map_err(|_| Error::Io {
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "connect timed out",
                    ),
                })??,
            None => connect.await?,
        };

        let mut connection = connection::Connection::new(stream);

        if let Some(pwd) = password {
            let auth_cmd = match username {
                Some(user) => command::auth_with_username(user, pwd),
                None => command::auth(pwd),
            };
            connection.write_frame(&auth_cmd.into_frame()).await?;
            let resp = connection.read_frame().await?;
            if matches!(resp, crate::proto::frame::Frame::Error(_)) {
                return Err(Error::Auth);
            }
        }

        if let Some(db) = database {
            connection
                .write_frame(&command::select(db).into_frame())
                .await?;
            let resp = connection.read_frame().await?;
            command::expect_simple(resp)?;
        }

        if let Some(name) = client_name {
            connection
                .write_frame(&command::client_setname(name).into_frame())
                .await?;
            let resp = connection.read_frame().await?;
            command::expect_simple(resp)?;
        }

        let connection = multiplexed::MultiplexedConnection::new(connection, queue_size);

        Ok(Self { connection })
    }

    /// Connects to a Redis server at `redis://host:port`.
    pub async fn connect<T: AsRef<str>>(addr: T) -> Result<Self> {
        Self::connect_inner(addr.as_ref().to_string(), None, None, None, None, None, 1024).await
    }

    /// Sends a command and suspends until its response frame arrives.
    pub(crate) async fn send(&mut self, cmd: command::Cmd) -> Result<crate::proto::frame::Frame> {
        self.connection.send_command(cmd.into_frame()).await
    }

    /// Sends a PING command to the server.
    pub async fn ping(&mut self) -> Result<()> {
        let frame = self.send(command::ping()).await?;
        command::expect_simple(frame)
    }

    /// Echoes the provided message back from the server.
    pub async fn echo(&mut self, msg: &str) -> Result<bytes::Bytes> {
        let frame = self.send(command::echo(msg.to_string())).await?;
        let bytes = command::frame_to_bytes(frame)?;
        Ok(bytes.unwrap_or_default())
    }

    /// Selects the Redis logical database to use.
    pub async fn select(&mut self, db: u8) -> Result<()> {
        let frame = self.send(command::select(db)).await?;
        command::expect_simple(frame)
    }

    /// Sets the name of the current connection, as shown in `CLIENT LIST`.
    pub async fn client_setname(&mut self, name: &str) -> Result<()> {
        let frame = self.send(command::client_setname(name.to_string())).await?;
        command::expect_simple(frame)
    }
}
