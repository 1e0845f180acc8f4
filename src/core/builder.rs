use std::time::Duration;

use crate::{Client, Error};

/// Builder for configuring and creating a [`Client`] connection.
///
/// # Example
///
/// ```no_run
/// use scriptis::ClientBuilder;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ClientBuilder::new()
///     .address("redis://localhost:6379")
///     .password("secret")
///     .database(0)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    address: Option<String>,
    username: Option<String>,
    password: Option<String>,
    database: Option<u8>,
    client_name: Option<String>,
    connect_timeout: Option<Duration>,
    queue_size: Option<usize>,
}

impl ClientBuilder {
    /// Creates a new [`ClientBuilder`] instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Redis server address, in the format `redis://host:port`.
    #[inline]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the username for ACL authentication.
    #[inline]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for authentication.
    #[inline]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the Redis database number to select after connecting.
    #[inline]
    pub fn database(mut self, database: u8) -> Self {
        self.database = Some(database);
        self
    }

    /// Sets the client connection name shown in `CLIENT LIST`.
    #[inline]
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Sets the maximum time to wait for connection establishment.
    #[inline]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of pending requests in the queue
    /// (default: 1024).
    #[inline]
    pub fn queue_size(mut self, size: usize) -> Self {
        self.queue_size = Some(size);
        self
    }

    /// Builds the [`Client`] connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no address was set, and
    /// [`Error::Io`] if the connection fails.
    #[inline]
    pub async fn build(self) -> Result<Client, Error> {
        let address = self.address.ok_or_else(|| Error::InvalidArgument {
            message: "address is required".to_string(),
        })?;

        Client::connect_inner(
            address,
            self.username,
            self.password,
            self.database,
            self.client_name,
            self.connect_timeout,
            self.queue_size.unwrap_or(1024),
        )
        .await
    }
}
