//! # Scriptis
//!
//! Async Redis client for server-side Lua scripting, built on a multiplexed
//! connection: `EVAL`, `EVALSHA`, the `SCRIPT` subcommands, and local SHA1
//! digest computation.
//!
//! Commands are forwarded exactly as given and awaited until the server
//! responds; replies are converted according to an [`OutputType`] selector.
//!
//! ## Example
//!
//! ```no_run
//! use scriptis::{Client, OutputType, ScriptValue};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("redis://localhost:6379").await?;
//!
//!     let digest = client.script_load("return redis.call('GET', KEYS[1])").await?;
//!     assert_eq!(digest, client.digest("return redis.call('GET', KEYS[1])"));
//!
//!     let reply = client.evalsha(&digest, OutputType::Value, &["mykey"]).await?;
//!     if let ScriptValue::Value(Some(bytes)) = reply {
//!         println!("{:?}", bytes);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod core;
pub mod proto;
pub mod script;

#[cfg(test)]
mod stress;

// Re-export the high-level types for convenience.
pub use crate::core::builder::ClientBuilder;
pub use crate::core::{Client, Error, Result};
pub use crate::script::{FlushMode, OutputType, ScriptValue};
