//! RESP (Redis Serialization Protocol) support.
//!
//! Everything needed to talk RESP2 on the wire: the [`frame::Frame`] data
//! model, a streaming [`codec::Decoder`], a [`codec::Encoder`], and the
//! crate-wide [`error::Error`] type.

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod frame;
