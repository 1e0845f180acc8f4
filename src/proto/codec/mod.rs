//! RESP protocol encoder and decoder.
//!
//! - [`encoder`] - frame encoding to bytes
//! - [`decoder`] - streaming frame decoder from bytes

/// Streaming frame decoding.
pub mod decoder;
/// Frame encoding.
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::{encode_frame, Encoder};
