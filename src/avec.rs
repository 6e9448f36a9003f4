//! Convenience interfaces for talking to a receiver over I/O.
//!
//! The functions in [`reader`] drive a [`Decoder`](crate::Decoder) from any
//! [`std::io::Read`], such as a serial port or a log file. The [`commands`]
//! module holds the configuration sentences commonly sent to u-blox
//! receivers, with helpers to write them out.

pub mod commands;
#[cfg(feature = "std")]
pub mod reader;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
