/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small streaming deflate decoder.
//!
//! This crate features a deflate/zlib decoder built for tight memory
//! budgets: decode trees live in a fixed size node arena, the only
//! allocation is the sliding window (256 bytes to 32 KiB, as the stream
//! asks for), and input and output move one byte at a time through
//! [`ByteSource`](pico_core::bytestream::ByteSource) and
//! [`ByteSink`](pico_core::bytestream::ByteSink).
//!
//! Use it if
//! - You decode on a microcontroller or somewhere memory is counted
//! - Your compressed bytes arrive in pieces, e.g. PNG `IDAT` chunks
//! - You want a 100% safe, pure rust implementation.
//!
//! # Usage
//!
//! Decoding zlib data from memory
//! ```no_run
//! use pico_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Decoding raw deflate data
//! ```no_run
//! use pico_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_deflate();
//! ```
//!
//! Streaming zlib data spread over several chunks
//! ```no_run
//! use pico_core::bytestream::ChunkedSource;
//! use pico_inflate::InflateDecoder;
//!
//! let chunks: [&[u8]; 2] = [&[0x78, 0x01], &[0; 21]];
//! let mut out = Vec::new();
//! let mut decoder = InflateDecoder::new(ChunkedSource::new(chunks.into_iter()), &mut out);
//!
//! let bytes_emitted = decoder.decode_zlib();
//! ```
//!
//! Decoding zlib data without confirming the adler32 checksum
//! ```no_run
//! use pico_inflate::DeflateDecoder;
//! use pico_inflate::DeflateOptions;
//! let totally_valid_data = [0; 23];
//! let options = DeflateOptions::default().set_confirm_checksum(false);
//! let decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//! ```
//!
//! # Features
//! - `zlib`: zlib framing and Adler-32 checking, pulls in `simd-adler32`.
//! - `std`: `std::error::Error` impls and `std::io` backed sources.
//! - `log`: log headers, blocks and failures through the `log` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
extern crate alloc;

pub use pico_core;

pub use crate::decoder::{DeflateDecoder, InflateDecoder};
pub use crate::options::DeflateOptions;

mod bitstream;
mod checksum;
mod constants;
mod decoder;
mod enums;
pub mod errors;
mod huffman;
mod options;
mod window;
#[cfg(feature = "zlib")]
mod zlib;
