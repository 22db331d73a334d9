/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte channels for the pico decoders
//!
//! A decoder pulls its input one byte at a time from a [`ByteSource`] and
//! pushes every decoded byte into a [`ByteSink`], which keeps it oblivious
//! of where bytes come from (memory, a chunked container, a file) or where
//! they end up.
pub use reader::{ByteIoError, ChunkedSource, SliceSource};
#[cfg(feature = "std")]
pub use std_readers::ReaderSource;
pub use traits::{ByteSink, ByteSource};
pub use writer::CountingSink;

mod reader;
mod std_readers;
mod traits;
mod writer;
