/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for pulling and pushing bytes in pico
//!
//! This exposes the traits and implementations for sources
//! and sinks used by the pico decoders.

use crate::bytestream::ByteIoError;
use crate::log::error;

/// The input half of a byte channel.
///
/// Decoders call this once per byte they need, so implementations
/// should keep it cheap, usually by serving bytes from a buffer they
/// refill in bulk.
///
/// A source may block inside `next_byte` while waiting for more input,
/// the decoder has no timeout and simply waits with it.
pub trait ByteSource {
    /// Return the next byte of the stream
    ///
    /// # Errors
    /// - [`ByteIoError::Exhausted`] if the stream has no further bytes
    /// - Any other error the underlying storage reports
    fn next_byte(&mut self) -> Result<u8, ByteIoError>;
}

/// The output half of a byte channel.
///
/// Anything that implements this trait can receive decoded bytes
pub trait ByteSink {
    /// Receive the next decoded byte.
    ///
    /// This cannot fail, a sink that runs out of space must decide on
    /// its own what to do with extra bytes.
    fn put_byte(&mut self, byte: u8);

    /// Observability hook called when a decoder hits a problem.
    ///
    /// This is purely informative, the decoder also reports the problem
    /// through its return value. Bytes already handed to `put_byte` are
    /// not taken back.
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn report_error(&mut self, message: &str) {
        error!("{}", message);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, ByteIoError> {
        (**self).next_byte()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline(always)]
    fn put_byte(&mut self, byte: u8) {
        (**self).put_byte(byte)
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message)
    }
}
