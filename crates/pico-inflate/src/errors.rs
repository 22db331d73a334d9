/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decompressing
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

use pico_core::bytestream::ByteIoError;

/// A struct returned when decompression fails
pub struct InflateDecodeErrors {
    /// reason why decompression fails
    pub error: DecodeErrorStatus,
    /// Data up until that decompression stage
    pub data:  Vec<u8>
}

impl InflateDecodeErrors {
    /// Create a new decode wrapper with data being
    /// how many bytes we actually decoded before hitting an error
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors {
        InflateDecodeErrors { error, data }
    }
}

impl Debug for InflateDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self.error)
    }
}

impl Display for InflateDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InflateDecodeErrors {}

/// Reasons decompression stops
pub enum DecodeErrorStatus {
    /// The source ran out of bytes before the stream ended
    InsufficientData,
    /// The source failed for a reason other than running dry
    Io(ByteIoError),
    /// Zlib header names a compression method other than deflate
    UnsupportedCompressionMethod(u8),
    /// Zlib header asks for a window larger than 32 KiB
    UnsupportedWindowSize(u8),
    /// Zlib header requests a preset dictionary, which we can't supply
    PresetDictionary,
    /// Zlib header check bits are wrong
    CorruptHeader,
    /// A block uses the reserved block type `11`
    BadBlockType,
    /// A stored block's length isn't matched by its complement
    ///
    /// # Arguments
    /// - 1st argument is `LEN`
    /// - 2nd argument is `NLEN`
    StoredLengthMismatch(u16, u16),
    /// The compressed data is malformed
    CorruptData(&'static str),
    /// Output would grow past the configured limit
    ///
    /// # Arguments
    /// - 1st argument is the set limit
    /// - 2nd argument is the size we were about to reach
    OutputLimitExceeded(usize, usize),
    /// The Adler-32 trailer doesn't match the decoded bytes
    ///
    /// # Arguments
    /// - 1st argument is the checksum stored in the stream
    /// - 2nd argument is the checksum of the decoded bytes
    MismatchedAdler(u32, u32)
}

impl DecodeErrorStatus {
    /// Whether this error leaves the decoded output intact.
    ///
    /// Only a checksum mismatch is detected after every byte has
    /// been emitted, the output is complete but suspect.
    pub const fn is_integrity_error(&self) -> bool {
        matches!(self, Self::MismatchedAdler(_, _))
    }
}

impl Debug for DecodeErrorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::Io(err) => writeln!(f, "I/O error {:?}", err),
            Self::UnsupportedCompressionMethod(cm) => {
                writeln!(f, "Unsupported compression method {cm}, expected 8 (deflate)")
            }
            Self::UnsupportedWindowSize(cinfo) => {
                writeln!(f, "Unknown cinfo `{cinfo}` greater than 7, not allowed")
            }
            Self::PresetDictionary => {
                writeln!(f, "Zlib stream with preset dictionary not supported")
            }
            Self::CorruptHeader => writeln!(f, "FCHECK integrity not preserved"),
            Self::BadBlockType => writeln!(f, "Bad block type"),
            Self::StoredLengthMismatch(len, nlen) => {
                writeln!(f, "Stored block LEN {len} doesn't match NLEN {nlen}")
            }
            Self::CorruptData(reason) => writeln!(f, "Corrupt data: {reason}"),
            Self::OutputLimitExceeded(limit, current) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {current}"
            ),
            Self::MismatchedAdler(expected, found) => {
                writeln!(f, "Mismatched Adler, expected {expected} but found {found}")
            }
        }
    }
}

impl Display for DecodeErrorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeErrorStatus {}

impl From<ByteIoError> for DecodeErrorStatus {
    fn from(value: ByteIoError) -> Self {
        match value {
            ByteIoError::Exhausted => Self::InsufficientData,
            err => Self::Io(err)
        }
    }
}
