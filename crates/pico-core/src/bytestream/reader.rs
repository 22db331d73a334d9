/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use crate::bytestream::ByteSource;

/// Errors a [`ByteSource`] can return
pub enum ByteIoError {
    /// The source has no further bytes
    Exhausted,
    /// Any other reason the source could not produce a byte
    Generic(&'static str),
    #[cfg(feature = "std")]
    StdIoError(std::io::Error)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::Exhausted => {
                writeln!(f, "No more bytes in source")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        if value.kind() == std::io::ErrorKind::UnexpectedEof {
            return ByteIoError::Exhausted;
        }
        ByteIoError::StdIoError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// An in-memory source over a byte slice.
pub struct SliceSource<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> SliceSource<'a> {
    pub const fn new(stream: &'a [u8]) -> SliceSource<'a> {
        SliceSource {
            stream,
            position: 0
        }
    }
    /// Number of bytes handed out so far
    pub const fn position(&self) -> usize {
        self.position
    }
    pub const fn remaining(&self) -> usize {
        // Must be saturating to prevent underflow
        self.stream.len().saturating_sub(self.position)
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::Exhausted)
        }
    }
}

/// A source that stitches consecutive chunks into one stream.
///
/// Container formats like PNG split one compressed stream across
/// several chunks, this presents them to a decoder as if they were
/// contiguous. Empty chunks are skipped.
///
/// # Example
/// ```
/// use pico_core::bytestream::{ByteSource, ChunkedSource};
///
/// let chunks: [&[u8]; 3] = [&[1, 2], &[], &[3]];
/// let mut source = ChunkedSource::new(chunks.into_iter());
///
/// assert_eq!(source.next_byte().unwrap(), 1);
/// assert_eq!(source.next_byte().unwrap(), 2);
/// assert_eq!(source.next_byte().unwrap(), 3);
/// assert!(source.next_byte().is_err());
/// ```
pub struct ChunkedSource<'a, I>
where
    I: Iterator<Item = &'a [u8]>
{
    chunks:   I,
    current:  &'a [u8],
    position: usize,
    consumed: usize
}

impl<'a, I> ChunkedSource<'a, I>
where
    I: Iterator<Item = &'a [u8]>
{
    pub fn new(chunks: I) -> ChunkedSource<'a, I> {
        ChunkedSource {
            chunks,
            current: &[],
            position: 0,
            consumed: 0
        }
    }
    /// Total bytes handed out across all chunks
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<'a, I> ByteSource for ChunkedSource<'a, I>
where
    I: Iterator<Item = &'a [u8]>
{
    fn next_byte(&mut self) -> Result<u8, ByteIoError> {
        while self.position >= self.current.len() {
            self.current = self.chunks.next().ok_or(ByteIoError::Exhausted)?;
            self.position = 0;
        }
        let byte = self.current[self.position];

        self.position += 1;
        self.consumed += 1;

        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{ByteIoError, ByteSource, ChunkedSource, SliceSource};

    #[test]
    fn slice_source_exhausts() {
        let mut source = SliceSource::new(&[10, 20]);

        assert_eq!(source.next_byte().unwrap(), 10);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_byte().unwrap(), 20);
        assert!(matches!(source.next_byte(), Err(ByteIoError::Exhausted)));
        // stays exhausted
        assert!(matches!(source.next_byte(), Err(ByteIoError::Exhausted)));
        assert_eq!(source.position(), 2);
    }

    #[test]
    fn chunked_source_skips_empty_chunks() {
        let chunks: [&[u8]; 5] = [&[], &[1], &[], &[], &[2, 3]];
        let mut source = ChunkedSource::new(chunks.into_iter());

        let mut out = alloc::vec::Vec::new();

        while let Ok(byte) = source.next_byte() {
            out.push(byte);
        }
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(source.consumed(), 3);
    }
}
