/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io::{ErrorKind, Read};

use crate::bytestream::{ByteIoError, ByteSource};

const BUFFER_SIZE: usize = 512;

/// A source pulling bytes from anything implementing [`Read`].
///
/// Bytes are read in blocks of 512 into an internal buffer so that
/// the per byte calls made by decoders don't each hit the reader.
pub struct ReaderSource<R: Read> {
    inner:  R,
    buffer: [u8; BUFFER_SIZE],
    index:  usize,
    limit:  usize
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> ReaderSource<R> {
        ReaderSource {
            inner,
            buffer: [0; BUFFER_SIZE],
            index: 0,
            limit: 0
        }
    }
    /// Return the wrapped reader.
    ///
    /// Bytes buffered but not yet handed out are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn refill(&mut self) -> Result<(), ByteIoError> {
        loop {
            match self.inner.read(&mut self.buffer) {
                Ok(0) => return Err(ByteIoError::Exhausted),
                Ok(read) => {
                    self.index = 0;
                    self.limit = read;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ByteIoError::from(e))
            }
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    #[inline]
    fn next_byte(&mut self) -> Result<u8, ByteIoError> {
        if self.index == self.limit {
            self.refill()?;
        }
        let byte = self.buffer[self.index];
        self.index += 1;

        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::bytestream::{ByteIoError, ByteSource, ReaderSource};

    #[test]
    fn reader_source_crosses_buffer_refills() {
        let data: Vec<u8> = (0..2000_u32).map(|x| (x % 251) as u8).collect();
        let mut source = ReaderSource::new(Cursor::new(data.clone()));

        for expected in &data {
            assert_eq!(source.next_byte().unwrap(), *expected);
        }
        assert!(matches!(source.next_byte(), Err(ByteIoError::Exhausted)));
    }
}
