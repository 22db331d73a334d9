/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! `BitStreamReader` API
//!
//! This module provides an interface to read bits from a byte source,
//! least significant bit first, as deflate packs them.
//!
//! Only one byte is ever held in flight, a new one is pulled from the
//! source when the previous one has been fully consumed. This keeps
//! the reader from pulling bytes that belong to whatever follows the
//! deflate stream (e.g. the zlib trailer).
use pico_core::bytestream::ByteSource;

use crate::errors::DecodeErrorStatus;

pub struct BitStreamReader<S: ByteSource> {
    source:    S,
    // byte currently being consumed, already shifted
    // so that its next bit is bit 0
    buffer:    u8,
    bits_left: u8
}

impl<S: ByteSource> BitStreamReader<S> {
    /// Create a new `BitStreamReader` instance
    pub fn new(source: S) -> BitStreamReader<S> {
        BitStreamReader {
            source,
            buffer: 0,
            bits_left: 0
        }
    }

    #[inline(always)]
    fn refill(&mut self) -> Result<(), DecodeErrorStatus> {
        debug_assert_eq!(self.bits_left, 0);

        self.buffer = self.source.next_byte()?;
        self.bits_left = 8;

        Ok(())
    }

    /// Read `num_bits` bits, the first bit read ends up as bit 0 of the result
    ///
    /// # Errors
    /// If the source runs out midway, bits consumed so far are lost
    pub fn get_bits(&mut self, num_bits: u8) -> Result<u32, DecodeErrorStatus> {
        debug_assert!(num_bits <= 32);

        let mut value = 0_u32;
        let mut filled = 0_u8;

        while filled < num_bits {
            if self.bits_left == 0 {
                self.refill()?;
            }
            let take = core::cmp::min(num_bits - filled, self.bits_left);
            let mask = (1_u32 << take) - 1;

            value |= (u32::from(self.buffer) & mask) << filled;

            // take may be 8, which would overflow a u8 shift
            self.buffer = (u32::from(self.buffer) >> take) as u8;
            self.bits_left -= take;
            filled += take;
        }
        Ok(value)
    }

    /// Read a single bit
    #[inline(always)]
    pub fn get_bit(&mut self) -> Result<u32, DecodeErrorStatus> {
        if self.bits_left == 0 {
            self.refill()?;
        }
        let bit = u32::from(self.buffer & 1);

        self.buffer >>= 1;
        self.bits_left -= 1;

        Ok(bit)
    }

    /// Discard the remaining bits of a partially consumed byte
    pub fn skip_to_byte_boundary(&mut self) {
        self.buffer = 0;
        self.bits_left = 0;
    }

    /// Read a whole byte straight from the source.
    ///
    /// Callers must be on a byte boundary
    #[inline(always)]
    pub fn get_aligned_byte(&mut self) -> Result<u8, DecodeErrorStatus> {
        debug_assert_eq!(self.get_bits_left(), 0);

        Ok(self.source.next_byte()?)
    }

    /// Get number of bits left in the bit buffer.
    pub const fn get_bits_left(&self) -> u8 {
        self.bits_left
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use pico_core::bytestream::SliceSource;

    use crate::bitstream::BitStreamReader;
    use crate::errors::DecodeErrorStatus;

    #[test]
    fn bits_come_out_lsb_first() {
        let mut reader = BitStreamReader::new(SliceSource::new(&[0b1011_0110, 0xFF]));

        assert_eq!(reader.get_bits(1).unwrap(), 0);
        assert_eq!(reader.get_bits(2).unwrap(), 0b11);
        assert_eq!(reader.get_bits(3).unwrap(), 0b110);
        // two bits from the first byte, two from the second
        assert_eq!(reader.get_bits(4).unwrap(), 0b1110);
        assert_eq!(reader.get_bits_left(), 6);
    }

    #[test]
    fn wide_reads_span_bytes() {
        let mut reader = BitStreamReader::new(SliceSource::new(&[0x78, 0x56, 0x34, 0x12, 0xAB]));

        assert_eq!(reader.get_bits(32).unwrap(), 0x1234_5678);
        assert_eq!(reader.get_bits(8).unwrap(), 0xAB);
    }

    #[test]
    fn skip_drops_partial_byte() {
        let mut reader = BitStreamReader::new(SliceSource::new(&[0xFF, 0x01, 0x02]));

        assert_eq!(reader.get_bits(3).unwrap(), 0b111);
        reader.skip_to_byte_boundary();

        assert_eq!(reader.get_aligned_byte().unwrap(), 0x01);
        // one byte left, not enough for 16 bits
        assert!(matches!(
            reader.get_bits(16),
            Err(DecodeErrorStatus::InsufficientData)
        ));
    }

    #[test]
    fn exhaustion_is_insufficient_data() {
        let mut reader = BitStreamReader::new(SliceSource::new(&[0xAA]));

        assert!(reader.get_bits(8).is_ok());
        assert!(matches!(
            reader.get_bit(),
            Err(DecodeErrorStatus::InsufficientData)
        ));
    }
}
