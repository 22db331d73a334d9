/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The LZ77 sliding window
//!
//! A circular buffer holding the most recent output, sized to a power
//! of two so positions wrap with a mask. It is allocated once per stream
//! and never resized.
use alloc::vec;
use alloc::vec::Vec;

use crate::constants::{MAX_WINDOW_BITS, MIN_WINDOW_BITS};
use crate::errors::DecodeErrorStatus;

pub struct SlidingWindow {
    buffer:   Vec<u8>,
    mask:     usize,
    // next write, wraps through `mask`
    position: usize,
    // how many bytes of history are valid, saturates at the window size
    filled:   usize
}

impl SlidingWindow {
    /// Create a window of `2^window_bits` bytes, `window_bits` is
    /// clamped to `8..=15`
    pub fn new(window_bits: u8) -> SlidingWindow {
        let bits = window_bits.clamp(MIN_WINDOW_BITS, MAX_WINDOW_BITS);
        let size = 1_usize << bits;

        SlidingWindow {
            buffer:   vec![0; size],
            mask:     size - 1,
            position: 0,
            filled:   0
        }
    }

    #[cfg_attr(not(feature = "log"), allow(dead_code))]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes of history a back-reference may reach into
    pub const fn available(&self) -> usize {
        self.filled
    }

    #[inline(always)]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.position & self.mask] = byte;
        self.position = self.position.wrapping_add(1);

        if self.filled <= self.mask {
            self.filled += 1;
        }
    }

    /// Copy `length` bytes starting `distance` bytes back, handing each
    /// one to `emit` as it is written.
    ///
    /// Source and destination overlap whenever `distance < length`, so the
    /// copy goes strictly one byte at a time, each byte written before the
    /// next is read. That is what turns `distance = 1` into a run.
    ///
    /// # Errors
    /// - `distance` is zero or reaches past the history we hold
    /// - whatever `emit` returns, the copy stops there
    pub fn copy_back<F>(
        &mut self, distance: usize, length: usize, mut emit: F
    ) -> Result<(), DecodeErrorStatus>
    where
        F: FnMut(u8) -> Result<(), DecodeErrorStatus>
    {
        if distance == 0 || distance > self.available() {
            return Err(DecodeErrorStatus::CorruptData(
                "Back-reference distance too far back"
            ));
        }
        for _ in 0..length {
            let byte = self.buffer[self.position.wrapping_sub(distance) & self.mask];

            self.push(byte);
            emit(byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::window::SlidingWindow;

    #[test]
    fn distance_one_repeats_last_byte() {
        let mut window = SlidingWindow::new(8);
        let mut out = Vec::new();

        window.push(0xAA);
        window
            .copy_back(1, 10, |byte| {
                out.push(byte);
                Ok(())
            })
            .unwrap();

        assert_eq!(out, [0xAA; 10]);
        assert_eq!(window.available(), 11);
    }

    #[test]
    fn overlapping_copy_repeats_pattern() {
        let mut window = SlidingWindow::new(8);
        let mut out = Vec::new();

        for byte in *b"xab" {
            window.push(byte);
        }
        window
            .copy_back(2, 5, |byte| {
                out.push(byte);
                Ok(())
            })
            .unwrap();

        assert_eq!(out, b"ababa");
    }

    #[test]
    fn copies_wrap_around_the_buffer() {
        let mut window = SlidingWindow::new(8);

        for i in 0..300_u32 {
            window.push(i as u8);
        }
        assert_eq!(window.size(), 256);
        assert_eq!(window.available(), 256);

        let mut out = Vec::new();
        window
            .copy_back(256, 3, |byte| {
                out.push(byte);
                Ok(())
            })
            .unwrap();
        // 300 - 256 = 44
        assert_eq!(out, [44, 45, 46]);
    }

    #[test]
    fn reaching_before_stream_start_fails() {
        let mut window = SlidingWindow::new(15);

        window.push(1);
        window.push(2);

        assert!(window.copy_back(3, 1, |_| Ok(())).is_err());
        assert!(window.copy_back(0, 1, |_| Ok(())).is_err());
    }

    #[test]
    fn window_bits_are_clamped() {
        assert_eq!(SlidingWindow::new(3).size(), 256);
        assert_eq!(SlidingWindow::new(20).size(), 32768);
    }
}
