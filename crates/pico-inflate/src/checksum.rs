/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "zlib")]

//! Running Adler-32 of the bytes a zlib stream emits
use simd_adler32::Adler32;

const STAGING_SIZE: usize = 256;

/// Adler-32 fed one byte at a time.
///
/// Bytes are staged in a small buffer and folded into the hasher in
/// blocks, which lets the SIMD hasher do its job even though the decoder
/// produces output byte by byte.
pub struct AdlerAccumulator {
    hasher:  Adler32,
    staging: [u8; STAGING_SIZE],
    staged:  usize
}

impl AdlerAccumulator {
    pub fn new() -> AdlerAccumulator {
        AdlerAccumulator {
            hasher:  Adler32::new(),
            staging: [0; STAGING_SIZE],
            staged:  0
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) {
        self.staging[self.staged] = byte;
        self.staged += 1;

        if self.staged == STAGING_SIZE {
            self.flush();
        }
    }

    fn flush(&mut self) {
        self.hasher.write(&self.staging[..self.staged]);
        self.staged = 0;
    }

    /// Checksum of every byte seen so far
    pub fn finish(&mut self) -> u32 {
        self.flush();
        self.hasher.finish()
    }
}

impl Default for AdlerAccumulator {
    fn default() -> Self {
        AdlerAccumulator::new()
    }
}
