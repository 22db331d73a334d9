/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::constants::{MAX_WINDOW_BITS, MIN_WINDOW_BITS};

/// Options that can influence decompression
/// in Deflate/Zlib
///
/// # Example
/// ```
/// use pico_inflate::DeflateOptions;
///
/// let options = DeflateOptions::default()
///     .set_confirm_checksum(false)
///     .set_limit(1 << 20);
///
/// assert!(!options.get_confirm_checksum());
/// assert_eq!(options.get_limit(), 1 << 20);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct DeflateOptions {
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize,
    window_bits:      u8
}

impl Default for DeflateOptions {
    fn default() -> Self {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: true,
            size_hint:        37000,
            window_bits:      MAX_WINDOW_BITS
        }
    }
}

impl DeflateOptions {
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the output past this many bytes
    pub const fn get_limit(&self) -> usize {
        self.limit
    }
    /// Set a limit to the internal vector
    /// used to store decoded zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    /// # Returns
    /// The modified options
    ///
    /// # Note
    /// This is a provision against malicious input, where a tiny
    /// stream expands into gigabytes of output.
    #[must_use]
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn get_confirm_checksum(&self) -> bool {
        self.confirm_checksum
    }
    /// Set whether the decoder should confirm a checksum
    /// after decoding
    ///
    /// Note, you should definitely confirm your checksum, use
    /// this with caution, otherwise data returned may be corrupt
    ///
    /// # Arguments
    /// - yes: When true, the decoder will confirm checksum
    ///   when false, the decoder will not confirm checksum
    #[must_use]
    pub fn set_confirm_checksum(mut self, yes: bool) -> Self {
        self.confirm_checksum = yes;
        self
    }

    /// Get the default size hint for the decompressor
    ///
    /// The decompressor initializes the internal storage for decompressed bytes
    /// with this size and will reallocate the vec if the decompressed size becomes bigger
    /// than this, but when the caller knows the size of data before decompression,
    /// you can set the size hint to this value to reduce the number of allocations
    pub const fn get_size_hint(&self) -> usize {
        self.size_hint
    }
    /// Set the size hint for the decompressor
    ///
    /// This can be used to prevent multiple re-allocations
    #[must_use]
    pub const fn set_size_hint(mut self, hint: usize) -> Self {
        self.size_hint = hint;
        self
    }

    /// Get the window exponent used for raw deflate streams
    pub const fn get_window_bits(&self) -> u8 {
        self.window_bits
    }
    /// Set the window exponent used for raw deflate streams,
    /// clamped to `8..=15`
    ///
    /// Zlib streams ignore this and read the window size from their header.
    /// A window smaller than the one the encoder used makes decoding fail.
    #[must_use]
    pub fn set_window_bits(mut self, bits: u8) -> Self {
        self.window_bits = bits.clamp(MIN_WINDOW_BITS, MAX_WINDOW_BITS);
        self
    }
}
