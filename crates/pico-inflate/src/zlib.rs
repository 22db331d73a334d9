/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The two byte zlib header
//!
//! See https://www.ietf.org/rfc/rfc1950.txt for the RFC
use crate::constants::{MAX_WINDOW_BITS, MIN_WINDOW_BITS, ZLIB_CM_DEFLATE};
use crate::errors::DecodeErrorStatus;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ZlibHeader {
    cmf: u8,
    flg: u8
}

impl ZlibHeader {
    /// Validate `CMF` and `FLG`.
    ///
    /// Checks happen in this order: compression method, window size,
    /// preset dictionary, then the `FCHECK` bits.
    pub fn parse(cmf: u8, flg: u8) -> Result<ZlibHeader, DecodeErrorStatus> {
        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;
        let fdict = (flg >> 5) & 1;

        if cm != ZLIB_CM_DEFLATE {
            return Err(DecodeErrorStatus::UnsupportedCompressionMethod(cm));
        }
        if cinfo + MIN_WINDOW_BITS > MAX_WINDOW_BITS {
            return Err(DecodeErrorStatus::UnsupportedWindowSize(cinfo));
        }
        if fdict == 1 {
            // we have no way of being handed a dictionary
            return Err(DecodeErrorStatus::PresetDictionary);
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            return Err(DecodeErrorStatus::CorruptHeader);
        }
        Ok(ZlibHeader { cmf, flg })
    }

    /// Log2 of the window the stream was compressed with, `8..=15`
    pub const fn window_bits(&self) -> u8 {
        MIN_WINDOW_BITS + (self.cmf >> 4)
    }

    /// The `FLEVEL` hint, 0 (fastest) to 3 (maximum compression)
    pub const fn compression_level(&self) -> u8 {
        self.flg >> 6
    }
}
