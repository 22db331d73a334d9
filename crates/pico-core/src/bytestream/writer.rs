/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::bytestream::ByteSink;

impl ByteSink for Vec<u8> {
    #[inline(always)]
    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// A sink that throws bytes away, keeping only their count
/// and the last error reported to it.
///
/// Useful for validating a stream or measuring its decoded size
/// without storing it.
#[derive(Default, Debug, Clone)]
pub struct CountingSink {
    count:      usize,
    last_error: Option<String>
}

impl CountingSink {
    pub fn new() -> CountingSink {
        CountingSink::default()
    }
    /// Number of bytes received so far
    pub const fn count(&self) -> usize {
        self.count
    }
    /// The last message passed to [`report_error`](ByteSink::report_error), if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl ByteSink for CountingSink {
    #[inline(always)]
    fn put_byte(&mut self, _: u8) {
        self.count += 1;
    }

    fn report_error(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bytestream::{ByteSink, CountingSink};

    #[test]
    fn counting_sink_keeps_last_error() {
        let mut sink = CountingSink::new();

        for byte in 0..10 {
            sink.put_byte(byte);
        }
        sink.report_error("first");
        sink.report_error("second");

        assert_eq!(sink.count(), 10);
        assert_eq!(sink.last_error(), Some("second"));
    }

    fn fill<K: ByteSink>(mut sink: K) {
        sink.put_byte(7);
        sink.put_byte(8);
    }

    #[test]
    fn vec_sink_through_mutable_reference() {
        let mut out = Vec::new();

        fill(&mut out);

        assert_eq!(out, [7, 8]);
    }
}
