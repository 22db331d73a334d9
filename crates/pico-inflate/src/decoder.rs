/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;
use alloc::vec::Vec;

use pico_core::bytestream::{ByteSink, ByteSource, SliceSource};
#[cfg(feature = "zlib")]
use pico_core::log::{debug, warn};
use pico_core::log::trace;

use crate::bitstream::BitStreamReader;
#[cfg(feature = "zlib")]
use crate::checksum::AdlerAccumulator;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    DEFLATE_END_OF_BLOCK, DEFLATE_FIRST_LEN_SYM, DEFLATE_NUM_LITLEN_SYMS, DEFLATE_NUM_OFFSET_SYMS,
    DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION, DISTANCE_EXTRA_BITS,
    FIXED_LITLEN_LENS, FIXED_OFFSET_LENS, LENGTH_EXTRA_BITS
};
use crate::enums::DeflateState;
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::huffman::{HuffmanArena, HuffmanTree};
use crate::options::DeflateOptions;
use crate::window::SlidingWindow;
#[cfg(feature = "zlib")]
use crate::zlib::ZlibHeader;

/// Where decoded bytes go, every byte passes through here exactly once
struct OutputStream<K: ByteSink> {
    sink:          K,
    bytes_emitted: usize,
    limit:         usize,
    #[cfg(feature = "zlib")]
    adler:         Option<AdlerAccumulator>
}

impl<K: ByteSink> OutputStream<K> {
    #[inline(always)]
    fn emit(&mut self, byte: u8) -> Result<(), DecodeErrorStatus> {
        if self.bytes_emitted >= self.limit {
            return Err(DecodeErrorStatus::OutputLimitExceeded(
                self.limit,
                self.bytes_emitted + 1
            ));
        }
        self.sink.put_byte(byte);
        self.bytes_emitted += 1;

        #[cfg(feature = "zlib")]
        if let Some(adler) = self.adler.as_mut() {
            adler.update(byte);
        }
        Ok(())
    }
}

/// A streaming deflate/zlib decoder
///
/// Compressed bytes are pulled from a [`ByteSource`] strictly in order
/// and every decoded byte is pushed to a [`ByteSink`] as soon as it is
/// known, nothing is buffered besides the sliding window.
///
/// # Example
/// ```
/// use pico_core::bytestream::SliceSource;
/// use pico_inflate::InflateDecoder;
///
/// // "hello" at compression level 0
/// let data = [
///     0x78, 0x01, 0x01, 0x05, 0x00, 0xFA, 0xFF, b'h', b'e', b'l', b'l', b'o', 0x06, 0x2C,
///     0x02, 0x15
/// ];
/// let mut out = Vec::new();
/// let mut decoder = InflateDecoder::new(SliceSource::new(&data), &mut out);
///
/// assert_eq!(decoder.decode_zlib().unwrap(), 5);
/// assert_eq!(out, b"hello");
/// ```
pub struct InflateDecoder<S: ByteSource, K: ByteSink> {
    stream:              BitStreamReader<S>,
    output:              OutputStream<K>,
    arena:               HuffmanArena,
    litlen_tree:         HuffmanTree,
    offset_tree:         HuffmanTree,
    state:               DeflateState,
    is_last_block:       bool,
    static_codes_loaded: bool,
    options:             DeflateOptions
}

impl<S: ByteSource, K: ByteSink> InflateDecoder<S, K> {
    /// Create a new decoder with default options
    pub fn new(source: S, sink: K) -> InflateDecoder<S, K> {
        InflateDecoder::new_with_options(source, sink, DeflateOptions::default())
    }

    /// Create a new decoder with the given options
    pub fn new_with_options(source: S, sink: K, options: DeflateOptions) -> InflateDecoder<S, K> {
        InflateDecoder {
            stream: BitStreamReader::new(source),
            output: OutputStream {
                sink,
                bytes_emitted: 0,
                limit: options.get_limit(),
                #[cfg(feature = "zlib")]
                adler: None
            },
            arena: HuffmanArena::new(),
            litlen_tree: HuffmanTree::default(),
            offset_tree: HuffmanTree::default(),
            state: DeflateState::BlockHeader,
            is_last_block: false,
            static_codes_loaded: false,
            options
        }
    }

    /// Bytes handed to the sink by the current (or last) stream
    pub const fn bytes_emitted(&self) -> usize {
        self.output.bytes_emitted
    }

    pub fn sink(&self) -> &K {
        &self.output.sink
    }

    /// Give back the source and the sink
    pub fn into_inner(self) -> (S, K) {
        (self.stream.into_inner(), self.output.sink)
    }

    /// Decode a zlib stream, returning how many bytes were emitted
    ///
    /// # Errors
    /// Any failure is also passed to the sink's
    /// [`report_error`](ByteSink::report_error) hook.
    ///
    /// A checksum mismatch is detected only after every byte has reached
    /// the sink, those bytes stay there. [`bytes_emitted`](Self::bytes_emitted)
    /// tells how many there are.
    #[cfg(feature = "zlib")]
    pub fn decode_zlib(&mut self) -> Result<usize, DecodeErrorStatus> {
        let result = self.decode_zlib_inner();
        self.report(result)
    }

    #[cfg(feature = "zlib")]
    fn decode_zlib_inner(&mut self) -> Result<usize, DecodeErrorStatus> {
        self.stream.skip_to_byte_boundary();

        let cmf = self.stream.get_aligned_byte()?;
        let flg = self.stream.get_aligned_byte()?;

        let header = ZlibHeader::parse(cmf, flg)?;

        debug!(
            "Zlib window size: {}, compression level: {}",
            1_usize << header.window_bits(),
            header.compression_level()
        );

        self.output.adler = if self.options.get_confirm_checksum() {
            Some(AdlerAccumulator::new())
        } else {
            None
        };

        self.inflate(header.window_bits())?;

        let mut trailer = [0_u8; 4];

        for byte in trailer.iter_mut() {
            *byte = self.stream.get_aligned_byte()?;
        }
        let stored_adler = u32::from_be_bytes(trailer);

        if let Some(adler) = self.output.adler.as_mut() {
            let found = adler.finish();

            if stored_adler != found {
                warn!(
                    "Adler mismatch after {} bytes, stream says {stored_adler:#010x}, data is {found:#010x}",
                    self.output.bytes_emitted
                );
                return Err(DecodeErrorStatus::MismatchedAdler(stored_adler, found));
            }
        }
        Ok(self.output.bytes_emitted)
    }

    /// Decode a raw deflate stream (no zlib header or trailer)
    ///
    /// The window size comes from [`DeflateOptions::set_window_bits`].
    ///
    /// # Errors
    /// Any failure is also passed to the sink's
    /// [`report_error`](ByteSink::report_error) hook.
    pub fn decode_deflate(&mut self) -> Result<usize, DecodeErrorStatus> {
        #[cfg(feature = "zlib")]
        {
            self.output.adler = None;
        }
        self.stream.skip_to_byte_boundary();

        let result = self
            .inflate(self.options.get_window_bits())
            .map(|_| self.output.bytes_emitted);

        self.report(result)
    }

    fn report<T>(&mut self, result: Result<T, DecodeErrorStatus>) -> Result<T, DecodeErrorStatus> {
        if let Err(err) = &result {
            let message = format!("{err}");
            self.output.sink.report_error(message.trim_end());
        }
        result
    }

    /// Run the block state machine until the final block ends
    fn inflate(&mut self, window_bits: u8) -> Result<(), DecodeErrorStatus> {
        let mut window = SlidingWindow::new(window_bits);

        trace!("Sliding window of {} bytes", window.size());

        self.output.bytes_emitted = 0;
        self.state = DeflateState::BlockHeader;
        self.is_last_block = false;

        loop {
            match self.state {
                DeflateState::BlockHeader => self.read_block_header()?,
                DeflateState::Stored => {
                    self.copy_stored_block(&mut window)?;
                    self.finish_block();
                }
                DeflateState::FixedTables => {
                    self.load_fixed_tables()?;
                    self.state = DeflateState::BlockBody;
                }
                DeflateState::DynamicTables => {
                    self.load_dynamic_tables()?;
                    self.state = DeflateState::BlockBody;
                }
                DeflateState::BlockBody => {
                    self.inflate_block(&mut window)?;
                    self.finish_block();
                }
                DeflateState::Done => break
            }
        }
        // whatever follows starts on a byte boundary
        self.stream.skip_to_byte_boundary();

        Ok(())
    }

    fn finish_block(&mut self) {
        self.state = if self.is_last_block {
            DeflateState::Done
        } else {
            DeflateState::BlockHeader
        };
    }

    fn read_block_header(&mut self) -> Result<(), DecodeErrorStatus> {
        self.is_last_block = self.stream.get_bits(1)? == 1;

        self.state = match self.stream.get_bits(2)? {
            DEFLATE_BLOCKTYPE_UNCOMPRESSED => DeflateState::Stored,
            DEFLATE_BLOCKTYPE_STATIC => DeflateState::FixedTables,
            DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => DeflateState::DynamicTables,
            _ => return Err(DecodeErrorStatus::BadBlockType)
        };
        trace!(
            "Block {:?} at output byte {}, last: {}",
            self.state,
            self.output.bytes_emitted,
            self.is_last_block
        );
        Ok(())
    }

    fn copy_stored_block(&mut self, window: &mut SlidingWindow) -> Result<(), DecodeErrorStatus> {
        self.stream.skip_to_byte_boundary();

        let len = self.stream.get_bits(16)? as u16;
        let nlen = self.stream.get_bits(16)? as u16;

        if nlen != !len {
            return Err(DecodeErrorStatus::StoredLengthMismatch(len, nlen));
        }
        for _ in 0..len {
            let byte = self.stream.get_aligned_byte()?;

            window.push(byte);
            self.output.emit(byte)?;
        }
        Ok(())
    }

    fn load_fixed_tables(&mut self) -> Result<(), DecodeErrorStatus> {
        if self.static_codes_loaded {
            return Ok(());
        }
        self.arena.reset();

        self.litlen_tree = self.arena.build_tree(&FIXED_LITLEN_LENS)?;
        self.offset_tree = self.arena.build_tree(&FIXED_OFFSET_LENS)?;

        self.static_codes_loaded = true;

        Ok(())
    }

    fn load_dynamic_tables(&mut self) -> Result<(), DecodeErrorStatus> {
        self.static_codes_loaded = false;
        self.arena.reset();

        // Read codeword lengths
        let num_litlen_syms = 257 + self.stream.get_bits(5)? as usize;
        let num_offset_syms = 1 + self.stream.get_bits(5)? as usize;
        let num_explicit_precode_lens = 4 + self.stream.get_bits(4)? as usize;

        if num_litlen_syms > 286 || num_offset_syms > 30 {
            return Err(DecodeErrorStatus::CorruptData(
                "Too many length or distance symbols"
            ));
        }

        let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

        for i in DEFLATE_PRECODE_LENS_PERMUTATION
            .iter()
            .take(num_explicit_precode_lens)
        {
            precode_lens[usize::from(*i)] = self.stream.get_bits(3)? as u8;
        }
        let precode_tree = self.arena.build_tree(&precode_lens)?;

        /* Decode the litlen and offset codeword lengths. */
        let mut lens = [0_u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
        let total = num_litlen_syms + num_offset_syms;
        let mut i = 0;

        while i < total {
            let presym = self.arena.decode_symbol(precode_tree, &mut self.stream)?;

            let (rep_val, rep_count) = match presym {
                0..=15 => {
                    // explicit codeword length
                    lens[i] = presym as u8;
                    i += 1;
                    continue;
                }
                16 => {
                    if i == 0 {
                        return Err(DecodeErrorStatus::CorruptData(
                            "Length repeat with no previous length"
                        ));
                    }
                    (lens[i - 1], 3 + self.stream.get_bits(2)?)
                }
                17 => (0, 3 + self.stream.get_bits(3)?),
                18 => (0, 11 + self.stream.get_bits(7)?),
                _ => return Err(DecodeErrorStatus::CorruptData("Invalid precode symbol"))
            };
            let end = i + rep_count as usize;

            if end > total {
                return Err(DecodeErrorStatus::CorruptData(
                    "Codeword length run overflows the tables"
                ));
            }
            lens[i..end].fill(rep_val);
            i = end;
        }

        let (litlen_lens, offset_lens) = lens[..total].split_at(num_litlen_syms);

        if litlen_lens[usize::from(DEFLATE_END_OF_BLOCK)] == 0 {
            return Err(DecodeErrorStatus::CorruptData("Missing end-of-block code"));
        }
        // the precode tree stays in the arena, it is small and the
        // arena is sized for all three
        self.litlen_tree = self.arena.build_tree(litlen_lens)?;
        self.offset_tree = self.arena.build_tree(offset_lens)?;

        trace!("Dynamic tables took {} tree nodes", self.arena.nodes_used());

        Ok(())
    }

    /// Decode literals and matches until the end-of-block symbol
    fn inflate_block(&mut self, window: &mut SlidingWindow) -> Result<(), DecodeErrorStatus> {
        loop {
            let symbol = self
                .arena
                .decode_symbol(self.litlen_tree, &mut self.stream)?;

            if symbol < DEFLATE_END_OF_BLOCK {
                let byte = symbol as u8;

                window.push(byte);
                self.output.emit(byte)?;
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK {
                return Ok(());
            }

            let (extra_bits, base) = *LENGTH_EXTRA_BITS
                .get(usize::from(symbol - DEFLATE_FIRST_LEN_SYM))
                .ok_or(DecodeErrorStatus::CorruptData("Invalid length symbol"))?;

            let length = usize::from(base) + self.stream.get_bits(extra_bits)? as usize;

            let offset_sym = self
                .arena
                .decode_symbol(self.offset_tree, &mut self.stream)?;

            let (extra_bits, base) = *DISTANCE_EXTRA_BITS
                .get(usize::from(offset_sym))
                .ok_or(DecodeErrorStatus::CorruptData("Invalid distance symbol"))?;

            let distance = usize::from(base) + self.stream.get_bits(extra_bits)? as usize;

            let output = &mut self.output;

            window.copy_back(distance, length, |byte| output.emit(byte))?;
        }
    }
}

/// A deflate/zlib decoder over an in-memory buffer
///
/// This wraps [`InflateDecoder`] for the common case of having the whole
/// compressed stream in memory and wanting a `Vec` back.
///
/// # Example
/// ```
/// use pico_inflate::DeflateDecoder;
///
/// let data = [0x78, 0x01, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01];
/// let mut decoder = DeflateDecoder::new(&data);
///
/// assert!(decoder.decode_zlib().unwrap().is_empty());
/// ```
pub struct DeflateDecoder<'a> {
    data:    &'a [u8],
    options: DeflateOptions
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    ///
    /// # Arguments
    /// - `data`: The compressed data, either zlib or raw deflate
    ///   depending on which decode function is called.
    ///
    /// # Note
    ///
    /// The default output size limit is **1 GiB.**
    /// Deflate does not store the output size anywhere, the limit
    /// stops a small stream from exhausting memory.
    ///
    /// The checksum is only verified for zlib streams.
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        DeflateDecoder::new_with_options(data, DeflateOptions::default())
    }

    /// Create new decoder with specified options
    ///
    /// This can be used to fine tune the decoder to the user's
    /// needs.
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a> {
        DeflateDecoder { data, options }
    }

    fn run<F>(&self, decode: F) -> Result<Vec<u8>, InflateDecodeErrors>
    where
        F: FnOnce(&mut InflateDecoder<SliceSource<'a>, Vec<u8>>) -> Result<usize, DecodeErrorStatus>
    {
        let capacity = core::cmp::min(self.options.get_size_hint(), self.options.get_limit());
        let out = Vec::with_capacity(capacity);

        let mut decoder =
            InflateDecoder::new_with_options(SliceSource::new(self.data), out, self.options);

        let result = decode(&mut decoder);
        let (_, out) = decoder.into_inner();

        match result {
            Ok(_) => Ok(out),
            Err(err) => Err(InflateDecodeErrors::new(err, out))
        }
    }

    /// Decode zlib-encoded data returning the uncompressed in a `Vec<u8>`
    /// or an error if something went wrong.
    ///
    /// On a checksum mismatch the error still carries every decoded byte.
    #[cfg(feature = "zlib")]
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        self.run(|decoder| decoder.decode_zlib())
    }

    /// Decode a raw deflate stream returning the uncompressed data
    /// in a `Vec<u8>`
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors> {
        self.run(|decoder| decoder.decode_deflate())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use pico_core::bytestream::SliceSource;

    use crate::decoder::InflateDecoder;

    #[test]
    fn fixed_tables_survive_later_fixed_blocks() {
        // raw stream 1: one final fixed block holding "a"
        // raw stream 2: two fixed blocks holding "b" and "c"
        let data = [0x4B, 0x04, 0x00, 0x4A, 0x02, 0x2C, 0x19, 0x00];
        let mut out = Vec::new();
        let mut decoder = InflateDecoder::new(SliceSource::new(&data), &mut out);

        assert_eq!(decoder.decode_deflate().unwrap(), 1);
        assert!(decoder.static_codes_loaded);

        let fixed_nodes = decoder.arena.nodes_used();
        assert_eq!(fixed_nodes, (2 * 288 - 1) + (2 * 32 - 1));

        // a rebuild would reset the arena and drop this tree
        decoder.arena.build_tree(&[1, 1]).unwrap();
        let marked_nodes = decoder.arena.nodes_used();

        assert_eq!(decoder.decode_deflate().unwrap(), 2);
        assert_eq!(decoder.arena.nodes_used(), marked_nodes);
        assert_eq!(marked_nodes, fixed_nodes + 3);
        assert_eq!(out, b"abc");
    }
}
