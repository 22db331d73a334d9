#![no_main]

use libfuzzer_sys::fuzz_target;
use pico_inflate::pico_core::bytestream::{ChunkedSource, CountingSink};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 {
        let compression_level = data[0];
        let chunk_size = usize::from(data[1]) + 1;
        let data = &data[2..];
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(data, compression_level);

        // contiguous
        let decoded = pico_inflate::DeflateDecoder::new(&compressed)
            .decode_zlib()
            .expect("Failed to decompress valid compressed data!");
        assert!(
            data == decoded,
            "The decompressed data doesn't match the original data!"
        );

        // split into chunks
        let source = ChunkedSource::new(compressed.chunks(chunk_size));
        let mut decoder = pico_inflate::InflateDecoder::new(source, CountingSink::new());

        assert_eq!(decoder.decode_zlib().unwrap(), data.len());
    }
});
