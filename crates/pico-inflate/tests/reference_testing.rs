/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::prelude::*;
use std::io::Cursor;

use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;
use nanorand::Rng;
use pico_core::bytestream::{ChunkedSource, ReaderSource};
use pico_inflate::{DeflateDecoder, DeflateOptions, InflateDecoder};

fn encode_zlib(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn encode_deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn decode_writer_flate(bytes: &[u8]) -> Vec<u8> {
    let mut writer = Vec::new();

    let mut deflater = flate2::read::ZlibDecoder::new(Cursor::new(bytes));

    deflater.read_to_end(&mut writer).unwrap();

    writer
}

fn decode_writer_pico(bytes: &[u8]) -> Vec<u8> {
    let mut deflater = DeflateDecoder::new(bytes);

    deflater.decode_zlib().unwrap()
}

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rand = nanorand::WyRand::new_seed(seed);

    (0..len).map(|_| rand.generate::<u8>()).collect()
}

fn text_corpus() -> Vec<u8> {
    let sentence = b"The quick brown fox jumps over the lazy dog, then naps in the sun. ";
    let mut out = Vec::new();

    for i in 0..2000_usize {
        out.extend_from_slice(&sentence[..(i * 7) % sentence.len() + 1]);
        out.extend_from_slice(i.to_string().as_bytes());
    }
    out
}

fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty", Vec::new()),
        ("one byte", vec![42]),
        ("repetitive 64k", (0..65536_u32).map(|x| (x % 7) as u8).collect()),
        ("zeros 64k", vec![0; 65536]),
        ("random 64k", random_bytes(65536, 0x5EED)),
        ("text", text_corpus()),
    ]
}

#[test]
fn zlib_round_trip_all_levels() {
    for (name, data) in corpus() {
        for level in 0..=9 {
            let compressed = encode_zlib(&data, level);
            let decoded = decode_writer_pico(&compressed);

            assert_eq!(decoded.len(), data.len(), "{name} at level {level}");
            assert!(decoded == data, "{name} at level {level} does not match");
        }
    }
}

#[test]
fn test_similarity() {
    for (name, data) in corpus() {
        let compressed = encode_zlib(&data, 6);

        let pico_data = decode_writer_pico(&compressed);
        let flate_data = decode_writer_flate(&compressed);

        assert_eq!(pico_data.len(), flate_data.len());
        for ((pos, a), b) in pico_data.iter().enumerate().zip(flate_data.iter()) {
            if a != b {
                panic!("[{name}][position: {pos}]: {a} {b} do not match");
            }
        }
    }
}

#[test]
fn raw_deflate_round_trip() {
    for (name, data) in corpus() {
        for level in [0, 1, 6, 9] {
            let compressed = encode_deflate(&data, level);
            let decoded = DeflateDecoder::new(&compressed).decode_deflate().unwrap();

            assert!(decoded == data, "{name} at level {level} does not match");
        }
    }
}

#[test]
fn streaming_reports_bytes_emitted() {
    let data = text_corpus();
    let compressed = encode_zlib(&data, 9);

    let mut out = Vec::new();
    let mut decoder = InflateDecoder::new(pico_core::bytestream::SliceSource::new(&compressed), &mut out);

    let emitted = decoder.decode_zlib().unwrap();

    assert_eq!(emitted, data.len());
    assert_eq!(decoder.bytes_emitted(), data.len());
    assert!(out == data);
}

#[test]
fn chunked_input_decodes_like_contiguous_input() {
    let data = random_bytes(5000, 7)
        .into_iter()
        .chain(text_corpus())
        .collect::<Vec<u8>>();
    let compressed = encode_zlib(&data, 6);

    for chunk_size in [1, 2, 3, 13, 512, 8192] {
        let mut out = Vec::new();
        let source = ChunkedSource::new(compressed.chunks(chunk_size));

        let mut decoder = InflateDecoder::new(source, &mut out);
        decoder.decode_zlib().unwrap();

        assert!(out == data, "chunk size {chunk_size}");
    }
}

#[test]
fn reader_source_decodes() {
    let data = text_corpus();
    let compressed = encode_zlib(&data, 6);

    let mut out = Vec::new();
    let mut decoder = InflateDecoder::new(ReaderSource::new(Cursor::new(compressed)), &mut out);

    decoder.decode_zlib().unwrap();

    assert!(out == data);
}

#[test]
fn back_to_back_streams_share_a_source() {
    let first = text_corpus();
    let second = random_bytes(1000, 99);

    let mut compressed = encode_zlib(&first, 6);
    compressed.extend_from_slice(&encode_zlib(&second, 1));

    let mut out = Vec::new();
    let mut decoder =
        InflateDecoder::new(pico_core::bytestream::SliceSource::new(&compressed), &mut out);

    assert_eq!(decoder.decode_zlib().unwrap(), first.len());
    assert_eq!(decoder.decode_zlib().unwrap(), second.len());

    let (mut source, _) = decoder.into_inner();

    assert_eq!(source.remaining(), 0);
    assert!(pico_core::bytestream::ByteSource::next_byte(&mut source).is_err());
    assert_eq!(out.len(), first.len() + second.len());
}

#[test]
fn unchecked_checksum_still_decodes() {
    let data = text_corpus();
    let mut compressed = encode_zlib(&data, 6);
    let last = compressed.len() - 1;
    compressed[last] ^= 0xFF;

    let options = DeflateOptions::default().set_confirm_checksum(false);
    let decoded = DeflateDecoder::new_with_options(&compressed, options)
        .decode_zlib()
        .unwrap();

    assert!(decoded == data);
}

#[test]
fn output_limit_is_enforced() {
    let data = vec![1_u8; 10_000];
    let compressed = encode_zlib(&data, 9);

    let options = DeflateOptions::default().set_limit(4096);
    let err = DeflateDecoder::new_with_options(&compressed, options)
        .decode_zlib()
        .unwrap_err();

    assert!(matches!(
        err.error,
        pico_inflate::errors::DecodeErrorStatus::OutputLimitExceeded(4096, 4097)
    ));
    // everything up to the limit made it out
    assert_eq!(err.data.len(), 4096);
}

#[test]
fn size_hint_larger_than_limit_is_fine() {
    let data = random_bytes(100, 3);
    let compressed = encode_zlib(&data, 6);

    let options = DeflateOptions::default()
        .set_limit(100)
        .set_size_hint(1 << 20);
    let decoded = DeflateDecoder::new_with_options(&compressed, options)
        .decode_zlib()
        .unwrap();

    assert!(decoded == data);
}
