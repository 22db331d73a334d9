/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{Cursor, Read, Write};
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::ZlibEncoder;
use flate2::Compression;

fn decode_writer_flate(bytes: &[u8]) -> Vec<u8> {
    let mut writer = Vec::new();

    let mut deflater = flate2::read::ZlibDecoder::new(Cursor::new(bytes));

    deflater.read_to_end(&mut writer).unwrap();

    writer
}

fn decode_writer_pico(bytes: &[u8]) -> Vec<u8> {
    let mut deflater = pico_inflate::DeflateDecoder::new(bytes);

    deflater.decode_zlib().unwrap()
}

fn sample_data() -> Vec<u8> {
    // something between text and noise
    let mut state = 0x2545_F491_u32;
    let words: [&[u8]; 8] = [
        b"deflate ", b"window ", b"huffman ", b"literal ", b"match ", b"block ", b"zlib ",
        b"adler "
    ];
    let mut out = Vec::with_capacity(1 << 22);

    while out.len() < (1 << 22) {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        out.extend_from_slice(words[(state % 8) as usize]);

        if state % 5 == 0 {
            out.push(state as u8);
        }
    }
    out
}

fn decode_test(c: &mut Criterion) {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&sample_data()).unwrap();
    let data = encoder.finish().unwrap();

    let mut group = c.benchmark_group("ZLIB decoding");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("FLATE-[miniz-oxide]", |b| {
        b.iter(|| black_box(decode_writer_flate(data.as_slice())))
    });

    group.bench_function("PICO", |b| {
        b.iter(|| black_box(decode_writer_pico(data.as_slice())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(20))
      };
    targets=decode_test);

criterion_main!(benches);
