/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u32 = 0;
pub const DEFLATE_BLOCKTYPE_STATIC: u32 = 1;
pub const DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN: u32 = 2;

/// Number of symbols in each Huffman code.  Note: for the literal/length
/// and offset codes, these are actually the maximum values; a given block
/// might use fewer symbols.
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;
pub const DEFLATE_NUM_OFFSET_SYMS: usize = 32;

/// Literal/length symbol that terminates a block
pub const DEFLATE_END_OF_BLOCK: u16 = 256;
/// First literal/length symbol that starts a match
pub const DEFLATE_FIRST_LEN_SYM: u16 = 257;

/// Maximum codeword length across all codes.
pub const DEFLATE_MAX_CODEWORD_LENGTH: usize = 15;

/// Order which precode lengths are stored
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15
];

/// Worst case node count when all three trees live in the arena at once.
///
/// A complete code over `n` symbols needs `2n - 1` nodes.
pub const MAX_HUFF_NODES: usize = (2 * DEFLATE_NUM_OFFSET_SYMS - 1)
    + (2 * DEFLATE_NUM_LITLEN_SYMS - 1)
    + (2 * DEFLATE_NUM_PRECODE_SYMS - 1);

/// Smallest and largest window exponents, 256 bytes to 32 KiB
pub const MIN_WINDOW_BITS: u8 = 8;
pub const MAX_WINDOW_BITS: u8 = 15;

/// Zlib compression method for deflate
#[cfg(feature = "zlib")]
pub const ZLIB_CM_DEFLATE: u8 = 8;

/// `(extra bits, base)` for length symbols 257..=285
pub static LENGTH_EXTRA_BITS: [(u8, u16); 29] = [
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
    (0, 8),
    (0, 9),
    (0, 10),
    (1, 11),
    (1, 13),
    (1, 15),
    (1, 17),
    (2, 19),
    (2, 23),
    (2, 27),
    (2, 31),
    (3, 35),
    (3, 43),
    (3, 51),
    (3, 59),
    (4, 67),
    (4, 83),
    (4, 99),
    (4, 115),
    (5, 131),
    (5, 163),
    (5, 195),
    (5, 227),
    (0, 258)
];

/// `(extra bits, base)` for distance symbols 0..=29
pub static DISTANCE_EXTRA_BITS: [(u8, u16); 30] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 5),
    (1, 7),
    (2, 9),
    (2, 13),
    (3, 17),
    (3, 25),
    (4, 33),
    (4, 49),
    (5, 65),
    (5, 97),
    (6, 129),
    (6, 193),
    (7, 257),
    (7, 385),
    (8, 513),
    (8, 769),
    (9, 1025),
    (9, 1537),
    (10, 2049),
    (10, 3073),
    (11, 4097),
    (11, 6145),
    (12, 8193),
    (12, 12289),
    (13, 16385),
    (13, 24577)
];

/// Codeword lengths of the static literal/length code
pub const fn fixed_litlen_lens() -> [u8; DEFLATE_NUM_LITLEN_SYMS] {
    let mut lens = [0; DEFLATE_NUM_LITLEN_SYMS];
    let mut i = 0;

    while i < DEFLATE_NUM_LITLEN_SYMS {
        lens[i] = match i {
            0..=143 => 8,
            144..=255 => 9,
            256..=279 => 7,
            _ => 8
        };
        i += 1;
    }
    lens
}

pub static FIXED_LITLEN_LENS: [u8; DEFLATE_NUM_LITLEN_SYMS] = fixed_litlen_lens();

/// The static distance code gives every symbol five bits
pub static FIXED_OFFSET_LENS: [u8; DEFLATE_NUM_OFFSET_SYMS] = [5; DEFLATE_NUM_OFFSET_SYMS];
