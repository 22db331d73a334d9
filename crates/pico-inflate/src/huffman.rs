/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canonical Huffman codes and their decode trees
//!
//! Trees live in a single fixed size arena and refer to each other by
//! index, so building a tree never touches the heap. The arena is sized
//! for the worst case of one precode, one literal/length and one offset
//! tree being alive at the same time, and is reset whenever a block
//! brings new tables.
use pico_core::bytestream::ByteSource;

use crate::bitstream::BitStreamReader;
use crate::constants::{DEFLATE_MAX_CODEWORD_LENGTH, DEFLATE_NUM_LITLEN_SYMS, MAX_HUFF_NODES};
use crate::errors::DecodeErrorStatus;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum HuffNode {
    /// Allocated but no codeword leads here (yet)
    Vacant,
    Leaf(u16),
    /// Children for a `0` and a `1` bit
    Branch(u16, u16)
}

/// Handle to a tree built inside a [`HuffmanArena`]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HuffmanTree {
    root: u16
}

pub struct HuffmanArena {
    nodes:     [HuffNode; MAX_HUFF_NODES],
    next_free: usize
}

impl HuffmanArena {
    pub const fn new() -> HuffmanArena {
        HuffmanArena {
            nodes:     [HuffNode::Vacant; MAX_HUFF_NODES],
            next_free: 0
        }
    }

    /// Forget every tree, handles from before the reset are invalid
    pub fn reset(&mut self) {
        self.next_free = 0;
    }

    /// Number of nodes handed out since the last reset
    #[cfg_attr(not(feature = "log"), allow(dead_code))]
    pub const fn nodes_used(&self) -> usize {
        self.next_free
    }

    fn alloc_node(&mut self) -> Result<u16, DecodeErrorStatus> {
        if self.next_free >= MAX_HUFF_NODES {
            return Err(DecodeErrorStatus::CorruptData("Huffman tree exceeds node arena"));
        }
        let index = self.next_free;

        self.nodes[index] = HuffNode::Vacant;
        self.next_free += 1;

        Ok(index as u16)
    }

    /// Build a decode tree from per symbol codeword lengths, `0` marking
    /// an unused symbol.
    ///
    /// Every codeword is walked from its most significant bit, splitting
    /// vacant nodes into two fresh children on the way, and its symbol is
    /// stored at the node where the walk ends.
    pub fn build_tree(&mut self, lens: &[u8]) -> Result<HuffmanTree, DecodeErrorStatus> {
        let mut codes = [0_u16; DEFLATE_NUM_LITLEN_SYMS];
        let codes = &mut codes[..lens.len()];

        assign_canonical_codes(lens, codes)?;

        let root = self.alloc_node()?;

        for (symbol, (len, code)) in lens.iter().zip(codes.iter()).enumerate() {
            if *len == 0 {
                continue;
            }
            let mut node = root;

            for bit in (0..*len).rev() {
                let digit = (code >> bit) & 1;

                let (zero, one) = match self.nodes[usize::from(node)] {
                    HuffNode::Branch(zero, one) => (zero, one),
                    HuffNode::Vacant => {
                        let zero = self.alloc_node()?;
                        let one = self.alloc_node()?;

                        self.nodes[usize::from(node)] = HuffNode::Branch(zero, one);
                        (zero, one)
                    }
                    HuffNode::Leaf(_) => {
                        return Err(DecodeErrorStatus::CorruptData(
                            "Huffman codeword is a prefix of another"
                        ))
                    }
                };
                node = if digit == 0 { zero } else { one };
            }
            if self.nodes[usize::from(node)] != HuffNode::Vacant {
                return Err(DecodeErrorStatus::CorruptData(
                    "Huffman codeword is a prefix of another"
                ));
            }
            self.nodes[usize::from(node)] = HuffNode::Leaf(symbol as u16);
        }
        Ok(HuffmanTree { root })
    }

    /// Decode one symbol, reading a bit per level until a leaf is reached.
    #[inline]
    pub fn decode_symbol<S: ByteSource>(
        &self, tree: HuffmanTree, stream: &mut BitStreamReader<S>
    ) -> Result<u16, DecodeErrorStatus> {
        let mut node = tree.root;

        loop {
            match self.nodes[usize::from(node)] {
                HuffNode::Leaf(symbol) => return Ok(symbol),
                HuffNode::Branch(zero, one) => {
                    node = if stream.get_bit()? == 0 { zero } else { one };
                }
                HuffNode::Vacant => {
                    return Err(DecodeErrorStatus::CorruptData("Invalid Huffman code"));
                }
            }
        }
    }
}

impl Default for HuffmanArena {
    fn default() -> Self {
        HuffmanArena::new()
    }
}

/// Compute the canonical codeword of every symbol from its length
/// (RFC 1951 section 3.2.2).
///
/// Codes of one length are consecutive and handed out in symbol order,
/// shorter codes are numerically smaller.
///
/// # Errors
/// Lengths that overflow the code space, and lengths that leave part of
/// it unused, except for an empty code or a single one bit codeword.
pub fn assign_canonical_codes(lens: &[u8], codes: &mut [u16]) -> Result<(), DecodeErrorStatus> {
    debug_assert_eq!(lens.len(), codes.len());

    let mut bl_count = [0_u32; DEFLATE_MAX_CODEWORD_LENGTH + 1];

    for len in lens {
        if usize::from(*len) > DEFLATE_MAX_CODEWORD_LENGTH {
            return Err(DecodeErrorStatus::CorruptData("Codeword length above 15"));
        }
        bl_count[usize::from(*len)] += 1;
    }
    bl_count[0] = 0;

    // A codeword of length n takes 2^(15-n) of the 2^15 code space.
    let codespace_used: u32 = (1..=DEFLATE_MAX_CODEWORD_LENGTH)
        .map(|len| bl_count[len] << (DEFLATE_MAX_CODEWORD_LENGTH - len))
        .sum();
    let codespace = 1_u32 << DEFLATE_MAX_CODEWORD_LENGTH;

    if codespace_used > codespace {
        return Err(DecodeErrorStatus::CorruptData("Overflown code"));
    }
    if codespace_used < codespace {
        let used_codes: u32 = bl_count.iter().sum();

        let empty = used_codes == 0;
        let single_bit = used_codes == 1 && bl_count[1] == 1;

        if !(empty || single_bit) {
            return Err(DecodeErrorStatus::CorruptData("Incomplete code"));
        }
    }

    let mut next_code = [0_u32; DEFLATE_MAX_CODEWORD_LENGTH + 1];
    let mut code = 0;

    for bits in 1..=DEFLATE_MAX_CODEWORD_LENGTH {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
    }

    for (len, code) in lens.iter().zip(codes.iter_mut()) {
        if *len != 0 {
            *code = next_code[usize::from(*len)] as u16;
            next_code[usize::from(*len)] += 1;
        }
    }
    Ok(())
}
