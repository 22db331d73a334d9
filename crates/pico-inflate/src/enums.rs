/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Where the block decoder is within a deflate stream
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeflateState {
    /// Expecting `BFINAL` and `BTYPE`
    BlockHeader,
    /// Uncompressed block, `LEN` raw bytes follow
    Stored,
    /// Block coded with the static tables
    FixedTables,
    /// Block carrying its own tables
    DynamicTables,
    /// Tables ready, decoding literals and matches
    BlockBody,
    /// The final block has ended
    Done
}
