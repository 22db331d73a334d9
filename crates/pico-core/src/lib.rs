/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the pico crates
//!
//! It currently contains
//!
//! - Byte channels, a source to pull compressed bytes from and a sink to push
//!   decoded bytes into, with in-memory, chunked and (with `std`) reader backed
//!   implementations
//! - A logging shim that compiles to nothing when logging isn't wanted
//!
//! This library is `#[no_std]` with `alloc` needed for the `Vec` sink.
//!
//! # Features
//!  - `std`: Enables `std::io` backed sources and `std::error::Error` impls.
//!
//!  - `log`: Routes the logging macros in [`log`] to the `log` crate,
//!     without it they expand to nothing.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
