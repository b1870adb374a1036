//! Block header codec for Burrows-Wheeler-Transformed data.
//!
//! Version 0.1.0
//!
//! A BWT block is stored as a small header carrying the BWT primary index, followed by the
//! transformed bytes. The header is 1 to 4 bytes long and describes its own length in the top
//! two bits of its first byte, so a decoder can find the payload without any other framing.
//!
//! Basic usage:
//!
//! ```
//! use bwtblock::block_codec::BwtBlockCodec;
//!
//! let mut codec = BwtBlockCodec::new();
//! let encoded = codec.encode_block(b"banana").unwrap();
//! assert_eq!(codec.decode_block(&encoded).unwrap(), b"banana");
//! ```
//!
//! The command line tool can encode a file as a single block:
//!
//! `$> bwtblock -z test.txt`
//!
//! This will create the file test.txt.bwt.
//!
pub mod block_codec;
pub mod bwt_algorithms;
pub mod tools;
