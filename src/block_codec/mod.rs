//! The block_codec module frames the output of a Burrows-Wheeler Transform as a self-describing block.
//!
//! A block is a header followed by the BWT data:
//!
//! | size class (bits 7-6 of byte 0) | header bytes | max primary index |
//! |---|---|---|
//! | 00 | 1 | 2^6 - 1 |
//! | 01 | 2 | 2^14 - 1 |
//! | 10 | 3 | 2^22 - 1 |
//! | 11 | 4 | 2^30 - 1 |
//!
//! Bits 5-0 of byte 0 hold the most significant bits of the primary index. Any remaining bits follow
//! in big-endian order, 8 per byte. The length of the BWT data is not stored; the caller knows it.
//!
//! The codec does not sort anything itself. It drives a [`BwtTransform`], which owns the primary index
//! between the transform and the header step of each call.
//!
pub mod bwt_block_codec;
pub mod error;
pub mod header;

pub use bwt_block_codec::BwtBlockCodec;
pub use error::BlockError;

/// The narrow view of a Burrows-Wheeler Transform used by the block codec.
pub trait BwtTransform {
    /// Transform `input` into `output` (same length). Returns false if the transform could not be done,
    /// in which case `output` must be left untouched.
    fn forward(&mut self, input: &[u8], output: &mut [u8]) -> bool;

    /// Restore the original data from `input` into the front of `output` using the current
    /// primary index. Returns the number of bytes written, or None on failure.
    fn inverse(&mut self, input: &[u8], output: &mut [u8]) -> Option<usize>;

    /// Primary index computed by the last call to forward.
    fn primary_index(&self) -> u32;

    /// Primary index used by the next call to inverse.
    fn set_primary_index(&mut self, primary_index: u32);
}
