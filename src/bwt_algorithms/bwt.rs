use super::bwt_sort::{bwt_decode, bwt_encode};
use crate::block_codec::BwtTransform;
use log::{trace, warn};

/// Largest block the transform accepts. Keeps every primary index inside a 4 byte block header.
pub const MAX_BLOCK_SIZE: usize = 1 << 30;

/// Burrows-Wheeler Transform holding the primary index of the last forward call
/// (or the one to use for the next inverse call).
#[derive(Debug, Default)]
pub struct Bwt {
    primary_index: u32,
}

impl Bwt {
    pub fn new() -> Self {
        Self { primary_index: 0 }
    }
}

impl BwtTransform for Bwt {
    fn forward(&mut self, input: &[u8], output: &mut [u8]) -> bool {
        if output.len() != input.len() || input.len() > MAX_BLOCK_SIZE {
            warn!(
                "Can't transform {} bytes into {} bytes.",
                input.len(),
                output.len()
            );
            return false;
        }

        // Nothing to sort
        if input.len() < 2 {
            output.copy_from_slice(input);
            self.primary_index = 0;
            return true;
        }

        self.primary_index = bwt_encode(input, output);
        trace!("\rPrimary index is {}.", self.primary_index);
        true
    }

    fn inverse(&mut self, input: &[u8], output: &mut [u8]) -> Option<usize> {
        let count = input.len();
        if output.len() < count || count > MAX_BLOCK_SIZE {
            warn!("Can't restore {} bytes into {} bytes.", count, output.len());
            return None;
        }

        if count < 2 {
            output[..count].copy_from_slice(input);
            return Some(count);
        }

        if self.primary_index as usize >= count {
            warn!(
                "Primary index {} is outside a block of {} bytes.",
                self.primary_index, count
            );
            return None;
        }

        bwt_decode(self.primary_index, input, output);
        Some(count)
    }

    fn primary_index(&self) -> u32 {
        self.primary_index
    }

    fn set_primary_index(&mut self, primary_index: u32) {
        self.primary_index = primary_index;
    }
}
