use super::error::BlockError;

/// Largest primary index a header can carry (6 + 3*8 bits).
pub const MAX_PRIMARY_INDEX: u32 = (1 << 30) - 1;
/// Largest header, in bytes.
pub const MAX_HEADER_LEN: usize = 4;

/// A decoded block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// BWT primary index
    pub primary_index: u32,
    /// Number of header bytes in front of the BWT data
    pub len: usize,
}

/// Returns the smallest size class (count of extra header bytes) that holds the primary index.
pub fn size_class(primary_index: u32) -> Option<u8> {
    if primary_index > MAX_PRIMARY_INDEX {
        return None;
    }
    // Minimum bit width of the index field, never less than the 6 bits in byte 0
    let mut bits = 6;
    while (1_u32 << bits) <= primary_index {
        bits += 1;
    }
    // The two size class bits share byte 0 with the index
    Some(((bits + 2 + 7) / 8 - 1) as u8)
}

/// Returns the total header length (1-4 bytes) needed for the primary index.
pub fn header_len(primary_index: u32) -> Option<usize> {
    size_class(primary_index).map(|class| class as usize + 1)
}

/// Writes the header for primary_index at the front of out and returns its length.
/// The caller must make sure the index fits (see header_len) and that out is long enough.
pub fn write_header(primary_index: u32, out: &mut [u8]) -> usize {
    let class = size_class(primary_index).unwrap_or(3);
    let len = class as usize + 1;
    let mut shift = (len - 1) * 8;

    out[0] = (class << 6) | ((primary_index >> shift) & 0x3f) as u8;
    for byte in out.iter_mut().take(len).skip(1) {
        shift -= 8;
        *byte = (primary_index >> shift) as u8;
    }
    len
}

/// Reads a header from the front of buf. Only the header bytes themselves are inspected.
pub fn read_header(buf: &[u8]) -> Result<Header, BlockError> {
    let mode = match buf.first() {
        Some(&b) => b,
        None => {
            return Err(BlockError::MalformedHeader {
                declared: 1,
                available: 0,
            })
        }
    };
    let len = 1 + ((mode >> 6) & 0x03) as usize;
    if buf.len() < len {
        return Err(BlockError::MalformedHeader {
            declared: len,
            available: buf.len(),
        });
    }

    let mut shift = (len - 1) * 8;
    let mut primary_index = ((mode & 0x3f) as u32) << shift;
    for &byte in &buf[1..len] {
        shift -= 8;
        primary_index |= (byte as u32) << shift;
    }
    Ok(Header { primary_index, len })
}
