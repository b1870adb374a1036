use std::{fmt::Display, fmt::Formatter, io};

/// Reasons a block could not be encoded or decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// The BWT transform reported a failure. No further detail is available.
    Transform,
    /// The header claims more bytes than the block holds.
    MalformedHeader { declared: usize, available: usize },
    /// A buffer range supplied by the caller does not fit in its buffer.
    OutOfBounds,
    /// The primary index does not fit in the 30 bits a header can carry.
    PrimaryIndexTooLarge(u32),
}

impl Display for BlockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockError::Transform => write!(f, "BWT transform failed"),
            BlockError::MalformedHeader {
                declared,
                available,
            } => write!(
                f,
                "malformed block header: {} header bytes declared, {} available",
                declared, available
            ),
            BlockError::OutOfBounds => write!(f, "buffer range out of bounds"),
            BlockError::PrimaryIndexTooLarge(idx) => {
                write!(f, "primary index {} does not fit in a block header", idx)
            }
        }
    }
}

impl std::error::Error for BlockError {}

impl From<BlockError> for io::Error {
    fn from(e: BlockError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
