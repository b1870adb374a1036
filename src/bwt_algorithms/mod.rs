//! The bwt_algorithms module holds the Burrows-Wheeler Transform used by the block codec.
//!
//! The BWT sorts every rotation of a block and keeps the last byte of each sorted rotation. This alters
//! the data in such a way that runs of similar bytes are more likely to occur. The position of the
//! unrotated block in the sorted list (the primary index) is all that is needed to undo the transform.
//!
//! Sorting the rotations is the expensive part. Comparing rotations byte by byte goes quadratic as soon
//! as a block holds a long run or repeat, so rotations are ranked by prefix doubling instead: each pass
//! doubles the length of the prefix already sorted, and no pass looks at more than two ranks.
//!
pub mod bwt;
pub mod bwt_sort;
