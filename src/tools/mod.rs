//! The tools module provides helper functions for the block codec and its command line tool.
//!
//! The tools are:
//! - cli: Command line interface.
//! - freq_count: Byte frequency count.
//!
pub mod cli;
pub mod freq_count;
