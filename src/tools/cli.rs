use crate::bwt_algorithms::bwt::MAX_BLOCK_SIZE;
use clap::Parser;
use log::{error, info, LevelFilter};
use std::{
    fmt::Display,
    fmt::Formatter,
    io::{self, Error},
};

/// Encode, Decode, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug)]
pub struct BlockOpts {
    /// Name of file to read for input
    pub file: String,
    /// Name of file to write, derived from the input when not given
    pub output: String,
    /// Block size in bytes used by the test mode
    pub block_size: usize,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Encode/Decode/Test
    pub op_mode: Mode,
    /// Log level
    pub verbosity: LevelFilter,
}

/// Extension added to encoded files
pub const EXTENSION: &str = ".bwt";

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Encode files as self-describing BWT blocks",
    long_about = "
    Each file is transformed as one Burrows-Wheeler block. The block starts with a 1 to 4 byte
    header that carries the BWT primary index, followed by the transformed data.

    The test mode cuts a file into blocks, encodes and decodes each one, and reports header sizes."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Encode the input file (default)
    #[clap(short = 'z', long = "encode")]
    encode: bool,

    /// Decode the input file
    #[clap(short = 'd', long = "decode")]
    decode: bool,

    /// Round trip the input file block by block without writing anything
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Output file name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Block size in KiB for the test mode
    #[clap(short = 'b', long = "block-size", default_value_t = 900)]
    block_size: usize,

    /// Sets verbosity. -v1 shows very little, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Parse the command line and set the log level.
pub fn block_opts_init() -> io::Result<BlockOpts> {
    let opts = block_opts_from(Args::parse())?;
    log::set_max_level(opts.verbosity);
    report(&opts);
    Ok(opts)
}

/// Put command line information from CLAP into our internal structure.
pub fn block_opts_from(args: Args) -> io::Result<BlockOpts> {
    let block_size = block_size_bytes(args.block_size)?;

    let op_mode = if args.test {
        Mode::Test
    } else if args.decode {
        Mode::Decode
    } else {
        Mode::Encode
    };

    let output = match args.output {
        Some(name) => name,
        None => match op_mode {
            Mode::Decode => match args.filename.strip_suffix(EXTENSION) {
                Some(stem) => stem.to_string(),
                None => format!("{}.out", args.filename),
            },
            _ => format!("{}{}", args.filename, EXTENSION),
        },
    };

    let verbosity = match args.v {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Ok(BlockOpts {
        file: args.filename,
        output,
        block_size,
        force_overwrite: args.force,
        keep_input_files: args.keep,
        op_mode,
        verbosity,
    })
}

/// Convert the block size from KiB to bytes, rejecting sizes the transform can't take.
fn block_size_bytes(kib: usize) -> io::Result<usize> {
    match kib.checked_mul(1024) {
        Some(bytes) if bytes > 0 && bytes <= MAX_BLOCK_SIZE => Ok(bytes),
        _ => {
            error!(
                "Block size of {} KiB is outside 1..={} KiB.",
                kib,
                MAX_BLOCK_SIZE / 1024
            );
            Err(Error::new(
                io::ErrorKind::InvalidInput,
                "Invalid block size",
            ))
        }
    }
}

/// Below we report initialization status to the user
fn report(opts: &BlockOpts) {
    info!("---- Initialization Start ----");
    info!("Verbosity set to {}", opts.verbosity);
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    if opts.op_mode == Mode::Test {
        info!("Block size set to {}", opts.block_size);
    } else {
        info!("Sending output to the file {}", opts.output);
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Initialization End ----\n");
}
