//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::{self, OpenOptions},
    io::{self, Error, Write},
    path::Path,
};

use bwtblock::block_codec::BwtBlockCodec;
use bwtblock::bwt_algorithms::bwt::MAX_BLOCK_SIZE;
use bwtblock::tools::cli::{block_opts_init, BlockOpts, Mode};

use log::{error, info, warn, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    // (the command line lowers the max level afterwards)
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger already initialized.");
    }

    let options = block_opts_init()?;

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Encode => encode_file(&options),
        Mode::Decode => decode_file(&options),
        Mode::Test => test_file(&options),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}

/// Encode the whole input file as a single block.
fn encode_file(opts: &BlockOpts) -> io::Result<()> {
    let data = fs::read(&opts.file)?;
    if data.len() > MAX_BLOCK_SIZE {
        return Err(Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} is {} bytes, the largest block is {} bytes.",
                opts.file,
                data.len(),
                MAX_BLOCK_SIZE
            ),
        ));
    }

    let mut codec = BwtBlockCodec::new();
    let block = codec.encode_block(&data)?;
    info!(
        "Encoded {} bytes into {} bytes ({} byte header).",
        data.len(),
        block.len(),
        block.len() - data.len()
    );
    write_output(opts, &block)
}

/// Decode a single block file.
fn decode_file(opts: &BlockOpts) -> io::Result<()> {
    let block = fs::read(&opts.file)?;
    let mut codec = BwtBlockCodec::new();
    let data = codec.decode_block(&block)?;
    info!("Decoded {} bytes into {} bytes.", block.len(), data.len());
    write_output(opts, &data)
}

/// Cut the input into blocks, round trip each one, and report. Nothing is written.
fn test_file(opts: &BlockOpts) -> io::Result<()> {
    let data = fs::read(&opts.file)?;
    let mut codec = BwtBlockCodec::new();
    // block_size is bounded by MAX_BLOCK_SIZE in the options
    let buf_size = opts.block_size.min(data.len());
    let mut encoded = vec![0_u8; codec.max_encoded_length(buf_size)];
    let mut decoded = vec![0_u8; buf_size];
    let mut headers = [0_usize; 4];

    for (seq, chunk) in data.chunks(opts.block_size).enumerate() {
        let written = codec.encode(chunk, 0, chunk.len(), &mut encoded, 0)?;
        let header = written - chunk.len();
        headers[header - 1] += 1;

        let produced = codec.decode(&encoded, 0, written, &mut decoded, 0)?;
        if decoded[..produced] != *chunk {
            error!("Block {} did not survive the round trip.", seq + 1);
            return Err(Error::new(io::ErrorKind::Other, "Round trip failed"));
        }
        info!(
            "Block {}: {} bytes, {} byte header.",
            seq + 1,
            chunk.len(),
            header
        );
    }

    println!(
        "{}: ok. Header sizes 1/2/3/4 bytes: {}/{}/{}/{}",
        opts.file, headers[0], headers[1], headers[2], headers[3]
    );
    Ok(())
}

/// Write out the result, respecting force and keep.
fn write_output(opts: &BlockOpts, bytes: &[u8]) -> io::Result<()> {
    if Path::new(&opts.output).exists() && !opts.force_overwrite {
        warn!("{} already exists. Use -f to overwrite it.", opts.output);
        return Err(Error::new(
            io::ErrorKind::AlreadyExists,
            "Output file exists",
        ));
    }

    let mut f_out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&opts.output)?;
    f_out.write_all(bytes)?;
    info!("Wrote {} bytes to {}.", bytes.len(), opts.output);

    if !opts.keep_input_files {
        fs::remove_file(&opts.file)?;
        info!("Removed {}.", opts.file);
    }
    Ok(())
}
