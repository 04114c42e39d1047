//! Command line interface for the stinkc binary.

use std::fmt::{Display, Formatter};

use clap::Parser;
use log::info;

/// Compress, decompress, or verify without writing.
#[derive(Debug)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the front-end needs to know about this invocation.
#[derive(Debug)]
pub struct StinkOpts {
    /// Name of the file to read for input.
    pub file: Option<String>,
    /// Compress / Decompress / Test.
    pub op_mode: Mode,
    /// Don't remove the input file after processing.
    pub keep_input_files: bool,
    /// Silently overwrite an existing output file.
    pub force_overwrite: bool,
    /// Send output to stdout instead of a file.
    pub stdout: bool,
}

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "stinkc, a block-sorting file compressor",
    long_about = None)]
struct Args {
    /// File to process
    filename: Option<String>,

    /// Force compression
    #[clap(short = 'z', long = "zip")]
    compress: bool,

    /// Force decompression
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Decompress in memory and report integrity, writing nothing
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep (don't delete) the input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Write output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Verbosity; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse the command line into a [`StinkOpts`], set the log level, and
/// report the chosen configuration to the user.
pub fn opts_init() -> StinkOpts {
    let args = Args::parse();

    let op_mode = if args.test {
        Mode::Test
    } else if args.decompress {
        Mode::Unzip
    } else if args.compress {
        Mode::Zip
    } else {
        // Neither mode forced: infer it from the file extension.
        match &args.filename {
            Some(name) if name.ends_with(".stinkc") => Mode::Unzip,
            _ => Mode::Zip,
        }
    };

    match args.verbose {
        0 => log::set_max_level(log::LevelFilter::Warn),
        1 => log::set_max_level(log::LevelFilter::Info),
        2 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let opts = StinkOpts {
        file: args.filename,
        op_mode,
        keep_input_files: args.keep,
        force_overwrite: args.force,
        stdout: args.stdout,
    };

    info!("operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(name) => info!("reading input from {}", name),
        None => info!("no input file named"),
    }
    if opts.force_overwrite {
        info!("forcing file overwrites");
    }
    if opts.keep_input_files {
        info!("keeping input files");
    }
    opts
}
