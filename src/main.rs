//! File front-end for the stinkc compressor.
//!
//! Reads the named file into memory, runs the codec, and writes the result
//! next to the input: `notes.txt` compresses to `notes.stinkc`, and
//! `notes.stinkc` decompresses back to `notes`. The core never touches the
//! filesystem; this binary is the only place files, extensions and overwrite
//! checks exist.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use stinkc::error::Result;
use stinkc::tools::cli::{opts_init, Mode, StinkOpts};
use stinkc::{compress, decompress};

/// Extension carried by compressed files.
const COMPRESSED_EXTENSION: &str = "stinkc";

fn main() -> Result<()> {
    // The logger accepts everything; the CLI layer narrows the level from
    // the -v flags.
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("logger init cannot fail this early");

    let opts = opts_init();
    let result = match opts.op_mode {
        Mode::Zip => pack_file(&opts),
        Mode::Unzip => unpack_file(&opts),
        Mode::Test => test_file(&opts),
    };
    if let Err(err) = &result {
        error!("{}", err);
    }
    result
}

/// Compress the input file into `<stem>.stinkc`.
fn pack_file(opts: &StinkOpts) -> Result<()> {
    let fname = input_name(opts)?;
    let data = fs::read(&fname)?;
    let packed = compress(&data);
    info!(
        "{}: {} bytes in, {} bytes out ({:.1}%)",
        fname,
        data.len(),
        packed.len(),
        100.0 * packed.len() as f64 / data.len().max(1) as f64
    );

    if opts.stdout {
        io::stdout().write_all(&packed)?;
        return Ok(());
    }
    write_output(&compressed_name(&fname), &packed, opts.force_overwrite)?;
    if !opts.keep_input_files {
        fs::remove_file(&fname)?;
    }
    Ok(())
}

/// Decompress the input file, stripping the `.stinkc` extension.
fn unpack_file(opts: &StinkOpts) -> Result<()> {
    let fname = input_name(opts)?;
    let data = fs::read(&fname)?;
    let restored = decompress(&data)?;
    info!("{}: {} bytes restored", fname, restored.len());

    if opts.stdout {
        io::stdout().write_all(&restored)?;
        return Ok(());
    }
    write_output(&decompressed_name(&fname), &restored, opts.force_overwrite)?;
    if !opts.keep_input_files {
        fs::remove_file(&fname)?;
    }
    Ok(())
}

/// Decompress in memory and report integrity; writes nothing.
fn test_file(opts: &StinkOpts) -> Result<()> {
    let fname = input_name(opts)?;
    let data = fs::read(&fname)?;
    let restored = decompress(&data)?;
    info!("{}: ok, {} bytes", fname, restored.len());
    Ok(())
}

fn input_name(opts: &StinkOpts) -> Result<String> {
    opts.file
        .clone()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no input file given").into())
}

fn write_output(name: &str, data: &[u8], force: bool) -> Result<()> {
    if Path::new(name).exists() && !force {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists; use --force to overwrite", name),
        )
        .into());
    }
    fs::write(name, data)?;
    info!("wrote {}", name);
    Ok(())
}

/// Rewrite the input name for compression: replace the extension if there is
/// one, append otherwise.
fn compressed_name(fname: &str) -> String {
    let path = Path::new(fname);
    if path.extension().is_some() {
        path.with_extension(COMPRESSED_EXTENSION)
            .to_string_lossy()
            .into_owned()
    } else {
        format!("{}.{}", fname, COMPRESSED_EXTENSION)
    }
}

/// Rewrite the input name for decompression: strip the `.stinkc` suffix,
/// falling back to an `.out` suffix when stripping is not possible.
fn decompressed_name(fname: &str) -> String {
    match fname.strip_suffix(".stinkc") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", fname),
    }
}
