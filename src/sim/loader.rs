//! Initializer Loader and Result Writers.
//!
//! The three initializers are whitespace-separated hexadecimal byte tokens
//! committed strictly in address order: register values from r0 upward,
//! and instruction/data store contents from address 0 upward.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use tracing::{info, warn};

use crate::common::reg::NUM_REGS;
use crate::common::{RegisterFile, SimError};
use crate::config::Config;
use crate::soc::memory::{DataCache, InstructionCache};
use crate::soc::System;
use crate::stats::SimStats;

/// Parses hexadecimal byte tokens.
///
/// Tokens may carry a `0x` or `0X` prefix.
///
/// # Errors
///
/// Returns [`SimError::MalformedToken`] for a token that is not hex or does
/// not fit in a byte.
pub fn parse_hex_bytes(text: &str, source_name: &str) -> Result<Vec<u8>, SimError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let malformed = || SimError::MalformedToken {
                source_name: source_name.to_string(),
                index,
                token: token.to_string(),
            };
            // from_str_radix alone would accept a leading '+'
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(malformed());
            }
            u8::from_str_radix(digits, 16).map_err(|_| malformed())
        })
        .collect()
}

/// Reads a file of hexadecimal byte tokens.
pub fn load_hex_file(path: &str) -> Result<Vec<u8>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_hex_bytes(&text, path)
}

/// Builds a register file from initializer bytes.
///
/// A nonzero value for r0 is dropped with a warning.
pub fn register_file_from_bytes(bytes: &[u8], source_name: &str) -> Result<RegisterFile, SimError> {
    if bytes.len() > NUM_REGS {
        return Err(SimError::InitializerOverflow {
            source_name: source_name.to_string(),
            capacity: NUM_REGS,
        });
    }
    if let Some(&r0) = bytes.first() {
        if r0 != 0 {
            warn!("{}: ignoring initial value {:#04x} for r0", source_name, r0);
        }
    }
    let mut values = [0u8; NUM_REGS];
    values[..bytes.len()].copy_from_slice(bytes);
    Ok(RegisterFile::with_values(values))
}

/// Loads the register, instruction, and data initializers named in `config`.
pub fn load_machine(config: &Config) -> Result<(System, RegisterFile), SimError> {
    let files = &config.files;

    let reg_bytes = load_hex_file(&files.register_file)?;
    let regs = register_file_from_bytes(&reg_bytes, &files.register_file)?;

    let program = load_hex_file(&files.instruction_cache)?;
    let icache = InstructionCache::from_bytes(&program, &files.instruction_cache)?;

    let data = load_hex_file(&files.data_cache)?;
    let dcache = DataCache::from_bytes(&data, &files.data_cache)?;

    info!(
        "[Loader] {} register bytes, {} program bytes, {} data bytes",
        reg_bytes.len(),
        program.len(),
        data.len()
    );
    Ok((System::new(icache, dcache), regs))
}

fn create(path: &str) -> Result<BufWriter<File>, SimError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        })
}

fn io_err(path: &str) -> impl FnOnce(std::io::Error) -> SimError + '_ {
    move |source| SimError::Io {
        path: path.to_string(),
        source,
    }
}

/// Writes the data store dump, one hex byte per line.
pub fn write_data_cache(dcache: &DataCache, path: &str) -> Result<(), SimError> {
    let mut out = create(path)?;
    dcache.dump(&mut out).map_err(io_err(path))?;
    out.flush().map_err(io_err(path))
}

/// Writes the fixed-format statistics report.
pub fn write_stats(stats: &SimStats, path: &str) -> Result<(), SimError> {
    let mut out = create(path)?;
    stats.write_report(&mut out).map_err(io_err(path))?;
    out.flush().map_err(io_err(path))
}

/// Writes the statistics as JSON.
pub fn write_stats_json(stats: &SimStats, path: &str) -> Result<(), SimError> {
    let json = stats
        .to_json()
        .map_err(|e| io_err(path)(std::io::Error::other(e)))?;
    fs::write(path, json).map_err(io_err(path))
}

/// Writes every output named in `config`.
pub fn write_outputs(config: &Config, dcache: &DataCache, stats: &SimStats) -> Result<(), SimError> {
    write_data_cache(dcache, &config.files.data_cache_out)?;
    write_stats(stats, &config.files.stats_out)?;
    if let Some(path) = &config.files.stats_json {
        write_stats_json(stats, path)?;
    }
    Ok(())
}
