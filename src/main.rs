//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::{fs, process};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use huffpack::compression::{compress::compress, decompress::decompress};
use huffpack::error::{HuffError, Result};
use huffpack::huffman_coding::header::estimate_header;
use huffpack::huffman_coding::huffman::build_code_table;
use huffpack::tools::cli::{huffopts_init, HuffOpts};
use huffpack::tools::freq_count::freqs;
use huffpack::tools::report::{entropy, histogram_report};

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli narrows this down.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let opts = match huffopts_init() {
        Ok(opts) => opts,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    // The failure has already been logged with its file name
    if run(&opts).is_err() {
        process::exit(1);
    }
    info!("Done.");
}

/// Process every file in turn, stopping at the first failure.
fn run(opts: &HuffOpts) -> Result<()> {
    for file in &opts.files {
        if let Err(e) = process_file(file, opts) {
            error!("{}: {}", file, e);
            return Err(e);
        }
    }
    Ok(())
}

/// Count, build, pack and report one file. Optionally decode it again and compare.
fn process_file(file: &str, opts: &HuffOpts) -> Result<()> {
    let data = fs::read(file)?;
    info!("Read {} bytes from {}", data.len(), file);

    let freqs = freqs(&data, opts.width)?;
    if opts.show_histogram {
        print!("{}", histogram_report(&freqs));
    }

    let table = build_code_table(&freqs, opts.width)?;
    if opts.show_codes {
        for (sym, code) in table.codes() {
            println!("{:6} [{:3}] {}", sym, code.len(), code);
        }
    }

    let packed = compress(&data, &table)?;
    let header = estimate_header(&table);
    let symbols = opts.width.symbol_count(data.len());
    let total = (packed.len() + 7) / 8 + header.bytes;

    println!(
        "{}: {} bytes, {} symbols of {} bits, entropy {:.4} bits/symbol",
        file,
        data.len(),
        symbols,
        opts.width,
        entropy(&freqs)
    );
    println!(
        "  packed {} bits ({} bytes, {} padding bits) + {} byte {} header = {} bytes ({:.2}%)",
        packed.len(),
        packed.as_bytes().len(),
        (8 - packed.last_bits()) % 8,
        header.bytes,
        header.layout,
        total,
        if data.is_empty() {
            0.0
        } else {
            100.0 * total as f64 / data.len() as f64
        }
    );

    if opts.verify {
        let back = decompress(packed.as_bytes(), packed.len(), &table, data.len())?;
        if let Some(at) = back.iter().zip(&data).position(|(a, b)| a != b) {
            return Err(HuffError::Mismatch { at });
        }
        if back.len() != data.len() {
            return Err(HuffError::Mismatch {
                at: back.len().min(data.len()),
            });
        }
        info!("{} decodes back to the original", file);
    }
    Ok(())
}
