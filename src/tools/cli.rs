use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

use super::symbols::SymbolWidth;
use crate::error::Result;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map the -v level to a verbosity. Anything above 5 is trace.
    fn from_level(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman code tables over 4, 8 or 16 bit symbols",
    long_about = "
    Counts the symbols of each input file, builds a Huffman code for them and packs the file
    with it. Reports the packed size, the estimated size of the code table header and the
    entropy of the input, then checks that the packed bits decode back to the original."
)]
pub struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Symbol width in bits: 4, 8 or 16
    #[clap(short = 'w', long = "width", default_value_t = 8)]
    width: u8,

    /// Print the count of every symbol that occurs
    #[clap(short = 'H', long = "histogram")]
    histogram: bool,

    /// Print the code assigned to every symbol
    #[clap(short = 'c', long = "codes")]
    codes: bool,

    /// Skip decoding the packed data to check it
    #[clap(long = "no-verify")]
    no_verify: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Options for one run, checked and ready to use.
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Symbol width used for every file
    pub width: SymbolWidth,
    /// Print the histogram
    pub show_histogram: bool,
    /// Print the code table
    pub show_codes: bool,
    /// Decode the packed data and compare it to the input
    pub verify: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    /// Check the parsed arguments. The width must be 4, 8 or 16.
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Self {
            width: SymbolWidth::try_from(args.width)?,
            files: args.files,
            show_histogram: args.histogram,
            show_codes: args.codes,
            verify: !args.no_verify,
            verbose: Verbosity::from_level(args.v),
        })
    }
}

/// Parse the command line, set the log level and report what we are about to do.
pub fn huffopts_init() -> Result<HuffOpts> {
    let opts = HuffOpts::from_args(Args::parse())?;

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    info!("---- huffpack initialization start ----");
    info!("Verbosity set to {}", opts.verbose);
    info!("Symbol width set to {} bits", opts.width);
    info!("Processing {} file(s)", opts.files.len());
    if !opts.verify {
        info!("Skipping the decode check")
    };
    info!("---- huffpack initialization end ----");
    Ok(opts)
}
