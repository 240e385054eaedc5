//! # mzbinary
//!
//! A command-line tool for the binary data arrays of mzML files.
//!
//! ## Usage
//!
//! ```bash
//! # Decode a zlib-compressed 64-bit m/z array
//! mzbinary decode --compression zlib --bit-width f64 --length 512 mz.b64
//!
//! # Encode numbers (one per line or whitespace separated) with numpress linear
//! mzbinary encode --compression linear values.txt
//!
//! # Aird combo compression of a scan
//! mzbinary combo mz.txt intensity.txt
//!
//! # Show how a set of cvParams is interpreted
//! mzbinary inspect MS:1000523 MS:1000574 MS:1000514
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
