use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use mzbinary::config::CodecConfig;
use mzbinary::descriptor::{ArrayKind, BitWidth, CompressionKind, NumpressScheme};

mod combo;
mod decode;
mod encode;
mod inspect;

/// mzbinary - mzML binary data array codec
#[derive(Parser)]
#[command(name = "mzbinary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load codec settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Compression of a binary data array
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    /// No compression
    None,
    /// zlib
    Zlib,
    /// MS-Numpress linear prediction
    Linear,
    /// MS-Numpress positive integer
    Pic,
    /// MS-Numpress short logged float
    Slof,
    /// MS-Numpress linear prediction followed by zlib
    LinearZlib,
    /// MS-Numpress positive integer followed by zlib
    PicZlib,
    /// MS-Numpress short logged float followed by zlib
    SlofZlib,
    /// Aird combo compression
    Combo,
}

impl From<CompressionArg> for CompressionKind {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => CompressionKind::None,
            CompressionArg::Zlib => CompressionKind::Zlib,
            CompressionArg::Linear => CompressionKind::Numpress(NumpressScheme::Linear),
            CompressionArg::Pic => CompressionKind::Numpress(NumpressScheme::Pic),
            CompressionArg::Slof => CompressionKind::Numpress(NumpressScheme::Slof),
            CompressionArg::LinearZlib => CompressionKind::NumpressZlib(NumpressScheme::Linear),
            CompressionArg::PicZlib => CompressionKind::NumpressZlib(NumpressScheme::Pic),
            CompressionArg::SlofZlib => CompressionKind::NumpressZlib(NumpressScheme::Slof),
            CompressionArg::Combo => CompressionKind::AirdCombo,
        }
    }
}

/// Stored value precision
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum BitWidthArg {
    /// 32-bit float
    F32,
    /// 64-bit float
    #[default]
    F64,
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
}

impl From<BitWidthArg> for BitWidth {
    fn from(arg: BitWidthArg) -> Self {
        match arg {
            BitWidthArg::F32 => BitWidth::Float32,
            BitWidthArg::F64 => BitWidth::Float64,
            BitWidthArg::I32 => BitWidth::Int32,
            BitWidthArg::I64 => BitWidth::Int64,
        }
    }
}

/// Quantity held by an array
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ArrayKindArg {
    /// m/z values
    Mz,
    /// Intensities
    Intensity,
    /// Retention times
    Time,
}

impl From<ArrayKindArg> for ArrayKind {
    fn from(arg: ArrayKindArg) -> Self {
        match arg {
            ArrayKindArg::Mz => ArrayKind::Mz,
            ArrayKindArg::Intensity => ArrayKind::Intensity,
            ArrayKindArg::Time => ArrayKind::Time,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a Base64 payload and print its values
    Decode {
        /// File holding the Base64 text (stdin when omitted)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Compression of the payload
        #[arg(short = 'c', long, value_enum)]
        compression: CompressionArg,

        /// Precision of uncompressed and zlib payloads
        #[arg(short = 'b', long, value_enum, default_value = "f64")]
        bit_width: BitWidthArg,

        /// Quantity held by the array (needed for combo payloads)
        #[arg(short = 'k', long, value_enum)]
        array_kind: Option<ArrayKindArg>,

        /// Declared number of values (defaults to as many as the payload holds)
        #[arg(short = 'n', long)]
        length: Option<usize>,

        /// Decode into 32-bit floats
        #[arg(long)]
        single: bool,

        /// Print a JSON array instead of one value per line
        #[arg(long)]
        json: bool,
    },

    /// Encode numbers into a Base64 payload
    Encode {
        /// File holding whitespace separated numbers (stdin when omitted)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Compression to apply
        #[arg(short = 'c', long, value_enum)]
        compression: CompressionArg,

        /// Stored precision for uncompressed and zlib payloads
        #[arg(short = 'b', long, value_enum, default_value = "f64")]
        bit_width: BitWidthArg,
    },

    /// Aird combo compression of a paired scan or chromatogram
    Combo {
        /// m/z (or time) values
        #[arg(value_name = "AXIS")]
        axis: PathBuf,

        /// Intensity values
        #[arg(value_name = "INTENSITY")]
        intensity: PathBuf,

        /// Treat the input as a chromatogram and keep zero intensities
        #[arg(long)]
        chromatogram: bool,
    },

    /// Show how a set of cvParam accessions describes an array
    Inspect {
        /// cvParam accessions, e.g. MS:1000523 MS:1000574
        #[arg(value_name = "ACCESSION", required = true)]
        accessions: Vec<String>,

        /// Length of the Base64 text
        #[arg(long, default_value_t = 0)]
        encoded_length: usize,

        /// Declared number of values
        #[arg(long, default_value_t = 0)]
        array_length: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode {
            input,
            compression,
            bit_width,
            array_kind,
            length,
            single,
            json,
        } => decode::run(
            &config,
            input,
            compression.into(),
            bit_width.into(),
            array_kind.map(ArrayKind::from),
            length,
            single,
            json,
        ),
        Commands::Encode {
            input,
            compression,
            bit_width,
        } => encode::run(&config, input, compression.into(), bit_width.into()),
        Commands::Combo {
            axis,
            intensity,
            chromatogram,
        } => combo::run(&config, &axis, &intensity, chromatogram),
        Commands::Inspect {
            accessions,
            encoded_length,
            array_length,
        } => inspect::run(&accessions, encoded_length, array_length),
    }
}

fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    match path {
        Some(path) => CodecConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(CodecConfig::default()),
    }
}

/// Read a file, or stdin when no path is given
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Parse whitespace or comma separated numbers
fn parse_numbers(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Not a number: {token:?}"))
        })
        .collect()
}
