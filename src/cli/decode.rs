use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mzbinary::config::CodecConfig;
use mzbinary::decoder::PeakDecoder;
use mzbinary::descriptor::{ArrayKind, BinaryDataInfo, BitWidth, CompressionKind};
use mzbinary::value::PeakValue;

/// Decode a Base64 payload and print its values
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &CodecConfig,
    input: Option<PathBuf>,
    compression: CompressionKind,
    bit_width: BitWidth,
    array_kind: Option<ArrayKind>,
    length: Option<usize>,
    single: bool,
    json: bool,
) -> Result<()> {
    let text = super::read_input(input.as_deref())?;
    let text = text.trim();

    let array_length = match (length, compression) {
        (Some(length), _) => length,
        (None, CompressionKind::AirdCombo) => 0,
        (None, _) => anyhow::bail!("--length is required for {compression}"),
    };

    let mut info = BinaryDataInfo::new(compression, text.len(), array_length)
        .with_bit_width(bit_width);
    if let Some(kind) = array_kind {
        info = info.with_array_kind(kind);
    }

    info!("Decoding {} Base64 bytes as {}", text.len(), compression);
    let decoder = PeakDecoder::new(config);
    if single {
        let values: Vec<f32> = decoder
            .decode_str(text, &info)
            .context("Failed to decode payload")?;
        print_values(&values, json)
    } else {
        let values: Vec<f64> = decoder
            .decode_str(text, &info)
            .context("Failed to decode payload")?;
        print_values(&values, json)
    }
}

fn print_values<T: PeakValue + serde::Serialize + std::fmt::Display>(
    values: &[T],
    json: bool,
) -> Result<()> {
    info!("Decoded {} values", values.len());
    if json {
        println!("{}", serde_json::to_string(values)?);
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}
