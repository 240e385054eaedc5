use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mzbinary::config::CodecConfig;
use mzbinary::descriptor::{BitWidth, CompressionKind};
use mzbinary::encoder::PeakEncoder;

/// Encode numbers into a Base64 payload
pub fn run(
    config: &CodecConfig,
    input: Option<PathBuf>,
    compression: CompressionKind,
    bit_width: BitWidth,
) -> Result<()> {
    if compression.is_combo() {
        anyhow::bail!("combo compression encodes paired arrays, use the combo subcommand");
    }

    let values = super::parse_numbers(&super::read_input(input.as_deref())?)?;
    let text = PeakEncoder::new(config)
        .encode_to_string(&values, compression, bit_width)
        .with_context(|| format!("Failed to encode {} values", values.len()))?;

    info!(
        "Encoded {} values as {} into {} Base64 bytes",
        values.len(),
        compression,
        text.len()
    );
    println!("{text}");
    Ok(())
}
