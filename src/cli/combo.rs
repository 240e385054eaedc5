use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use mzbinary::combo::ComboCodec;
use mzbinary::config::CodecConfig;

/// Aird combo compression of a paired scan or chromatogram
///
/// Prints the axis payload on the first line and the intensity payload on the
/// second.
pub fn run(config: &CodecConfig, axis: &Path, intensity: &Path, chromatogram: bool) -> Result<()> {
    let axis_values = super::parse_numbers(&super::read_input(Some(axis))?)?;
    let intensity_values = super::parse_numbers(&super::read_input(Some(intensity))?)?;

    let codec = ComboCodec::new(config);
    let (axis_text, intensity_text) = if chromatogram {
        codec.encode_chromatogram(&axis_values, &intensity_values)
    } else {
        codec.encode_scan(&axis_values, &intensity_values)
    }
    .context("Combo compression failed")?;

    info!(
        "Combo encoded {} points ({} + {} Base64 bytes)",
        axis_values.len(),
        axis_text.len(),
        intensity_text.len()
    );
    println!("{axis_text}");
    println!("{intensity_text}");
    Ok(())
}
