use anyhow::{Context, Result};

use mzbinary::cv_params::CvParam;
use mzbinary::descriptor::BinaryDataInfo;

/// Resolve cvParam accessions into a descriptor and print it as JSON
pub fn run(accessions: &[String], encoded_length: usize, array_length: usize) -> Result<()> {
    let params: Vec<CvParam> = accessions
        .iter()
        .map(|accession| CvParam::ms(accession.as_str(), ""))
        .collect();

    let info = BinaryDataInfo::from_cv_params(&params, encoded_length, array_length)
        .context("cvParams do not describe a binary data array")?;

    println!("{}", serde_json::to_string_pretty(&info)?);
    println!("compression: {} ({})", info.compression(), info.compression().accession());
    Ok(())
}
