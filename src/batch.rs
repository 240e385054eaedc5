//! Decoding many binary arrays at once
//!
//! A spectrum usually carries two arrays and a run carries thousands of
//! spectra. These helpers decode a batch of `(payload, descriptor)` pairs with
//! one shared [`PeakDecoder`], in parallel when the `parallel` feature is on.
//! Results keep the input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::{info, warn};

use crate::decoder::PeakDecoder;
use crate::descriptor::BinaryDataInfo;
use crate::error::Result;
use crate::value::PeakValue;

/// One encoded array of a batch
#[derive(Debug, Clone, Copy)]
pub struct EncodedArray<'a> {
    /// Base64 text of the `<binary>` element
    pub payload: &'a [u8],
    /// Descriptor of the array
    pub info: &'a BinaryDataInfo,
}

impl<'a> EncodedArray<'a> {
    /// Pair a payload with its descriptor
    pub fn new(payload: &'a [u8], info: &'a BinaryDataInfo) -> Self {
        Self { payload, info }
    }
}

/// Outcome counts of a lossy batch decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Arrays decoded successfully
    pub decoded: usize,
    /// Arrays that failed and were replaced by an empty array
    pub failed: usize,
    /// Values produced across all decoded arrays
    pub values: usize,
}

/// Decode every array, one result per input
pub fn decode_batch<T: PeakValue>(
    decoder: &PeakDecoder,
    arrays: &[EncodedArray<'_>],
) -> Vec<Result<Vec<T>>> {
    #[cfg(feature = "parallel")]
    let results: Vec<Result<Vec<T>>> = arrays
        .par_iter()
        .map(|array| decoder.decode(array.payload, array.info))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Vec<T>>> = arrays
        .iter()
        .map(|array| decoder.decode(array.payload, array.info))
        .collect();

    results
}

/// Decode every array, logging failures and substituting empty arrays
///
/// Useful when a damaged spectrum should not stop a whole run.
pub fn decode_batch_lossy<T: PeakValue>(
    decoder: &PeakDecoder,
    arrays: &[EncodedArray<'_>],
) -> (Vec<Vec<T>>, BatchStats) {
    let mut stats = BatchStats::default();
    let decoded = decode_batch::<T>(decoder, arrays)
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(values) => {
                stats.decoded += 1;
                stats.values += values.len();
                values
            }
            Err(e) => {
                warn!("Skipping array {} ({}): {}", index, arrays[index].info.compression(), e);
                stats.failed += 1;
                Vec::new()
            }
        })
        .collect();

    info!(
        "Decoded {} arrays ({} values), {} failed",
        stats.decoded, stats.values, stats.failed
    );
    (decoded, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BitWidth, CompressionKind, NumpressScheme};
    use crate::encoder::PeakEncoder;

    fn encoded(values: &[f64], compression: CompressionKind) -> (String, BinaryDataInfo) {
        let text = PeakEncoder::default()
            .encode_to_string(values, compression, BitWidth::Float64)
            .unwrap();
        let info = BinaryDataInfo::new(compression, text.len(), values.len())
            .with_bit_width(BitWidth::Float64);
        (text, info)
    }

    #[test]
    fn test_batch_keeps_order() {
        let inputs: Vec<Vec<f64>> = (0..20)
            .map(|i| (0..i).map(|j| (i * 100 + j) as f64).collect())
            .collect();
        let encoded: Vec<(String, BinaryDataInfo)> = inputs
            .iter()
            .map(|values| encoded(values, CompressionKind::Zlib))
            .collect();
        let arrays: Vec<EncodedArray<'_>> = encoded
            .iter()
            .map(|(text, info)| EncodedArray::new(text.as_bytes(), info))
            .collect();

        let results = decode_batch::<f64>(&PeakDecoder::default(), &arrays);
        for (result, expected) in results.into_iter().zip(&inputs) {
            assert_eq!(&result.unwrap(), expected);
        }
    }

    #[test]
    fn test_lossy_batch_skips_failures() {
        let (good, good_info) = encoded(&[1.0, 2.0, 3.0], CompressionKind::None);
        let (pic, pic_info) = encoded(&[5.0, 6.0], CompressionKind::Numpress(NumpressScheme::Pic));
        let bad_info = BinaryDataInfo::new(CompressionKind::None, 4, 10).with_bit_width(BitWidth::Float64);

        let arrays = [
            EncodedArray::new(good.as_bytes(), &good_info),
            EncodedArray::new(b"AAAA", &bad_info),
            EncodedArray::new(pic.as_bytes(), &pic_info),
        ];

        let (decoded, stats) = decode_batch_lossy::<f64>(&PeakDecoder::default(), &arrays);
        assert_eq!(decoded[0], vec![1.0, 2.0, 3.0]);
        assert!(decoded[1].is_empty());
        assert_eq!(decoded[2], vec![5.0, 6.0]);
        assert_eq!(
            stats,
            BatchStats {
                decoded: 2,
                failed: 1,
                values: 5
            }
        );
    }
}
