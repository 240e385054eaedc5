use super::*;

fn mz_ladder() -> Vec<f64> {
    (0..200).map(|i| 100.0 + i as f64 * 0.731 + (i % 7) as f64 * 0.0013).collect()
}

#[test]
fn test_linear_golden_bytes() {
    let encoded = encode_linear(&[100.0, 200.0, 300.0, 400.0], 1000.0).unwrap();
    assert_eq!(
        encoded,
        vec![
            0x40, 0x8f, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, // 1000.0 big-endian
            0xa0, 0x86, 0x01, 0x00, // 100000
            0x40, 0x0d, 0x03, 0x00, // 200000
            0x88, // two zero residuals
        ]
    );

    let decoded = decode_linear(&encoded).unwrap();
    assert_eq!(decoded, vec![100.0, 200.0, 300.0, 400.0]);
}

#[test]
fn test_linear_roundtrip_within_fixed_point() {
    let data = mz_ladder();
    let fixed_point = optimal_linear_fixed_point(&data);
    let decoded = decode_linear(&encode_linear(&data, fixed_point).unwrap()).unwrap();

    assert_eq!(decoded.len(), data.len());
    for (original, restored) in data.iter().zip(&decoded) {
        assert!((original - restored).abs() <= 1.0 / fixed_point);
    }
}

#[test]
fn test_linear_short_inputs() {
    assert_eq!(encode_linear(&[], 0.0).unwrap().len(), 8);
    assert!(decode_linear(&encode_linear(&[], 0.0).unwrap()).unwrap().is_empty());

    let fixed_point = optimal_linear_fixed_point(&[100.0]);
    let encoded = encode_linear(&[100.0], fixed_point).unwrap();
    assert_eq!(encoded.len(), 12);
    assert_eq!(decode_linear(&encoded).unwrap(), vec![100.0]);

    let encoded = encode_linear(&[100.0, 101.0], 1000.0).unwrap();
    assert_eq!(encoded.len(), 16);
    assert_eq!(decode_linear(&encoded).unwrap(), vec![100.0, 101.0]);
}

#[test]
fn test_linear_descending_values() {
    let data = [500.0, 400.0, 250.0, 251.0, 10.0];
    let decoded = decode_linear(&encode_linear(&data, 100.0).unwrap()).unwrap();
    assert_eq!(decoded, data.to_vec());
}

#[test]
fn test_optimal_linear_fixed_point() {
    assert_eq!(optimal_linear_fixed_point(&[]), 0.0);
    assert_eq!(optimal_linear_fixed_point(&[100.0, 200.0, 300.0]), 10_737_418.0);
}

#[test]
fn test_linear_corrupt_input() {
    assert_eq!(
        decode_linear(&[1, 2, 3]),
        Err(NumpressError::Corrupt("not enough bytes to read fixed point"))
    );

    let mut short = 1000.0f64.to_be_bytes().to_vec();
    short.extend_from_slice(&[1, 2]);
    assert!(matches!(decode_linear(&short), Err(NumpressError::Corrupt(_))));

    let mut zero_fixed_point = 0.0f64.to_be_bytes().to_vec();
    zero_fixed_point.extend_from_slice(&[0, 0, 0, 0]);
    assert!(matches!(decode_linear(&zero_fixed_point), Err(NumpressError::Corrupt(_))));
}

#[test]
fn test_linear_residual_overflow() {
    let err = encode_linear(&[0.0, 0.0, 1.0e6], 1.0e4).unwrap_err();
    assert!(matches!(err, NumpressError::Overflow(_)));
}

#[test]
fn test_pic_rounds_to_nearest_integer() {
    let data = [0.0, 3.4, 3.6, 1000.0, 123_456.7];
    let decoded = decode_pic(&encode_pic(&data).unwrap()).unwrap();
    assert_eq!(decoded, vec![0.0, 3.0, 4.0, 1000.0, 123_457.0]);
}

#[test]
fn test_pic_golden_bytes() {
    assert_eq!(encode_pic(&[0.0, 1.0, 15.0, 16.0]).unwrap(), vec![0x87, 0x17, 0xf6, 0x01]);
    assert_eq!(encode_pic(&[0.0]).unwrap(), vec![0x80]);
    assert_eq!(decode_pic(&[0x80]).unwrap(), vec![0.0]);
}

#[test]
fn test_pic_rejects_negative_values() {
    assert!(matches!(encode_pic(&[5.0, -1.0]), Err(NumpressError::Overflow(_))));
    assert!(matches!(encode_pic(&[f64::NAN]), Err(NumpressError::Overflow(_))));
}

#[test]
fn test_slof_roundtrip_within_log_resolution() {
    let data: Vec<f64> = (0..100).map(|i| (i * i) as f64 * 37.5).collect();
    let fixed_point = optimal_slof_fixed_point(&data);
    let decoded = decode_slof(&encode_slof(&data, fixed_point).unwrap()).unwrap();

    assert_eq!(decoded.len(), data.len());
    for (original, restored) in data.iter().zip(&decoded) {
        let log_error = ((original + 1.0).ln() - (restored + 1.0).ln()).abs();
        assert!(log_error <= 0.5 / fixed_point + 1e-12);
    }
}

#[test]
fn test_slof_edge_cases() {
    assert_eq!(optimal_slof_fixed_point(&[]), 0.0);
    assert_eq!(optimal_slof_fixed_point(&[0.0]), 65535.0);
    assert!(decode_slof(&encode_slof(&[], 0.0).unwrap()).unwrap().is_empty());

    assert!(matches!(encode_slof(&[1e300], 1000.0), Err(NumpressError::Overflow(_))));

    let mut odd = 1000.0f64.to_be_bytes().to_vec();
    odd.push(7);
    assert!(matches!(decode_slof(&odd), Err(NumpressError::Corrupt(_))));
}

#[test]
fn test_scheme_dispatch_uses_fixed_point_override() {
    use crate::descriptor::NumpressScheme;

    let data = mz_ladder();
    let encoded = encode(NumpressScheme::Linear, &data, Some(1000.0)).unwrap();
    assert_eq!(&encoded[..8], &1000.0f64.to_be_bytes());

    let decoded = decode(NumpressScheme::Linear, &encoded).unwrap();
    assert_eq!(decoded.len(), data.len());
}

#[test]
fn test_single_value_fixed_point_is_positive() {
    assert_eq!(optimal_linear_fixed_point(&[0.0]), 1.0);
    assert_eq!(optimal_linear_fixed_point(&[-5.0]), 1.0);
    assert_eq!(optimal_linear_fixed_point(&[100.0]), 42_949_672.0);
}

#[test]
fn test_non_positive_fixed_point_rejected() {
    for fixed_point in [0.0, -1000.0, f64::INFINITY, f64::NAN] {
        assert!(matches!(encode_linear(&[1.0], fixed_point), Err(NumpressError::Overflow(_))));
        assert!(matches!(encode_slof(&[0.0], fixed_point), Err(NumpressError::Overflow(_))));
    }
}
