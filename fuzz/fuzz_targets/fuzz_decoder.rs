#![no_main]

use libfuzzer_sys::fuzz_target;
use mzbinary::prelude::*;

fuzz_target!(|data: &[u8]| {
    // first byte picks the encoding, the second the declared length
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Some((&length, payload)) = rest.split_first() else {
        return;
    };

    let kind = CompressionKind::ALL[selector as usize % CompressionKind::ALL.len()];
    let width = match selector >> 6 {
        0 => BitWidth::Float32,
        1 => BitWidth::Float64,
        2 => BitWidth::Int32,
        _ => BitWidth::Int64,
    };
    let info = BinaryDataInfo::new(kind, payload.len(), length as usize)
        .with_bit_width(width)
        .with_array_kind(ArrayKind::Intensity);

    // Must either decode or fail gracefully, never panic
    let decoder = PeakDecoder::default();
    let _ = decoder.decode::<f64>(payload, &info);
    let _ = decoder.decode::<f32>(payload, &info);
});
