#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // Anything we can decode must survive a lossless 8-8-8-8 round trip
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = EncodeRequest::rgba8888()
        .encode(&decoded, enough::Unstoppable)
        .expect("decoded buffer must re-encode");
    let Ok(decoded2) = decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
