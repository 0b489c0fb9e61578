#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Header parsing and full decode must never panic
    let _ = zenbmp::probe(data);

    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
