#![no_main]

use libfuzzer_sys::fuzz_target;
use tagprep_pipeline::cleaning::id_quality_no_iso;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let bits = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    let quality = id_quality_no_iso(bits);
    assert!((0..=7).contains(&quality));

    // the isolation field must not influence the decoded quality
    assert_eq!(quality, id_quality_no_iso(bits | 0o70000000));
    assert_eq!(quality, id_quality_no_iso(bits & !0o70000000));
});
