#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = pico_inflate::DeflateOptions::default().set_limit(1 << 24);
    let mut decoder = pico_inflate::DeflateDecoder::new_with_options(data, options);
    let _result = decoder.decode_zlib();
    let _result = decoder.decode_deflate();
});
