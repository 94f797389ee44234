#![no_main]
use libfuzzer_sys::fuzz_target;

use primeshare::Share;

fuzz_target!(|share: Share| {
    let _data: Vec<u8> = (&share).into();
});
