// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use factlens::upload::{decode_data_url, preview_data_url, UploadPolicy};

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    mime: String,
    bytes: Vec<u8>,
    max_size: u16,
}

fuzz_target!(|input: Input| {
    let policy = UploadPolicy::new(
        u64::from(input.max_size),
        vec!["image/*".to_string(), "video/mp4".to_string()],
    );
    let _ = policy.validate(&input.name, &input.mime, input.bytes.len() as u64);

    let url = preview_data_url(&input.mime, &input.bytes);
    if let Some((_, decoded)) = decode_data_url(&url) {
        assert_eq!(decoded, input.bytes);
    }
});
