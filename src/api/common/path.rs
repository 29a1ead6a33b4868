//
//  bitbucket-client
//  api/common/path.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Encoding of caller-supplied values placed in API paths.
//!
//! Workspace slugs, commit hashes, build keys and user ids all end up as
//! single path segments. Each one is percent-encoded so that `/`, `?` and
//! `#` inside a value stay part of that segment instead of being read as
//! URL syntax.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes `value` for use as one path segment.
///
/// # Example
///
/// ```rust
/// use bitbucket_client::api::common::encode_segment;
///
/// assert_eq!(encode_segment("nightly/linux"), "nightly%2Flinux");
/// assert_eq!(encode_segment("build#42"), "build%2342");
/// assert_eq!(encode_segment("python-bitbucket"), "python-bitbucket");
/// ```
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT_SET).to_string()
}
