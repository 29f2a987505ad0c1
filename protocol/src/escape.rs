//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Byte-level canonicalization helpers for outbound NVT data.

use crate::consts::{CR, CR_LF, CR_NUL, IAC, LF};
use bytes::{BufMut, BytesMut};

/// Doubles every `IAC` byte so the peer reads it as data rather than as a command.
pub fn escape_iac(data: &[u8]) -> BytesMut {
    let extra = data.iter().filter(|&&byte| byte == IAC).count();
    let mut escaped = BytesMut::with_capacity(data.len() + extra);
    for &byte in data {
        if byte == IAC {
            escaped.put_u8(IAC);
        }
        escaped.put_u8(byte);
    }
    escaped
}

/// Replaces every non-overlapping occurrence of `from` with `to`, scanning left to right.
pub fn replace(data: &[u8], from: &[u8], to: &[u8]) -> BytesMut {
    let mut output = BytesMut::with_capacity(data.len());
    if from.is_empty() {
        output.put_slice(data);
        return output;
    }
    let mut rest = data;
    while let Some(index) = find(rest, from) {
        output.put_slice(&rest[..index]);
        output.put_slice(to);
        rest = &rest[index + from.len()..];
    }
    output.put_slice(rest);
    output
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Rewrites line endings into their NVT form.
///
/// Every bare `LF` becomes `CR LF` and every bare `CR` becomes `CR NUL`, while sequences that
/// are already canonical pass through unchanged.
pub fn canonicalize_newlines(data: &[u8]) -> BytesMut {
    let data = replace(data, CR_LF, &[LF]);
    let data = replace(&data, CR_NUL, &[CR]);
    let data = replace(&data, &[CR], CR_NUL);
    replace(&data, &[LF], CR_LF)
}

/// Applies the full outbound escaping: `IAC` doubling followed by newline canonicalization.
pub fn escape_outbound(data: &[u8]) -> BytesMut {
    canonicalize_newlines(&escape_iac(data))
}
