// Copyright (c) The quell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII-case-insensitive string comparisons shared by id-like newtypes.
//!
//! Package ids, project paths and framework names all compare without regard
//! to case while preserving their original spelling for display.

use std::cmp::Ordering;
use std::hash::Hasher;

pub(crate) fn eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

pub(crate) fn cmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}

/// Hashes the lowercased bytes, with a trailing sentinel so that prefixes
/// hash differently (the same scheme `str`'s own impl uses).
pub(crate) fn hash<H: Hasher>(s: &str, state: &mut H) {
    for b in s.bytes() {
        state.write_u8(b.to_ascii_lowercase());
    }
    state.write_u8(0xff);
}
