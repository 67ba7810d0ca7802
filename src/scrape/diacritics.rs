// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Diacritic stripping for headword identity

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Reduce accented letters to their base Latin letter ("računalnik" -> "racunalnik")
///
/// Decomposes to NFD and drops combining marks. Letters with a stroke have
/// no decomposition and are mapped explicitly.
pub fn strip_diacritics(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            'ł' => 'l',
            'Ł' => 'L',
            other => other,
        })
        .collect()
}
