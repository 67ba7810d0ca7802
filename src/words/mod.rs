// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word entities built from scrape sessions

pub mod normalizer;
pub mod types;

pub use normalizer::WordNormalizer;
pub use types::{DictionaryExplanation, WordEntry};
