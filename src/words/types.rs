// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word entity types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::translate::Translation;

/// One dictionary's explanations for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryExplanation {
    pub explanations: Vec<String>,
    pub dictionary_name: String,
    /// Results page the explanations were scraped from
    pub source: String,
}

/// A persistable word with everything known about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: Uuid,
    pub name: String,
    pub language: String,
    pub translation: Option<Translation>,
    pub dictionaries: Vec<DictionaryExplanation>,
}

impl WordEntry {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            language: language.into(),
            translation: None,
            dictionaries: Vec::new(),
        }
    }
}
