// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word extraction from results lists
//!
//! A results list holds one tag child per entry. The entry's first tag
//! child is the entry body, laid out by tag position:
//!
//! ```text
//! body
//! ├── [0] language label        "sl", "en", ...
//! ├── [1] headword title        "računalnik"
//! ├── [2] explanations block
//! │    └── [0] runs             <span>computer</span> <strong>razlaga</strong> ...
//! └── [3] dictionary label      "Vir: <dictionary>"
//! ```
//!
//! Each field has its own accessor, so a markup change breaks one field
//! rather than the whole entry. A missing position is an extraction gap:
//! logged and recovered as an empty value.

use tracing::debug;

use super::diacritics::strip_diacritics;
use super::document::{Node, TagNode};
use super::types::{ExtractedWord, SectionKind, SectionResult};

/// Language code of the site's own (Slovene) entries
pub const PRIMARY_LANGUAGE: &str = "sl";

/// Literal prefix of the dictionary label
pub const DICTIONARY_PREFIX: &str = "Vir: ";

/// Tags whose text is an explanation
pub const EXPLANATION_TAGS: &[&str] = &["strong"];

const LANGUAGE_POSITION: usize = 0;
const HEADWORD_POSITION: usize = 1;
const EXPLANATIONS_POSITION: usize = 2;
const DICTIONARY_POSITION: usize = 3;

/// Extract every entry of a results-list fragment
///
/// Entries sharing a surface form are merged: explanations of later
/// entries are appended in encounter order.
pub fn extract_section(
    fragment: &TagNode,
    kind: SectionKind,
    query: &str,
    source_url: &str,
) -> SectionResult {
    let mut section = SectionResult::new(kind);

    for entry in fragment.tag_children() {
        let Some(body) = entry_body(entry) else {
            debug!(entry = entry.name(), "Skipping results child without entry body");
            continue;
        };

        let word = ExtractedWord {
            surface_form: surface_form(body, kind, query),
            source_language: language(body),
            explanations: explanations(body),
            dictionary_name: dictionary_name(body),
            source_url: source_url.to_string(),
        };
        merge_word(&mut section.words, word);
    }

    section
}

/// Append `word`, or fold its explanations into an existing record with the
/// same surface form
pub fn merge_word(words: &mut Vec<ExtractedWord>, word: ExtractedWord) {
    match words
        .iter_mut()
        .find(|existing| existing.surface_form == word.surface_form)
    {
        Some(existing) => existing.explanations.extend(word.explanations),
        None => words.push(word),
    }
}

/// The entry body: first tag child of a results-list child
pub fn entry_body(entry: &TagNode) -> Option<&TagNode> {
    entry.nth_tag(0)
}

/// Declared language of the entry, empty when undetermined
pub fn language(body: &TagNode) -> String {
    body.nth_tag(LANGUAGE_POSITION)
        .and_then(TagNode::leading_text)
        .map(str::to_string)
        .unwrap_or_else(|| gap("language"))
}

/// Source dictionary name with the "Vir: " prefix removed
pub fn dictionary_name(body: &TagNode) -> String {
    body.nth_tag(DICTIONARY_POSITION)
        .and_then(TagNode::leading_text)
        .map(|label| {
            label
                .strip_prefix(DICTIONARY_PREFIX)
                .unwrap_or(label)
                .trim()
                .to_string()
        })
        .unwrap_or_else(|| gap("dictionary_name"))
}

/// Headword as printed in the entry title
pub fn headword(body: &TagNode) -> String {
    body.nth_tag(HEADWORD_POSITION)
        .and_then(TagNode::leading_text)
        .map(str::to_string)
        .unwrap_or_else(|| gap("headword"))
}

/// Foreign-language headword printed inside the explanations block
///
/// The first run that is not an explanation tag; falls back to a bare text
/// run of the block.
pub fn explanation_headword(body: &TagNode) -> String {
    let Some(runs) = explanation_runs(body) else {
        return gap("explanation_headword");
    };

    let tagged = runs
        .tag_children()
        .filter(|run| !is_explanation_tag(run))
        .find_map(TagNode::leading_text);
    let bare = || {
        runs.children().iter().find_map(|child| match child {
            Node::Text(text) => text.content(),
            Node::Tag(_) => None,
        })
    };

    tagged
        .or_else(bare)
        .map(str::to_string)
        .unwrap_or_else(|| gap("explanation_headword"))
}

/// Explanation texts in document order
pub fn explanations(body: &TagNode) -> Vec<String> {
    let Some(runs) = explanation_runs(body) else {
        gap("explanations");
        return Vec::new();
    };

    runs.tag_children()
        .filter(|run| is_explanation_tag(run))
        .filter_map(TagNode::leading_text)
        .map(str::to_string)
        .collect()
}

/// Resolve the surface form by section policy
///
/// Main sections are keyed to the query itself (diacritics stripped).
/// Elsewhere Slovene entries use the title and foreign entries the
/// headword printed inside the explanations.
pub fn surface_form(body: &TagNode, kind: SectionKind, query: &str) -> String {
    if kind == SectionKind::Main {
        return strip_diacritics(query);
    }

    if language(body) == PRIMARY_LANGUAGE {
        headword(body)
    } else {
        explanation_headword(body)
    }
}

fn explanation_runs(body: &TagNode) -> Option<&TagNode> {
    body.nth_tag(EXPLANATIONS_POSITION)?.nth_tag(0)
}

fn is_explanation_tag(tag: &TagNode) -> bool {
    EXPLANATION_TAGS.contains(&tag.name())
}

fn gap(field: &'static str) -> String {
    debug!(field, "Extraction gap, using empty value");
    String::new()
}
