// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Section classification from localized header text

use super::document::TagNode;
use super::types::SectionKind;

/// A marker phrase and the section kind it identifies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarker {
    pub phrase: String,
    pub kind: SectionKind,
}

impl SectionMarker {
    pub fn new(phrase: &str, kind: SectionKind) -> Self {
        Self {
            phrase: phrase.to_string(),
            kind,
        }
    }
}

/// Maps header text to a [`SectionKind`] through an ordered marker table
///
/// Matching is a case-sensitive substring search; the first marker found in
/// the header wins.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    markers: Vec<SectionMarker>,
}

impl SectionClassifier {
    pub fn with_markers(markers: Vec<SectionMarker>) -> Self {
        Self { markers }
    }

    pub fn classify(&self, header_text: &str) -> SectionKind {
        self.markers
            .iter()
            .find(|marker| header_text.contains(marker.phrase.as_str()))
            .map(|marker| marker.kind)
            .unwrap_or(SectionKind::Unknown)
    }

    /// Classify a `page-header` fragment by the text of its first tag child
    pub fn classify_header(&self, header: &TagNode) -> SectionKind {
        match header.nth_tag(0) {
            Some(title) => self.classify(&title.text_content()),
            None => SectionKind::Unknown,
        }
    }
}

impl Default for SectionClassifier {
    /// Markers used by the termania.net result page headers
    fn default() -> Self {
        Self::with_markers(vec![
            // renderings in another language, usually English
            SectionMarker::new("PREVODIH", SectionKind::Translate),
            // entries that only mention the query in their explanations
            SectionMarker::new("DRUGI VSEBINI", SectionKind::Others),
            // same headword as the query
            SectionMarker::new("IZTOČNICAH", SectionKind::Main),
        ])
    }
}
