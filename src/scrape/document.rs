// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML document parsing
//!
//! Parses raw markup with `scraper` and converts the fragments under the
//! results container into an owned tree of [`Node`]s. Every node is either
//! a tag or a text run, so downstream stages match exhaustively instead of
//! probing for attributes.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::types::ParseError;

/// Direct `div`/`ul` children of the results container, plus a pagination
/// control rendered after the container
pub const FRAGMENT_SELECTOR: &str =
    r#"div[id="list-results"] > div, div[id="list-results"] > ul, ul.pagination"#;

/// A node of the parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Tag(TagNode),
    Text(TextNode),
}

impl Node {
    /// Convenience constructor for tag nodes
    pub fn tag(name: &str, class: Option<&str>, children: Vec<Node>) -> Self {
        Self::Tag(TagNode::new(name, class, children))
    }

    /// Convenience constructor for text nodes
    pub fn text(text: &str) -> Self {
        Self::Text(TextNode::new(Some(text.to_string())))
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text(_) => None,
        }
    }
}

/// An element with its tag name, class attribute and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    name: String,
    class: Option<String>,
    children: Vec<Node>,
}

impl TagNode {
    pub fn new(name: &str, class: Option<&str>, children: Vec<Node>) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            class: class.map(str::to_string),
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// True if the class attribute contains `token` as a whitespace separated word
    pub fn has_class(&self, token: &str) -> bool {
        self.class
            .as_deref()
            .map(|class| class.split_whitespace().any(|c| c == token))
            .unwrap_or(false)
    }

    /// True if the class attribute contains every token in `tokens`
    pub fn has_classes(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|token| self.has_class(token))
    }

    /// Tag children only, skipping text runs
    pub fn tag_children(&self) -> impl Iterator<Item = &TagNode> {
        self.children.iter().filter_map(Node::as_tag)
    }

    /// The `n`-th tag child (0-based, text runs not counted)
    pub fn nth_tag(&self, n: usize) -> Option<&TagNode> {
        self.tag_children().nth(n)
    }

    /// Text of the first child node, if that child is a non-blank text run
    pub fn leading_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => text.content(),
            _ => None,
        }
    }

    /// All descendant text joined with single spaces
    pub fn text_content(&self) -> String {
        let mut runs = Vec::new();
        self.collect_text(&mut runs);
        runs.join(" ")
    }

    fn collect_text<'a>(&'a self, runs: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Tag(tag) => tag.collect_text(runs),
                Node::Text(text) => {
                    if let Some(content) = text.content() {
                        runs.extend(content.split_whitespace());
                    }
                }
            }
        }
    }
}

/// A text run; comments and other non-element nodes carry no text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    text: Option<String>,
}

impl TextNode {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }

    /// Trimmed text, `None` when absent or blank
    pub fn content(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// The fragments of a results page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentView {
    fragments: Vec<TagNode>,
}

impl DocumentView {
    pub fn fragments(&self) -> &[TagNode] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Parse raw markup into a [`DocumentView`]
///
/// Malformed markup is repaired by the HTML parser; only markup that is not
/// text at all (empty or not UTF-8) is rejected. A page without a results
/// container yields an empty view.
pub fn parse(markup: &[u8]) -> Result<DocumentView, ParseError> {
    let html = std::str::from_utf8(markup).map_err(|e| ParseError::InvalidEncoding {
        reason: e.to_string(),
    })?;

    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let document = Html::parse_document(html);
    let selector = match Selector::parse(FRAGMENT_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            warn!("Invalid fragment selector: {:?}", e);
            return Ok(DocumentView::default());
        }
    };

    let fragments = document.select(&selector).map(convert_element).collect();
    Ok(DocumentView { fragments })
}

fn convert_element(element: ElementRef<'_>) -> TagNode {
    let value = element.value();
    let children = element
        .children()
        .map(|child| match ElementRef::wrap(child) {
            Some(child_element) => Node::Tag(convert_element(child_element)),
            None => match child.value() {
                scraper::Node::Text(text) => {
                    let content: &str = text;
                    Node::Text(TextNode::new(Some(content.to_string())))
                }
                _ => Node::Text(TextNode::new(None)),
            },
        })
        .collect();

    TagNode {
        name: value.name().to_ascii_lowercase(),
        class: value.attr("class").map(str::to_string),
        children,
    }
}
