// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pagination control extraction

use super::document::TagNode;
use super::types::PaginationState;

/// Read current page and page count from a pagination fragment
///
/// Each `li` holds a label (usually inside an `a` or `span`). Labels that
/// are not positive numbers (arrows, ellipses) are skipped. The item
/// flagged `active` is the current page; every other numeric item raises
/// the page count to the largest label seen. Without numeric items both
/// values stay at 1.
pub fn extract_pagination(fragment: &TagNode) -> PaginationState {
    let mut state = PaginationState::default();

    for item in fragment.tag_children().filter(|child| child.name() == "li") {
        let Some(number) = item_number(item) else {
            continue;
        };

        if item.has_class("active") {
            state.current_page = number;
            continue;
        }

        state.total_pages = state.total_pages.max(number);
    }

    // the active item can be the last page
    state.total_pages = state.total_pages.max(state.current_page);
    state
}

fn item_number(item: &TagNode) -> Option<u32> {
    let label = match item.nth_tag(0) {
        Some(link) => link.leading_text(),
        None => item.leading_text(),
    }?;

    label.parse::<u32>().ok().filter(|number| *number > 0)
}
