//! Anchor and table-of-contents links for the aggregate reference.

/// In-document anchor for a symbol heading: lowercased, spaces to hyphens.
///
/// "SCContent Filter" → "sccontent-filter"
pub fn anchor(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// One table-of-contents bullet linking to the symbol's section.
pub fn toc_item(title: &str) -> String {
    format!("- [{}](#{})", title, anchor(title))
}
