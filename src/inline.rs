//! Recursive reduction of inline content to flat markdown text.

use crate::model::{last_segment, Inline};

/// Reduce a nested inline sequence to a single flat string.
///
/// Node reductions concatenate in sequence order with no separator; source
/// fragments carry their own whitespace. A `reference` reduces to its
/// identifier tail in backticks (resolving to a human title needs the owning
/// document's reference map and is the caller's job). Wrapper and unknown
/// nodes reduce to their nested children, or to nothing.
pub fn flatten(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text { text } => out.push_str(text),
            Inline::CodeVoice { code } => out.push_str(&format!("`{}`", code)),
            Inline::Reference { identifier } => {
                out.push_str(&format!("`{}`", last_segment(identifier)));
            }
            Inline::Emphasis { inline_content } => {
                out.push_str(&format!("*{}*", flatten(inline_content)));
            }
            Inline::Strong { inline_content } => {
                out.push_str(&format!("**{}**", flatten(inline_content)));
            }
            Inline::Link {
                inline_content,
                destination,
            } => {
                out.push_str(&format!("[{}]({})", flatten(inline_content), destination));
            }
            Inline::Plain(text) => out.push_str(text),
            Inline::Wrapper(wrapper) => {
                if let Some(children) = &wrapper.inline_content {
                    out.push_str(&flatten(children));
                } else if let Some(children) = &wrapper.content {
                    out.push_str(&flatten(children));
                }
            }
        }
    }
    out
}
