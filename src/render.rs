//! Markdown rendering of one symbol document.
//!
//! Section order is fixed (title, role, availability, primary sections,
//! topics, see-also) so a given document always renders to the same bytes.
//! Missing pieces are omitted, never an error.

use crate::fetch::{DocFetcher, Namespace};
use crate::inline::flatten;
use crate::model::{
    last_segment, member_title, ContentBlock, Declaration, Document, Parameter, PrimarySection,
};

/// Settings for one conversion pass.
pub struct RenderOptions<'a> {
    /// Language tag for fenced blocks that do not carry their own.
    pub language: &'a str,
    pub namespace: &'a Namespace,
    pub fetcher: &'a dyn DocFetcher,
    /// Splice eligible members' summaries under their topic entries.
    pub expand: bool,
}

/// Render one symbol document to markdown.
///
/// `path` is the corpus-relative path the document was fetched from; its
/// last segment becomes the title when the document has none.
pub fn render_document(doc: &Document, path: &str, opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    let title = doc.title().unwrap_or_else(|| last_segment(path));
    lines.push(format!("# {}", title));
    lines.push(String::new());

    let role = doc.role();
    if !role.is_empty() {
        lines.push(format!("**Type:** {}", role));
        lines.push(String::new());
    }

    let availability: Vec<String> = doc
        .platforms()
        .iter()
        .filter(|p| !p.name.is_empty() && !p.introduced_at.is_empty())
        .map(|p| format!("{} {}+", p.name, p.introduced_at))
        .collect();
    if !availability.is_empty() {
        lines.push(format!("**Availability:** {}", availability.join(", ")));
        lines.push(String::new());
    }

    for section in &doc.primary_content_sections {
        match section {
            PrimarySection::Declarations { declarations } => {
                render_declarations(&mut lines, declarations, opts.language);
            }
            PrimarySection::Content { content } => {
                render_blocks(&mut lines, content, opts.language);
            }
            PrimarySection::Parameters { parameters } => {
                render_parameters(&mut lines, parameters);
            }
            PrimarySection::Unknown => {}
        }
    }

    render_topics(&mut lines, doc, opts);
    render_see_also(&mut lines, doc);

    lines.join("\n")
}

fn render_declarations(lines: &mut Vec<String>, declarations: &[Declaration], default_lang: &str) {
    lines.push("## Declaration".to_string());
    lines.push(String::new());
    for decl in declarations {
        lines.push(format!("```{}", decl.language().unwrap_or(default_lang)));
        lines.push(decl.source_text());
        lines.push("```".to_string());
        lines.push(String::new());
    }
}

fn render_blocks(lines: &mut Vec<String>, blocks: &[ContentBlock], default_lang: &str) {
    for block in blocks {
        match block {
            ContentBlock::Heading {
                level,
                inline_content,
            } => {
                let text = flatten(inline_content);
                lines.push(format!("{} {}", "#".repeat(*level as usize), text));
                lines.push(String::new());
            }
            ContentBlock::Paragraph { inline_content } => {
                lines.push(flatten(inline_content));
                lines.push(String::new());
            }
            ContentBlock::CodeListing { syntax, code } => {
                lines.push(format!("```{}", syntax.as_deref().unwrap_or(default_lang)));
                lines.extend(code.iter().cloned());
                lines.push("```".to_string());
                lines.push(String::new());
            }
            ContentBlock::UnorderedList { items } => {
                for item in items {
                    for nested in &item.content {
                        if let ContentBlock::Paragraph { inline_content } = nested {
                            lines.push(format!("- {}", flatten(inline_content)));
                        }
                    }
                }
                lines.push(String::new());
            }
            ContentBlock::Unknown => {}
        }
    }
}

fn render_parameters(lines: &mut Vec<String>, parameters: &[Parameter]) {
    lines.push("## Parameters".to_string());
    lines.push(String::new());
    for param in parameters {
        let description = param
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Paragraph { inline_content } => Some(flatten(inline_content)),
                _ => None,
            })
            .unwrap_or_default();
        lines.push(format!("- **{}**: {}", param.name, description));
    }
    lines.push(String::new());
}

fn render_topics(lines: &mut Vec<String>, doc: &Document, opts: &RenderOptions) {
    if doc.topic_sections.is_empty() {
        return;
    }
    lines.push("## Topics".to_string());
    lines.push(String::new());
    for topic in &doc.topic_sections {
        lines.push(format!("### {}", topic.title));
        lines.push(String::new());
        for identifier in &topic.identifiers {
            lines.push(format!("#### {}", member_title(&doc.references, identifier)));
            lines.push(String::new());
            let abstract_text = doc
                .references
                .get(identifier)
                .map(|r| flatten(&r.abstract_content))
                .unwrap_or_default();
            if !abstract_text.is_empty() {
                lines.push(abstract_text);
                lines.push(String::new());
            }
            if opts.expand && opts.namespace.owns(identifier) {
                let summary = expand_member(identifier, opts);
                if !summary.is_empty() {
                    lines.push(summary);
                    lines.push(String::new());
                }
            }
        }
        lines.push(String::new());
    }
}

fn render_see_also(lines: &mut Vec<String>, doc: &Document) {
    if doc.see_also_sections.is_empty() {
        return;
    }
    lines.push("## See Also".to_string());
    lines.push(String::new());
    for section in &doc.see_also_sections {
        for identifier in &section.identifiers {
            lines.push(format!("- {}", member_title(&doc.references, identifier)));
        }
    }
    lines.push(String::new());
}

/// Fetch one member document and summarize it; any failure degrades to
/// summary-only for that member.
fn expand_member(identifier: &str, opts: &RenderOptions) -> String {
    match opts.fetcher.fetch(identifier) {
        Ok(Some(child)) => child_summary(&child, opts.language),
        Ok(None) => String::new(),
        Err(e) => {
            log::warn!("skipping expansion of {}: {}", identifier, e);
            String::new()
        }
    }
}

/// Inline summary for an expanded member: its first declaration as a fenced
/// block, then its first non-empty paragraph. Empty when the child carries
/// neither.
pub fn child_summary(doc: &Document, language: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(code) = doc.first_declaration() {
        lines.push(format!("```{}", language));
        lines.push(code);
        lines.push("```".to_string());
    }
    if let Some(text) = first_paragraph(doc) {
        lines.push(text);
    }
    lines.join("\n")
}

/// First paragraph across the content sections that reduces to non-empty
/// text. Empty paragraphs are passed over rather than ending the scan.
fn first_paragraph(doc: &Document) -> Option<String> {
    doc.primary_content_sections
        .iter()
        .filter_map(|s| match s {
            PrimarySection::Content { content } => Some(content),
            _ => None,
        })
        .flat_map(|blocks| blocks.iter())
        .find_map(|b| match b {
            ContentBlock::Paragraph { inline_content } => {
                let text = flatten(inline_content);
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            _ => None,
        })
}
