//! Typed projection of the vendor documentation JSON.
//!
//! Source documents are best-effort structured: every field here is optional
//! or defaulted so that a sparse or partially malformed document still
//! deserializes and renders, it never fails for data-shape reasons.

use serde::Deserialize;
use std::collections::HashMap;

/// One symbol's full documentation tree, as fetched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub primary_content_sections: Vec<PrimarySection>,
    #[serde(default)]
    pub topic_sections: Vec<TopicSection>,
    #[serde(default)]
    pub see_also_sections: Vec<TopicSection>,
    #[serde(default)]
    pub references: HashMap<String, Reference>,
}

impl Document {
    /// Display title, when the document carries one.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Role tag ("symbol", "collectionGroup", "article", ...), empty if absent.
    pub fn role(&self) -> &str {
        self.metadata.role.as_deref().unwrap_or("")
    }

    /// Symbol kind with role fallback, used for member listings.
    pub fn symbol_kind(&self) -> &str {
        match self.metadata.symbol_kind.as_deref() {
            Some(kind) => kind,
            None => self.role(),
        }
    }

    /// Platform availability entries, empty if absent or null.
    pub fn platforms(&self) -> &[Platform] {
        self.metadata.platforms.as_deref().unwrap_or_default()
    }

    /// Formatted text of the first declaration in any declarations-kind
    /// primary section, or None when there is none (or it formats empty).
    pub fn first_declaration(&self) -> Option<String> {
        let decl = self.primary_content_sections.iter().find_map(|s| match s {
            PrimarySection::Declarations { declarations } => declarations.first(),
            _ => None,
        })?;
        let text = decl.source_text();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Document-level metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    pub role: Option<String>,
    pub symbol_kind: Option<String>,
    /// Null on some pages, hence the double wrapping.
    pub platforms: Option<Vec<Platform>>,
}

/// One platform availability entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub introduced_at: String,
}

/// One entry of `primaryContentSections`, discriminated by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PrimarySection {
    Declarations {
        #[serde(default)]
        declarations: Vec<Declaration>,
    },
    Content {
        #[serde(default)]
        content: Vec<ContentBlock>,
    },
    Parameters {
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
    /// Any other section kind ("mentions", "relationships", ...); skipped.
    #[serde(other)]
    Unknown,
}

/// A signature as a token sequence plus its language tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Declaration {
    #[serde(default)]
    pub tokens: Vec<DeclarationToken>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Declaration {
    /// Concatenated token text; tokens carry their own whitespace.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// First listed language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclarationToken {
    #[serde(default)]
    pub text: String,
}

/// One prose block, discriminated by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ContentBlock {
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
        #[serde(default)]
        inline_content: Vec<Inline>,
    },
    Paragraph {
        #[serde(default)]
        inline_content: Vec<Inline>,
    },
    CodeListing {
        syntax: Option<String>,
        #[serde(default)]
        code: Vec<String>,
    },
    UnorderedList {
        #[serde(default)]
        items: Vec<ListItem>,
    },
    /// Asides, tables, ordered lists and the rest; skipped.
    #[serde(other)]
    Unknown,
}

fn default_heading_level() -> u8 {
    2
}

/// An unordered-list item: a nested block sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// One named parameter with its description blocks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A node of recursive rich text, discriminated by `type`.
///
/// Some inline lists carry bare JSON strings among the tagged nodes; those
/// land in `Plain`. Unrecognized tags and tag-less objects fall through to
/// `Wrapper`, which keeps at most a nested child sequence and otherwise
/// reduces to nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Inline {
    Text {
        #[serde(default)]
        text: String,
    },
    CodeVoice {
        #[serde(default)]
        code: String,
    },
    Reference {
        #[serde(default)]
        identifier: String,
    },
    Emphasis {
        #[serde(default)]
        inline_content: Vec<Inline>,
    },
    Strong {
        #[serde(default)]
        inline_content: Vec<Inline>,
    },
    Link {
        #[serde(default)]
        inline_content: Vec<Inline>,
        #[serde(default)]
        destination: String,
    },
    #[serde(untagged)]
    Plain(String),
    #[serde(untagged)]
    Wrapper(InlineWrapper),
}

/// Catch-all for wrapper nodes and unknown inline kinds.
///
/// The fields stay optional so reduction can tell "key present" apart from
/// "key absent": a wrapper reduces whichever of the two is present,
/// preferring `inlineContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineWrapper {
    pub inline_content: Option<Vec<Inline>>,
    pub content: Option<Vec<Inline>>,
}

/// A named cluster of member identifiers ("Properties", "Methods", ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
}

/// The title+abstract projection of another symbol.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reference {
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_content: Vec<Inline>,
}

/// Display title for a member identifier: the reference entry's title, or the
/// identifier's last path segment when the map has no title for it.
pub fn member_title<'a>(
    references: &'a HashMap<String, Reference>,
    identifier: &'a str,
) -> &'a str {
    references
        .get(identifier)
        .and_then(|r| r.title.as_deref())
        .unwrap_or_else(|| last_segment(identifier))
}

/// Final `/`-delimited segment, or the whole string when no `/` is present.
///
/// "doc://ns/documentation/Foo/bar" → "bar"
pub fn last_segment(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_path() {
        assert_eq!(last_segment("doc://ns/documentation/Foo/bar"), "bar");
    }

    #[test]
    fn last_segment_bare() {
        assert_eq!(last_segment("bar"), "bar");
    }

    #[test]
    fn member_title_prefers_reference_entry() {
        let mut refs = HashMap::new();
        refs.insert(
            "doc://ns/documentation/Foo/bar".to_string(),
            Reference {
                title: Some("bar(_:)".to_string()),
                abstract_content: Vec::new(),
            },
        );
        assert_eq!(
            member_title(&refs, "doc://ns/documentation/Foo/bar"),
            "bar(_:)"
        );
        assert_eq!(member_title(&refs, "doc://ns/documentation/Foo/baz"), "baz");
    }

    #[test]
    fn sparse_document_deserializes() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.title(), None);
        assert_eq!(doc.role(), "");
        assert!(doc.platforms().is_empty());
        assert!(doc.first_declaration().is_none());
    }

    #[test]
    fn null_platforms_tolerated() {
        let doc: Document = serde_json::from_str(
            r#"{"metadata": {"title": "SCStream", "platforms": null}}"#,
        )
        .unwrap();
        assert_eq!(doc.title(), Some("SCStream"));
        assert!(doc.platforms().is_empty());
    }

    #[test]
    fn unknown_section_kind_tolerated() {
        let doc: Document = serde_json::from_str(
            r#"{"primaryContentSections": [{"kind": "mentions", "mentions": []}]}"#,
        )
        .unwrap();
        assert!(matches!(
            doc.primary_content_sections[0],
            PrimarySection::Unknown
        ));
    }

    #[test]
    fn declaration_concatenates_tokens() {
        let decl: Declaration = serde_json::from_str(
            r#"{"tokens": [{"kind": "keyword", "text": "class"}, {"text": " "}, {"kind": "identifier", "text": "SCStream"}], "languages": ["swift"]}"#,
        )
        .unwrap();
        assert_eq!(decl.source_text(), "class SCStream");
        assert_eq!(decl.language(), Some("swift"));
    }

    #[test]
    fn empty_declaration_is_none() {
        let doc: Document = serde_json::from_str(
            r#"{"primaryContentSections": [{"kind": "declarations", "declarations": [{"tokens": []}]}]}"#,
        )
        .unwrap();
        assert!(doc.first_declaration().is_none());
    }

    #[test]
    fn first_declaration_spans_sections() {
        let doc: Document = serde_json::from_str(
            r#"{"primaryContentSections": [
                {"kind": "declarations", "declarations": []},
                {"kind": "declarations", "declarations": [{"tokens": [{"text": "var width: Int"}]}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.first_declaration().as_deref(), Some("var width: Int"));
    }

    #[test]
    fn symbol_kind_falls_back_to_role() {
        let doc: Document =
            serde_json::from_str(r#"{"metadata": {"role": "collectionGroup"}}"#).unwrap();
        assert_eq!(doc.symbol_kind(), "collectionGroup");
    }

    #[test]
    fn unknown_inline_type_becomes_wrapper() {
        let node: Inline =
            serde_json::from_str(r#"{"type": "image", "identifier": "img.png"}"#).unwrap();
        assert!(matches!(node, Inline::Wrapper(_)));
    }

    #[test]
    fn bare_string_inline_node() {
        let nodes: Vec<Inline> =
            serde_json::from_str(r#"["plain", {"type": "text", "text": "tagged"}]"#).unwrap();
        assert!(matches!(&nodes[0], Inline::Plain(s) if s == "plain"));
        assert!(matches!(&nodes[1], Inline::Text { text } if text == "tagged"));
    }
}
