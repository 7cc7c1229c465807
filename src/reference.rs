//! Cross-document aggregation into one consolidated API reference.
//!
//! Aggregation walks every corpus document, pulls member signatures through
//! the retrieval collaborator, and renders a table of contents plus one
//! signature section per symbol. Output ordering is case-insensitive lexical
//! over symbol titles, independent of corpus order.

use crate::fetch::{DocFetcher, Namespace};
use crate::model::{last_segment, Document};
use crate::toc;

/// Roles that mark a document as a class/type page worth aggregating.
const ACCEPTED_ROLES: [&str; 2] = ["symbol", "collectionGroup"];

/// Settings for one aggregation pass.
pub struct ReferenceOptions<'a> {
    /// Language tag for the rendered signature fences.
    pub language: &'a str,
    pub namespace: &'a Namespace,
    pub fetcher: &'a dyn DocFetcher,
}

/// Accumulated aggregate: symbols in corpus order, topics in first-encounter
/// order per symbol, members in discovery order.
#[derive(Debug, Default)]
pub struct ApiReference {
    pub symbols: Vec<SymbolApi>,
}

impl ApiReference {
    /// Record a symbol; a repeated display title replaces the earlier entry.
    fn insert(&mut self, symbol: SymbolApi) {
        if let Some(existing) = self.symbols.iter_mut().find(|s| s.title == symbol.title) {
            *existing = symbol;
        } else {
            self.symbols.push(symbol);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SymbolApi {
    pub title: String,
    pub declaration: Option<String>,
    pub topics: Vec<TopicApi>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicApi {
    pub title: String,
    pub members: Vec<MemberApi>,
}

/// One recorded member signature.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct MemberApi {
    pub name: String,
    pub declaration: String,
    /// Symbol kind with role fallback ("method", "property", ...).
    pub kind: String,
}

/// Build the aggregate over a corpus of (path, document) pairs.
///
/// Documents outside the accepted roles are skipped; so are symbols that end
/// up with neither a class declaration nor any recorded member. Members are
/// recorded once per topic occurrence, without de-duplication.
pub fn aggregate(corpus: &[(String, Document)], opts: &ReferenceOptions) -> ApiReference {
    let mut api = ApiReference::default();

    for (path, doc) in corpus {
        if !ACCEPTED_ROLES.contains(&doc.role()) {
            log::debug!("skipping {} (role {:?})", path, doc.role());
            continue;
        }

        let title = doc
            .title()
            .unwrap_or_else(|| last_segment(path))
            .to_string();
        let declaration = doc.first_declaration();

        let mut topics: Vec<TopicApi> = Vec::new();
        for topic in &doc.topic_sections {
            for identifier in &topic.identifiers {
                if !opts.namespace.owns(identifier) {
                    continue;
                }
                if let Some(member) = fetch_member(identifier, opts) {
                    push_member(&mut topics, &topic.title, member);
                }
            }
        }

        if declaration.is_none() && topics.is_empty() {
            log::debug!("skipping {} (no declaration, no members)", path);
            continue;
        }
        api.insert(SymbolApi {
            title,
            declaration,
            topics,
        });
    }

    api
}

/// Fetch one member document and pull out its signature; None when the
/// document is unavailable or carries no declaration.
fn fetch_member(identifier: &str, opts: &ReferenceOptions) -> Option<MemberApi> {
    let child = match opts.fetcher.fetch(identifier) {
        Ok(Some(child)) => child,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("skipping member {}: {}", identifier, e);
            return None;
        }
    };
    let declaration = child.first_declaration()?;
    Some(MemberApi {
        name: child
            .title()
            .unwrap_or_else(|| last_segment(identifier))
            .to_string(),
        declaration,
        kind: child.symbol_kind().to_string(),
    })
}

/// Append under the topic's existing entry, or open a new one in encounter
/// order.
fn push_member(topics: &mut Vec<TopicApi>, title: &str, member: MemberApi) {
    match topics.iter_mut().find(|t| t.title == title) {
        Some(topic) => topic.members.push(member),
        None => topics.push(TopicApi {
            title: title.to_string(),
            members: vec![member],
        }),
    }
}

/// Render the aggregate to one markdown document.
pub fn render_reference(api: &ApiReference, framework: &str, language: &str) -> String {
    let mut order: Vec<&SymbolApi> = api.symbols.iter().collect();
    order.sort_by_key(|s| s.title.to_lowercase());

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# {} API Reference", framework));
    lines.push(String::new());
    lines.push(format!("Complete API signatures for all {} types.", framework));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    lines.push("## Table of Contents".to_string());
    lines.push(String::new());
    for symbol in &order {
        lines.push(toc::toc_item(&symbol.title));
    }
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());

    for symbol in &order {
        lines.push(format!("## {}", symbol.title));
        lines.push(String::new());
        if let Some(declaration) = &symbol.declaration {
            lines.push(format!("```{}", language));
            lines.push(declaration.clone());
            lines.push("```".to_string());
            lines.push(String::new());
        }
        for topic in &symbol.topics {
            if !topic.title.is_empty() {
                lines.push(format!("### {}", topic.title));
                lines.push(String::new());
            }
            lines.push(format!("```{}", language));
            for member in &topic.members {
                lines.push(member.declaration.clone());
            }
            lines.push("```".to_string());
            lines.push(String::new());
        }
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}
