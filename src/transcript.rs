//! Session pages: transcript extraction from video-page HTML and assembly
//! of one markdown file per session (header, community notes, transcript).
//!
//! Transcript text is recovered from a known HTML section, stripped of
//! markup, entity-decoded and whitespace-normalized, then re-paragraphed
//! by sentence count with flushes on topic-shift phrases.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_TRANSCRIPT_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<section id="transcript-content">(.*?)</section>"#).unwrap());

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// First second-level heading to end of file; community notes keep their
// front matter above it.
static RE_NOTES_BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\n## .+").unwrap());

/// Phrases that end the current transcript paragraph when the sentence just
/// added contains one.
const TOPIC_KEYWORDS: [&str; 7] = [
    "let me show",
    "let's",
    "next",
    "now",
    "first",
    "finally",
    "to recap",
];

/// Sentences per transcript paragraph when no topic shift intervenes.
const PARAGRAPH_SENTENCES: usize = 4;

/// One developer-conference session to mirror.
#[derive(Debug, Clone, Deserialize)]
pub struct WwdcSession {
    pub year: String,
    pub id: String,
    pub title: String,
    /// Path component of the community notes file.
    pub slug: String,
}

impl WwdcSession {
    /// Public video page, also the transcript source.
    pub fn video_url(&self) -> String {
        format!(
            "https://developer.apple.com/videos/play/wwdc{}/{}/",
            self.year, self.id
        )
    }

    /// Community notes file under the configured notes base.
    pub fn notes_url(&self, base: &str) -> String {
        format!(
            "{}/WWDC{}/WWDC{}-{}-{}.md",
            base.trim_end_matches('/'),
            self.year,
            self.year,
            self.id,
            self.slug
        )
    }

    /// Output file name: year, id and the title with spaces dashed and
    /// apostrophes dropped.
    pub fn output_name(&self) -> String {
        format!(
            "WWDC{}-{}-{}.md",
            self.year,
            self.id,
            self.title.replace(' ', "-").replace('\'', "")
        )
    }

    /// Assemble the session markdown: header, then a notes section when
    /// usable notes are given, then the re-paragraphed transcript.
    pub fn render(&self, notes: Option<&str>, transcript: Option<&str>) -> String {
        let mut lines: Vec<String> = vec![
            format!("# {}", self.title),
            String::new(),
            format!("**WWDC{}** | Session {}", self.year, self.id),
            String::new(),
            format!("[Watch Video]({})", self.video_url()),
            String::new(),
        ];

        if let Some(body) = notes.and_then(usable_notes_body) {
            lines.push("---".to_string());
            lines.push(String::new());
            lines.push("## Notes & Code Snippets".to_string());
            lines.push(String::new());
            lines.push("*From [WWDCNotes](https://wwdcnotes.com) community*".to_string());
            lines.push(String::new());
            lines.push(body.to_string());
            lines.push(String::new());
        }

        if let Some(text) = transcript.filter(|t| !t.is_empty()) {
            lines.push("---".to_string());
            lines.push(String::new());
            lines.push("## Full Transcript".to_string());
            lines.push(String::new());
            for paragraph in paragraphs(text) {
                lines.push(paragraph);
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }
}

/// Notes content from the heading down, or None when the file is the
/// service's "No Overview Available" placeholder or has no heading at all.
fn usable_notes_body(notes: &str) -> Option<&str> {
    if notes.contains("No Overview Available") {
        return None;
    }
    RE_NOTES_BODY.find(notes).map(|m| m.as_str().trim())
}

/// Pull the transcript out of a video page. None when the page has no
/// transcript section or it reduces to nothing.
pub fn extract_transcript(html: &str) -> Option<String> {
    let section = RE_TRANSCRIPT_SECTION
        .captures(html)
        .and_then(|c| c.get(1))?;
    let text = RE_TAG.replace_all(section.as_str(), " ");
    let text = unescape_entities(&text);
    let text = RE_WHITESPACE.replace_all(&text, " ");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Decode the entity forms that occur in transcript markup. Anything
/// unrecognized stays as written.
fn unescape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let end = rest.find(';').filter(|&end| (2..32).contains(&end));
        match end.and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end))) {
            Some((decoded, end)) => {
                out.push(decoded);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "hellip" => Some('\u{2026}'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Split at every whitespace run directly preceded by `.`, `!` or `?`. The
/// terminator stays with its sentence; the whitespace is consumed.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..i]);
            let mut next_start = i + c.len_utf8();
            while let Some(&(j, d)) = chars.peek() {
                if !d.is_whitespace() {
                    break;
                }
                chars.next();
                next_start = j + d.len_utf8();
            }
            start = next_start;
        }
        prev = Some(c);
    }
    sentences.push(&text[start..]);
    sentences
}

/// Group sentences into paragraphs: flush at four sentences, or earlier
/// when the sentence just added contains a topic-shift phrase.
pub fn paragraphs(transcript: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for sentence in split_sentences(transcript) {
        current.push(sentence);
        let lowered = sentence.to_lowercase();
        if current.len() >= PARAGRAPH_SENTENCES
            || TOPIC_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        {
            out.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}
