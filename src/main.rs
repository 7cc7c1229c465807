//! doccmark: mirror vendor API documentation as markdown.
//!
//! Stages are exposed individually (`fetch`, `convert`, `reference`,
//! `samples`, `wwdc`, `index`) and as one pipeline (`mirror`), which lays
//! out `json/`, `markdown/`, `samples/` and `wwdc/` under the output root
//! plus a consolidated `API.md` and a `README.md` index.

mod fetch;
mod inline;
mod manifest;
mod model;
mod reference;
mod render;
mod samples;
mod toc;
mod transcript;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fetch::{DirFetcher, DocFetcher, HttpFetcher, Namespace, WebClient};
use manifest::Manifest;
use model::Document;
use reference::ReferenceOptions;
use render::RenderOptions;

/// Spacing between successive corpus document downloads, in milliseconds.
const FETCH_DELAY_MS: u64 = 200;
/// Spacing between member fetches while expanding topics, in milliseconds.
const EXPAND_DELAY_MS: u64 = 100;
/// Spacing between member fetches while aggregating, in milliseconds.
const AGGREGATE_DELAY_MS: u64 = 50;
/// Pause between session downloads.
const SESSION_DELAY: Duration = Duration::from_millis(300);

#[derive(Parser)]
#[command(name = "doccmark", version)]
#[command(about = "Mirror vendor API documentation as markdown")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every corpus document as pretty-printed JSON
    Fetch {
        /// Manifest naming the framework, corpus, samples and sessions
        #[arg(short = 'm', long, value_name = "FILE")]
        manifest: PathBuf,

        /// Output directory for the JSON mirror
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Minimum milliseconds between requests
        #[arg(long, default_value_t = FETCH_DELAY_MS)]
        delay_ms: u64,
    },

    /// Convert mirrored JSON documents to markdown
    Convert {
        /// Input JSON files (glob patterns supported)
        #[arg(required = true)]
        files: Vec<String>,

        /// Output directory for markdown files
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Splice eligible members' summaries under their topic entries
        #[arg(long)]
        expand: bool,

        /// Resolve expanded members against a JSON mirror directory
        /// instead of the network
        #[arg(long, value_name = "DIR")]
        resolve_from: Option<PathBuf>,

        /// Documentation bundle identifier owning expandable members
        #[arg(long, default_value = "com.apple.screencapturekit")]
        bundle: String,

        /// Language tag for fenced blocks without their own
        #[arg(long, default_value = "swift")]
        language: String,

        /// Documentation service base URL
        #[arg(long, default_value = "https://developer.apple.com/tutorials/data/documentation")]
        base_url: String,

        /// Minimum milliseconds between member fetches
        #[arg(long, default_value_t = EXPAND_DELAY_MS)]
        delay_ms: u64,
    },

    /// Aggregate JSON documents into one consolidated API reference
    Reference {
        /// Input JSON files (glob patterns supported)
        #[arg(required = true)]
        files: Vec<String>,

        /// Output file for the consolidated reference
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Framework display name used in the reference headings
        #[arg(long, default_value = "ScreenCaptureKit")]
        title: String,

        /// Resolve member documents against a JSON mirror directory
        /// instead of the network
        #[arg(long, value_name = "DIR")]
        resolve_from: Option<PathBuf>,

        /// Documentation bundle identifier owning member documents
        #[arg(long, default_value = "com.apple.screencapturekit")]
        bundle: String,

        /// Language tag for the signature fences
        #[arg(long, default_value = "swift")]
        language: String,

        /// Documentation service base URL
        #[arg(long, default_value = "https://developer.apple.com/tutorials/data/documentation")]
        base_url: String,

        /// Minimum milliseconds between member fetches
        #[arg(long, default_value_t = AGGREGATE_DELAY_MS)]
        delay_ms: u64,
    },

    /// Download and extract the manifest's sample projects
    Samples {
        /// Manifest naming the framework, corpus, samples and sessions
        #[arg(short = 'm', long, value_name = "FILE")]
        manifest: PathBuf,

        /// Output directory, one subdirectory per project
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Fetch session notes and transcripts, one markdown file per session
    Wwdc {
        /// Manifest naming the framework, corpus, samples and sessions
        #[arg(short = 'm', long, value_name = "FILE")]
        manifest: PathBuf,

        /// Output directory for session files
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Regenerate the README.md index over a mirror directory
    Index {
        /// Manifest naming the framework, corpus, samples and sessions
        #[arg(short = 'm', long, value_name = "FILE")]
        manifest: PathBuf,

        /// Mirror root directory
        #[arg(short = 'o', long)]
        output: PathBuf,
    },

    /// Run the full pipeline: fetch, convert, samples, wwdc, reference, index
    Mirror {
        /// Manifest naming the framework, corpus, samples and sessions
        #[arg(short = 'm', long, value_name = "FILE")]
        manifest: PathBuf,

        /// Mirror root directory
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Minimum milliseconds between document downloads
        #[arg(long, default_value_t = FETCH_DELAY_MS)]
        delay_ms: u64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch {
            manifest,
            output,
            delay_ms,
        } => fetch_stage(
            &Manifest::load(&manifest)?,
            &output,
            Duration::from_millis(delay_ms),
        ),
        Commands::Convert {
            files,
            output,
            expand,
            resolve_from,
            bundle,
            language,
            base_url,
            delay_ms,
        } => convert_files(
            &files,
            &output,
            expand,
            resolve_from.as_deref(),
            &bundle,
            &language,
            &base_url,
            Duration::from_millis(delay_ms),
        ),
        Commands::Reference {
            files,
            output,
            title,
            resolve_from,
            bundle,
            language,
            base_url,
            delay_ms,
        } => reference_files(
            &files,
            &output,
            &title,
            resolve_from.as_deref(),
            &bundle,
            &language,
            &base_url,
            Duration::from_millis(delay_ms),
        ),
        Commands::Samples { manifest, output } => {
            samples_stage(&Manifest::load(&manifest)?, &output)
        }
        Commands::Wwdc { manifest, output } => wwdc_stage(&Manifest::load(&manifest)?, &output),
        Commands::Index { manifest, output } => write_index(&Manifest::load(&manifest)?, &output),
        Commands::Mirror {
            manifest,
            output,
            delay_ms,
        } => mirror(
            &Manifest::load(&manifest)?,
            &output,
            Duration::from_millis(delay_ms),
        ),
    }
}

/// Mirror every corpus document to `out_dir` as pretty-printed JSON.
/// Failures warn and count; they never stop the run.
fn fetch_stage(manifest: &Manifest, out_dir: &Path, delay: Duration) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let namespace = Namespace::new(&manifest.bundle());
    let fetcher = HttpFetcher::new(namespace, &manifest.base_url, delay)?;

    println!("Fetching {} documents to {}", manifest.docs.len(), out_dir.display());
    let mut fetched = 0;
    for path in &manifest.docs {
        println!("  {}", path);
        match fetcher.fetch_raw(path) {
            Ok(Some(value)) => {
                let out_path = out_dir.join(fetch::doc_file_name(path));
                fs::write(&out_path, serde_json::to_string_pretty(&value)?)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                fetched += 1;
            }
            Ok(None) => log::warn!("not found: {}", path),
            Err(e) => log::warn!("failed to fetch {}: {}", path, e),
        }
    }
    println!("Fetched {}/{} documents", fetched, manifest.docs.len());
    Ok(())
}

/// Convert explicitly named JSON files, one `.md` per input with the same
/// stem. Unreadable inputs warn and are skipped.
#[allow(clippy::too_many_arguments)]
fn convert_files(
    patterns: &[String],
    out_dir: &Path,
    expand: bool,
    resolve_from: Option<&Path>,
    bundle: &str,
    language: &str,
    base_url: &str,
    delay: Duration,
) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let namespace = Namespace::new(bundle);
    let fetcher = make_fetcher(&namespace, resolve_from, base_url, delay)?;
    let opts = RenderOptions {
        language,
        namespace: &namespace,
        fetcher: fetcher.as_ref(),
        expand,
    };

    let inputs = expand_globs(patterns)?;
    let mut converted = 0;
    for path in &inputs {
        match read_document(path) {
            Ok(doc) => {
                let stem = file_stem(path);
                let out_path = out_dir.join(format!("{}.md", stem));
                fs::write(&out_path, render::render_document(&doc, &stem, &opts))
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                converted += 1;
            }
            Err(e) => eprintln!("warning: skipping {}: {}", path.display(), e),
        }
    }
    println!("Converted {}/{} documents", converted, inputs.len());
    Ok(())
}

/// Aggregate explicitly named JSON files into one consolidated reference.
#[allow(clippy::too_many_arguments)]
fn reference_files(
    patterns: &[String],
    out_file: &Path,
    title: &str,
    resolve_from: Option<&Path>,
    bundle: &str,
    language: &str,
    base_url: &str,
    delay: Duration,
) -> Result<()> {
    let inputs = expand_globs(patterns)?;
    let corpus = load_corpus(&inputs);

    let namespace = Namespace::new(bundle);
    let fetcher = make_fetcher(&namespace, resolve_from, base_url, delay)?;
    let opts = ReferenceOptions {
        language,
        namespace: &namespace,
        fetcher: fetcher.as_ref(),
    };

    let api = reference::aggregate(&corpus, &opts);
    write_reference(&api, title, language, out_file)
}

/// Download each sample archive and extract its sources under `out_dir`.
fn samples_stage(manifest: &Manifest, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let client = WebClient::new()?;
    let mut downloaded = 0;
    for sample in &manifest.samples {
        println!("  {}", sample.name);
        let url = sample.download_url(&manifest.samples_base_url);
        let data = match client.fetch_bytes(&url) {
            Ok(Some(data)) => data,
            Ok(None) => {
                log::warn!("not found: {}", url);
                continue;
            }
            Err(e) => {
                log::warn!("failed to download {}: {}", sample.name, e);
                continue;
            }
        };
        let dest = out_dir.join(&sample.name);
        match samples::extract_archive(&data, &dest) {
            Ok(count) => {
                println!("    extracted {} files to {}", count, dest.display());
                downloaded += 1;
            }
            Err(e) => log::warn!("failed to extract {}: {}", sample.name, e),
        }
    }
    println!("Downloaded {}/{} sample projects", downloaded, manifest.samples.len());
    Ok(())
}

/// Fetch community notes and the transcript for each session and write one
/// markdown file per session. Either part may be missing; the file is
/// written regardless.
fn wwdc_stage(manifest: &Manifest, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let client = WebClient::new()?;
    let total = manifest.wwdc.len();
    let mut downloaded = 0;
    for (index, session) in manifest.wwdc.iter().enumerate() {
        println!("  WWDC{}-{}: {}", session.year, session.id, session.title);
        let notes = fetch_optional(&client, &session.notes_url(&manifest.notes_base_url));
        let transcript = fetch_optional(&client, &session.video_url())
            .and_then(|html| transcript::extract_transcript(&html));

        let out_path = out_dir.join(session.output_name());
        fs::write(&out_path, session.render(notes.as_deref(), transcript.as_deref()))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        downloaded += 1;

        if index + 1 < total {
            std::thread::sleep(SESSION_DELAY);
        }
    }
    println!("Downloaded {}/{} sessions", downloaded, total);
    Ok(())
}

/// Generate the `README.md` index over a mirror directory, listing session
/// files, converted documents, sample projects and the fixed entry points.
fn write_index(manifest: &Manifest, root: &Path) -> Result<()> {
    let mut lines: Vec<String> = vec![
        format!("# {} Documentation", manifest.framework),
        String::new(),
        "Mirrored from the vendor documentation service for reference.".to_string(),
        String::new(),
        "**Note:** The mirrored content remains © its vendor and is included for development \
         reference only."
            .to_string(),
        String::new(),
        "## WWDC Sessions".to_string(),
        String::new(),
    ];

    for name in sorted_file_names(&root.join("wwdc"), "md")? {
        let stem = name.strip_suffix(".md").unwrap_or(&name);
        lines.push(format!("- [{}](wwdc/{})", stem, name));
    }

    lines.push(String::new());
    lines.push("## API Documentation".to_string());
    lines.push(String::new());
    let prefix = format!("{}_", manifest.framework.to_lowercase());
    for name in sorted_file_names(&root.join("markdown"), "md")? {
        let stem = name.strip_suffix(".md").unwrap_or(&name);
        let display = stem.strip_prefix(&prefix).unwrap_or(stem);
        lines.push(format!("- [{}](markdown/{})", display, name));
    }

    lines.push(String::new());
    lines.push("## Sample Projects".to_string());
    lines.push(String::new());
    for name in sorted_dir_names(&root.join("samples"))? {
        lines.push(format!("- [{}](samples/{}/)", name, name));
    }

    lines.extend([
        String::new(),
        "## Quick Reference".to_string(),
        String::new(),
        "- [**API.md**](API.md) - All API signatures in one file".to_string(),
        String::new(),
        "## Raw JSON".to_string(),
        String::new(),
        "Raw JSON documentation files are in [json/](json/).".to_string(),
        String::new(),
        "---".to_string(),
        String::new(),
        "Generated by `doccmark`".to_string(),
    ]);

    let out_path = root.join("README.md");
    fs::write(&out_path, lines.join("\n"))
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("Wrote {}", out_path.display());
    Ok(())
}

/// Full pipeline into `root`: raw JSON, markdown, samples, sessions, the
/// consolidated reference, then the index.
fn mirror(manifest: &Manifest, root: &Path, delay: Duration) -> Result<()> {
    println!(
        "Mirroring {} documentation to {}",
        manifest.framework,
        root.display()
    );
    fetch_stage(manifest, &root.join("json"), delay)?;
    convert_corpus(manifest, &root.join("json"), &root.join("markdown"))?;
    samples_stage(manifest, &root.join("samples"))?;
    wwdc_stage(manifest, &root.join("wwdc"))?;
    reference_corpus(manifest, &root.join("json"), &root.join("API.md"))?;
    write_index(manifest, root)?;
    println!("Done. Mirror written to {}", root.display());
    Ok(())
}

/// Convert every corpus document in the JSON mirror. Members are expanded
/// only for framework- and class-level pages.
fn convert_corpus(manifest: &Manifest, json_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let namespace = Namespace::new(&manifest.bundle());
    let fetcher = HttpFetcher::new(
        namespace.clone(),
        &manifest.base_url,
        Duration::from_millis(EXPAND_DELAY_MS),
    )?;

    let mut converted = 0;
    for path in &manifest.docs {
        let json_path = json_dir.join(fetch::doc_file_name(path));
        let doc = match read_document(&json_path) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", json_path.display(), e);
                continue;
            }
        };
        let expand = expands_members(path);
        let opts = RenderOptions {
            language: &manifest.language,
            namespace: &namespace,
            fetcher: &fetcher,
            expand,
        };
        let stem = file_stem(&json_path);
        println!("  {}{}", stem, if expand { " (expanding members)" } else { "" });
        let out_path = out_dir.join(format!("{}.md", stem));
        fs::write(&out_path, render::render_document(&doc, &stem, &opts))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        converted += 1;
    }
    println!("Converted {}/{} documents", converted, manifest.docs.len());
    Ok(())
}

/// Aggregate the JSON mirror into the consolidated reference file.
fn reference_corpus(manifest: &Manifest, json_dir: &Path, out_file: &Path) -> Result<()> {
    let files: Vec<PathBuf> = manifest
        .docs
        .iter()
        .map(|path| json_dir.join(fetch::doc_file_name(path)))
        .filter(|path| path.is_file())
        .collect();
    let corpus = load_corpus(&files);

    let namespace = Namespace::new(&manifest.bundle());
    let fetcher = HttpFetcher::new(
        namespace.clone(),
        &manifest.base_url,
        Duration::from_millis(AGGREGATE_DELAY_MS),
    )?;
    let opts = ReferenceOptions {
        language: &manifest.language,
        namespace: &namespace,
        fetcher: &fetcher,
    };

    let api = reference::aggregate(&corpus, &opts);
    write_reference(&api, &manifest.framework, &manifest.language, out_file)
}

fn write_reference(
    api: &reference::ApiReference,
    framework: &str,
    language: &str,
    out_file: &Path,
) -> Result<()> {
    if let Some(parent) = out_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(out_file, reference::render_reference(api, framework, language))
        .with_context(|| format!("failed to write {}", out_file.display()))?;
    println!("Aggregated {} symbols into {}", api.symbols.len(), out_file.display());
    Ok(())
}

/// Expanded members come from the mirror directory when one is given,
/// otherwise from the live service.
fn make_fetcher(
    namespace: &Namespace,
    resolve_from: Option<&Path>,
    base_url: &str,
    delay: Duration,
) -> Result<Box<dyn DocFetcher>> {
    match resolve_from {
        Some(dir) => Ok(Box::new(DirFetcher::new(namespace.clone(), dir))),
        None => Ok(Box::new(HttpFetcher::new(namespace.clone(), base_url, delay)?)),
    }
}

/// Warn-and-None on any retrieval failure; missing resources are also None.
fn fetch_optional(client: &WebClient, url: &str) -> Option<String> {
    match client.fetch_text(url) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("failed to fetch {}: {}", url, e);
            None
        }
    }
}

/// Members are expanded for framework- and class-level pages only, never
/// for deeper member pages.
fn expands_members(path: &str) -> bool {
    path.matches('/').count() < 2
}

/// Read (stem, document) pairs, warning and skipping unreadable files.
fn load_corpus(files: &[PathBuf]) -> Vec<(String, Document)> {
    let mut corpus = Vec::new();
    for path in files {
        match read_document(path) {
            Ok(doc) => corpus.push((file_stem(path), doc)),
            Err(e) => eprintln!("warning: skipping {}: {}", path.display(), e),
        }
    }
    corpus
}

fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = serde_json::from_str(&content)
        .with_context(|| format!("invalid document: {}", path.display()))?;
    Ok(doc)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Expand glob patterns into a list of real file paths. Bare directories
/// are scanned for `.json` documents (non-recursive).
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json") {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Names of `dir`'s files with the given extension, sorted; empty when the
/// directory does not exist.
fn sorted_file_names(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    if !dir.is_dir() {
        return Ok(names);
    }
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Names of `dir`'s subdirectories, sorted; empty when it does not exist.
fn sorted_dir_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    if !dir.is_dir() {
        return Ok(names);
    }
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_limited_to_shallow_paths() {
        assert!(expands_members("screencapturekit"));
        assert!(expands_members("screencapturekit/scstream"));
        assert!(!expands_members("screencapturekit/scstream/startCapture()"));
    }

    #[test]
    fn stem_drops_directory_and_extension() {
        assert_eq!(file_stem(Path::new("json/screencapturekit_scstream.json")),
            "screencapturekit_scstream");
    }

    #[test]
    fn index_lists_mirror_sections() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("wwdc")).unwrap();
        fs::create_dir_all(dir.path().join("markdown")).unwrap();
        fs::create_dir_all(dir.path().join("samples/SampleApp")).unwrap();
        fs::write(
            dir.path().join("wwdc/WWDC2022-10156-Meet-ScreenCaptureKit.md"),
            "x",
        )
        .unwrap();
        fs::write(dir.path().join("markdown/screencapturekit_scstream.md"), "x").unwrap();
        fs::write(dir.path().join("markdown/screencapturekit.md"), "x").unwrap();

        let manifest: Manifest = toml::from_str(r#"framework = "ScreenCaptureKit""#).unwrap();
        write_index(&manifest, dir.path()).unwrap();

        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.starts_with("# ScreenCaptureKit Documentation\n"));
        assert!(readme.contains(
            "- [WWDC2022-10156-Meet-ScreenCaptureKit](wwdc/WWDC2022-10156-Meet-ScreenCaptureKit.md)"
        ));
        assert!(readme.contains("- [scstream](markdown/screencapturekit_scstream.md)"));
        assert!(readme.contains("- [screencapturekit](markdown/screencapturekit.md)"));
        assert!(readme.contains("- [SampleApp](samples/SampleApp/)"));
        assert!(readme.contains("[**API.md**](API.md)"));
        assert!(readme.ends_with("Generated by `doccmark`"));
    }

    #[test]
    fn missing_mirror_dirs_make_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        let manifest: Manifest = toml::from_str(r#"framework = "ScreenCaptureKit""#).unwrap();
        write_index(&manifest, dir.path()).unwrap();
        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("## WWDC Sessions\n\n\n## API Documentation"));
    }
}
