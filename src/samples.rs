//! Sample-project archives: download addressing and selective extraction.
//!
//! Only source-relevant entries are kept. Archive metadata folders, hidden
//! files and project plumbing are dropped, and the archive's top-level
//! directory is stripped so sources land directly under the project dir.

use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// File extensions worth extracting from a sample archive.
const SOURCE_EXTENSIONS: [&str; 8] = ["swift", "h", "m", "mm", "metal", "md", "txt", "plist"];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One downloadable sample project.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleProject {
    pub name: String,
    /// Asset-host path component identifying the published build.
    pub hash: String,
    pub filename: String,
}

impl SampleProject {
    pub fn download_url(&self, base: &str) -> String {
        format!("{}/{}/{}", base.trim_end_matches('/'), self.hash, self.filename)
    }
}

/// Extract the source-relevant entries of a zip archive under `dest`.
/// Entries whose names are absolute or would traverse outside `dest` are
/// skipped. Returns the number of files written.
pub fn extract_archive(data: &[u8], dest: &Path) -> Result<usize, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        // Entry names are untrusted; `name()` must never reach the
        // filesystem directly.
        let name = match entry.enclosed_name() {
            Some(name) => name,
            None => continue,
        };
        if !wanted(&name) {
            continue;
        }
        let relative = match stripped_path(&name) {
            Some(relative) => relative,
            None => continue,
        };
        let out_path = dest.join(relative);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&out_path)?;
        io::copy(&mut entry, &mut file)?;
        extracted += 1;
    }
    Ok(extracted)
}

/// Keep an entry when every path component is a plain name that is neither
/// archive metadata nor hidden, and its extension is on the source
/// allow-list.
fn wanted(path: &Path) -> bool {
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_string_lossy();
                if part == "__MACOSX" || part.starts_with('.') {
                    return false;
                }
            }
            Component::CurDir => {}
            _ => return false,
        }
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Entry path without the archive's top-level directory; single-component
/// entries stay as they are. Only plain name components survive, so the
/// result never leaves the directory it is joined to.
fn stripped_path(path: &Path) -> Option<PathBuf> {
    let mut parts = path.components().filter_map(|component| match component {
        Component::Normal(part) => Some(part),
        _ => None,
    });
    let top = parts.next()?;
    let rest: PathBuf = parts.collect();
    if rest.as_os_str().is_empty() {
        Some(PathBuf::from(top))
    } else {
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, body) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn download_url_joins_base_hash_filename() {
        let sample = SampleProject {
            name: "CapturingScreenContentInMacOS".to_string(),
            hash: "9db8b3fae777".to_string(),
            filename: "CapturingScreenContentInMacOS.zip".to_string(),
        };
        assert_eq!(
            sample.download_url("https://example.com/published/"),
            "https://example.com/published/9db8b3fae777/CapturingScreenContentInMacOS.zip"
        );
    }

    #[test]
    fn extracts_source_files_without_top_directory() {
        let data = archive(&[
            ("Project/Sources/Main.swift", "print(\"hi\")"),
            ("Project/README.md", "# Sample"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let count = extract_archive(&data, dir.path()).unwrap();
        assert_eq!(count, 2);
        let main = fs::read_to_string(dir.path().join("Sources/Main.swift")).unwrap();
        assert_eq!(main, "print(\"hi\")");
        assert!(dir.path().join("README.md").exists());
        assert!(!dir.path().join("Project").exists());
    }

    #[test]
    fn single_component_entry_kept_as_is() {
        let data = archive(&[("loose.md", "x")]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 1);
        assert!(dir.path().join("loose.md").exists());
    }

    #[test]
    fn skips_archive_metadata_and_hidden_files() {
        let data = archive(&[
            ("__MACOSX/Project/._Main.swift", "junk"),
            ("Project/.build/Generated.swift", "junk"),
            ("Project/.DS_Store", "junk"),
            ("Project/Kept.swift", "ok"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 1);
        assert!(dir.path().join("Kept.swift").exists());
    }

    #[test]
    fn skips_hidden_entries_at_the_top_level() {
        let data = archive(&[
            (".build/Sources/Generated.swift", "junk"),
            (".hidden.swift", "junk"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 0);
    }

    #[test]
    fn doubled_slash_entry_stays_under_destination() {
        let data = archive(&[("Project//tmp/outside/Main.swift", "contained")]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 1);
        assert!(dir.path().join("tmp/outside/Main.swift").is_file());
    }

    #[test]
    fn absolute_entry_name_is_skipped() {
        let data = archive(&[("/tmp/outside/Main.swift", "junk")]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 0);
    }

    #[test]
    fn parent_traversal_entry_is_skipped() {
        let data = archive(&[
            ("Project/../Sibling.swift", "junk"),
            ("Project/../../Outside.swift", "junk"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 0);
    }

    #[test]
    fn skips_disallowed_extensions() {
        let data = archive(&[
            ("Project/App.xcodeproj/project.pbxproj", "junk"),
            ("Project/icon.png", "junk"),
            ("Project/no_extension", "junk"),
        ]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 0);
    }

    #[test]
    fn extension_check_ignores_case() {
        let data = archive(&[("Project/Notes.MD", "x")]);
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract_archive(&data, dir.path()).unwrap(), 1);
    }

    #[test]
    fn invalid_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            extract_archive(b"not a zip", dir.path()),
            Err(ExtractError::Archive(_))
        ));
    }
}
