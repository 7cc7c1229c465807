use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doccmark")))
}

fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn fixture_path(name: &str) -> String {
    format!("{}/{}", fixtures_dir(), name)
}

// -- convert --

#[test]
fn convert_produces_markdown() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("convert")
        .arg(fixture_path("scstream.json"))
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 1/1 documents"));

    let output = std::fs::read_to_string(dir.path().join("scstream.md")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("scstream.expected.md")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn convert_expands_members_from_mirror() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("convert")
        .arg(fixture_path("scstream.json"))
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--expand")
        .args(["--resolve-from", &fixtures_dir()])
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("scstream.md")).unwrap();
    // The member summary lands between the abstract and the next entry.
    assert!(output.contains(
        "#### startCapture(completionHandler:)\n\n\
         Starts the stream with a completion handler.\n\n\
         ```swift\nfunc startCapture(completionHandler: ((any Error)?) -> Void)\n```\n\
         Starts the stream and begins delivering sample buffers.\n\n\
         #### AVPlayer"
    ));
}

#[test]
fn convert_expands_glob_patterns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("convert")
        .arg(format!("{}/scstream*.json", fixtures_dir()))
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2/2 documents"));

    assert!(dir.path().join("scstream.md").exists());
    assert!(dir.path().join("scstreamconfiguration.md").exists());
}

#[test]
fn convert_accepts_directory_input() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("convert")
        .arg(fixtures_dir())
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 6/6 documents"));

    assert!(dir.path().join("scstream.md").exists());
    assert!(dir.path().join("capturing_screen_content.md").exists());
}

#[test]
fn convert_missing_pattern_warns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("convert")
        .arg("no-such-file.json")
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 0/0 documents"))
        .stderr(predicate::str::contains("no files matched"));
}

#[test]
fn convert_skips_invalid_json() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".json").unwrap();
    input.write_all(b"not json").unwrap();

    cmd()
        .arg("convert")
        .arg(input.path().to_str().unwrap())
        .arg(fixture_path("scstream.json"))
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 1/2 documents"))
        .stderr(predicate::str::contains("warning: skipping"));

    assert!(dir.path().join("scstream.md").exists());
}

#[test]
fn convert_requires_files() {
    cmd()
        .arg("convert")
        .args(["-o", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments"));
}

// -- reference --

#[test]
fn reference_aggregates_symbols() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("API.md");

    cmd()
        .arg("reference")
        .arg(fixture_path("scstream.json"))
        .arg(fixture_path("scstreamconfiguration.json"))
        .arg(fixture_path("capturing_screen_content.json"))
        .args(["-o", out.to_str().unwrap()])
        .args(["--resolve-from", &fixtures_dir()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aggregated 2 symbols"));

    let output = std::fs::read_to_string(&out).unwrap();
    assert!(output.starts_with("# ScreenCaptureKit API Reference\n"));
    assert!(output.contains(
        "## Table of Contents\n\n\
         - [SCStream](#scstream)\n\
         - [SCStreamConfiguration](#scstreamconfiguration)\n"
    ));
    assert!(output.contains(
        "### Starting and stopping a stream\n\n\
         ```swift\nfunc startCapture(completionHandler: ((any Error)?) -> Void)\n```\n"
    ));
    assert!(output.contains("### Dimensions\n\n```swift\nvar width: Int\nvar height: Int\n```\n"));
    // Articles carry no API surface.
    assert!(!output.contains("Capturing screen content in macOS"));
}

#[test]
fn reference_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("API.md");

    cmd()
        .arg("reference")
        .arg(fixture_path("scstreamconfiguration.json"))
        .args(["-o", out.to_str().unwrap()])
        .args(["--resolve-from", &fixtures_dir()])
        .assert()
        .success();

    assert!(out.exists());
}

// -- index --

#[test]
fn index_writes_readme() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("markdown")).unwrap();
    std::fs::create_dir_all(dir.path().join("samples/CaptureSample")).unwrap();
    std::fs::write(dir.path().join("markdown/screencapturekit_scstream.md"), "x").unwrap();

    let mut manifest = NamedTempFile::with_suffix(".toml").unwrap();
    manifest
        .write_all(b"framework = \"ScreenCaptureKit\"\n")
        .unwrap();

    cmd()
        .arg("index")
        .args(["-m", manifest.path().to_str().unwrap()])
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success();

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# ScreenCaptureKit Documentation\n"));
    assert!(readme.contains("- [scstream](markdown/screencapturekit_scstream.md)"));
    assert!(readme.contains("- [CaptureSample](samples/CaptureSample/)"));
}

#[test]
fn missing_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();

    cmd()
        .arg("index")
        .args(["-m", dir.path().join("absent.toml").to_str().unwrap()])
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn unknown_manifest_key_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut manifest = NamedTempFile::with_suffix(".toml").unwrap();
    manifest
        .write_all(b"framework = \"ScreenCaptureKit\"\nbogus = 1\n")
        .unwrap();

    cmd()
        .arg("index")
        .args(["-m", manifest.path().to_str().unwrap()])
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid manifest"));
}
