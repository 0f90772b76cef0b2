//! Integration tests for pathtree


use assert_cmd::Command;
use harness::{TestDir, index_into, run_pathtree, run_pathtree_status, write_tree};
use pathtree::{BuilderConfig, TreeBuilder, TreeDocument, find_node};
use predicates::prelude::*;

fn fixture() -> TestDir {
    let dir = TestDir::new();
    dir.add_sized_file("test_a.txt", 12);
    dir.add_sized_file("notes.md", 3);
    dir.add_sized_file("test_dir/test_b.txt", 2048);
    dir.add_sized_file("test_dir/deeper/test_c.txt", 5);
    dir.add_dir("test_empty");
    dir
}

#[test]
fn test_index_then_search_files() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, stderr, success) = run_pathtree(
        out.path(),
        &["search", tree.to_str().unwrap(), &root, "test_*"],
    );
    assert!(success, "search should succeed: {}", stderr);
    assert!(stdout.contains("Matching Files:"), "{}", stdout);
    assert!(
        stdout.contains(&format!(
            "File: {}, Size: 12",
            source.indexed_path("test_a.txt")
        )),
        "{}",
        stdout
    );
    assert!(stdout.contains(&source.indexed_path("test_dir/test_b.txt")));
    assert!(stdout.contains(&source.indexed_path("test_dir/deeper/test_c.txt")));
    assert!(!stdout.contains("notes.md"));
    assert!(!stdout.contains("Directory:"));
}

#[test]
fn test_search_directories_and_both() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &[
            "search",
            tree.to_str().unwrap(),
            &root,
            "test_*",
            "--for",
            "directories",
        ],
    );
    assert!(success);
    assert!(stdout.contains(&format!("Directory: {},", source.indexed_path("test_dir"))));
    assert!(stdout.contains(&source.indexed_path("test_empty")));
    assert!(!stdout.contains("File:"));

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &["search", tree.to_str().unwrap(), &root, "test_*", "--for", "both"],
    );
    assert!(success);
    let dirs_at = stdout.find("Matching Directories:").unwrap();
    let files_at = stdout.find("Matching Files:").unwrap();
    assert!(dirs_at < files_at, "directories are listed first: {}", stdout);
}

#[test]
fn test_regex_is_prefix_match() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &[
            "search",
            tree.to_str().unwrap(),
            &root,
            r"test_\w",
            "--syntax",
            "regex",
        ],
    );
    assert!(success);
    assert!(stdout.contains("test_a.txt"));
    assert!(stdout.contains("test_b.txt"));
    assert!(!stdout.contains("notes.md"));
}

#[test]
fn test_ignore_case() {
    let source = TestDir::new();
    source.add_file("README.TXT", "x");
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, _stderr, _success) =
        run_pathtree(out.path(), &["search", tree.to_str().unwrap(), &root, "readme*"]);
    assert!(stdout.contains("No matching files found."), "{}", stdout);

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &["search", tree.to_str().unwrap(), &root, "readme*", "-i"],
    );
    assert!(success);
    assert!(stdout.contains("README.TXT"));
}

#[test]
fn test_level_limits_depth() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &["search", tree.to_str().unwrap(), &root, "test_*", "-L", "0"],
    );
    assert!(success);
    assert!(stdout.contains("test_a.txt"));
    assert!(!stdout.contains("test_b.txt"));

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &["search", tree.to_str().unwrap(), &root, "test_*", "-L", "1"],
    );
    assert!(success);
    assert!(stdout.contains("test_b.txt"));
    assert!(!stdout.contains("test_c.txt"));
}

#[test]
fn test_larger_than_filters_files() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &[
            "search",
            tree.to_str().unwrap(),
            &root,
            "*",
            "--larger-than",
            "1KB",
        ],
    );
    assert!(success);
    assert!(stdout.contains("test_b.txt"));
    assert!(!stdout.contains("test_a.txt"));
    assert!(!stdout.contains("notes.md"));
}

#[test]
fn test_size_filters_conflict() {
    let out = TestDir::new();
    Command::cargo_bin("pathtree")
        .unwrap()
        .current_dir(out.path())
        .args([
            "search",
            "tree.json",
            "/",
            "*",
            "--larger-than",
            "1KB",
            "--size-label",
            "1KB",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_lookup_miss_prints_empty_report_and_fails() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let missing = source.indexed_path("no_such_dir");

    let (stdout, stderr, code) = run_pathtree_status(
        out.path(),
        &["search", tree.to_str().unwrap(), &missing, "*"],
    );
    assert_eq!(code, Some(1));
    assert!(stdout.contains("No matching files found."), "{}", stdout);
    assert!(
        stderr.contains("no matching node found"),
        "miss should be logged: {}",
        stderr
    );
}

#[test]
fn test_missing_tree_file() {
    let out = TestDir::new();
    let (stdout, stderr, code) =
        run_pathtree_status(out.path(), &["search", "absent.json", "/dev", "*"]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains("No matching files found."));
    assert!(stderr.contains("was not found"), "{}", stderr);
}

#[test]
fn test_invalid_regex_is_an_error() {
    let out = TestDir::new();
    Command::cargo_bin("pathtree")
        .unwrap()
        .current_dir(out.path())
        .args(["search", "tree.json", "/dev", "(unclosed", "--syntax", "regex"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("pathtree: "));
}

#[test]
fn test_json_output_and_report_file() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);
    let root = source.indexed_path("");
    let report = out.path().join("reports/result.json");

    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &[
            "search",
            tree.to_str().unwrap(),
            &root,
            "test_a*",
            "--json",
            "-o",
            report.to_str().unwrap(),
        ],
    );
    assert!(success);

    let printed: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(printed, saved);

    let files = printed["matching_files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0][0], source.indexed_path("test_a.txt").as_str());
    assert_eq!(files[0][1], 12);
    assert!(printed["matching_directories"].as_array().unwrap().is_empty());
}

#[test]
fn test_index_to_stdout() {
    let source = fixture();
    let root = source.canonical_path();

    let (stdout, _stderr, success) =
        run_pathtree(source.path(), &["index", root.to_str().unwrap(), "--compact"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        value["devices"]["absolute_path"],
        source.indexed_path("").as_str()
    );
    assert!(value["devices"]["test_dir"]["deeper"].is_object());
}

#[test]
fn test_index_ignore_patterns() {
    let source = fixture();
    let out = TestDir::new();
    let tree = out.path().join("tree.json");
    let root = source.canonical_path();

    let (_stdout, _stderr, success) = run_pathtree(
        out.path(),
        &[
            "index",
            root.to_str().unwrap(),
            "-o",
            tree.to_str().unwrap(),
            "-I",
            "*.md",
            "-I",
            "deeper",
        ],
    );
    assert!(success);

    let document = TreeDocument::load(&tree).unwrap();
    let devices = document.devices.unwrap();
    assert!(devices.files.iter().all(|f| f.name != "notes.md"));
    assert!(devices.child("test_dir").unwrap().child("deeper").is_none());
}

#[test]
fn test_index_missing_directory_fails() {
    let out = TestDir::new();
    let missing = out.path().join("nope");
    let (_stdout, stderr, code) =
        run_pathtree_status(out.path(), &["index", missing.to_str().unwrap()]);
    assert_eq!(code, Some(1));
    assert!(stderr.starts_with("pathtree: "), "{}", stderr);
}

#[test]
fn test_saved_document_round_trips() {
    let source = fixture();
    let built = TreeBuilder::new(BuilderConfig::default())
        .build(source.path())
        .unwrap();
    let document = TreeDocument::new(built.root);

    let out = TestDir::new();
    let path = out.path().join("nested/tree.json");
    document.save(&path, true).unwrap();

    let loaded = TreeDocument::load(&path).unwrap();
    assert_eq!(loaded, document);

    let original = document.devices.as_ref().unwrap();
    let reloaded = loaded.devices.as_ref().unwrap();
    let root = source.indexed_path("");
    assert_eq!(find_node(reloaded, &root), Some(original));

    let sub = source.indexed_path("test_dir");
    assert_eq!(find_node(reloaded, &sub), find_node(original, &sub));
    assert!(find_node(reloaded, &sub).is_some());
}

#[test]
fn test_stats_command() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);

    let (stdout, _stderr, success) =
        run_pathtree(out.path(), &["stats", tree.to_str().unwrap(), "--json"]);
    assert!(success);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["files"], 4);
    assert_eq!(stats["total_bytes"], 12 + 3 + 2048 + 5);

    let sub = source.indexed_path("test_dir");
    let (stdout, _stderr, success) = run_pathtree(
        out.path(),
        &["stats", tree.to_str().unwrap(), "--search-path", &sub, "--json"],
    );
    assert!(success);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["files"], 2);
    assert_eq!(stats["root"], sub.as_str());

    let (stdout, _stderr, success) = run_pathtree(out.path(), &["stats", tree.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("Tree Statistics:"));
    assert!(stdout.contains(".txt"));
}

#[test]
fn test_check_command() {
    let source = fixture();
    let out = TestDir::new();
    let tree = index_into(&source, &out);

    Command::cargo_bin("pathtree")
        .unwrap()
        .current_dir(out.path())
        .args(["check", tree.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree is consistent"));

    let broken = TestDir::new();
    let path = write_tree(
        &broken,
        r#"{"devices": {"absolute_path": "/d", "files": [], "directories": [["gone", 0]]}}"#,
    );
    Command::cargo_bin("pathtree")
        .unwrap()
        .current_dir(broken.path())
        .args(["check", path.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("directory 'gone' has no nested node"));
}
