use fileproc::collector::{sample, FileCollector};
use fileproc::config::SortMode;
use fileproc::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(root: &Path, name: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap();
}

fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in ["img10.png", "img2.png", "img1.png", "notes.txt", "sub/img3.png", "sub/deep/img0.png"] {
        touch(temp_dir.path(), name);
    }
    temp_dir
}

#[test]
fn test_missing_input_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");
    assert!(matches!(
        FileCollector::new(&missing, None, false, SortMode::Human),
        Err(Error::InputPathNotFound { path }) if path == missing
    ));
}

#[test]
fn test_file_is_not_an_input_folder() {
    let temp_dir = fixture();
    let file = temp_dir.path().join("notes.txt");
    assert!(matches!(
        FileCollector::new(&file, None, false, SortMode::Human),
        Err(Error::InputPathNotFound { .. })
    ));
}

#[test]
fn test_invalid_filter() {
    let temp_dir = fixture();
    assert!(matches!(
        FileCollector::new(temp_dir.path(), Some("[a-"), false, SortMode::Human),
        Err(Error::InvalidFilterPattern { .. })
    ));
}

#[test]
fn test_non_recursive_lists_direct_files_only() {
    let temp_dir = fixture();
    let collector = FileCollector::new(temp_dir.path(), None, false, SortMode::Human).unwrap();
    assert_eq!(
        names(temp_dir.path(), &collector.files()),
        vec!["img1.png", "img2.png", "img10.png", "notes.txt"]
    );
}

#[test]
fn test_recursive_walks_subfolders() {
    let temp_dir = fixture();
    let collector = FileCollector::new(temp_dir.path(), Some(r"\.png$"), true, SortMode::Human).unwrap();
    assert_eq!(
        names(temp_dir.path(), &collector.files()),
        vec!["sub/deep/img0.png", "img1.png", "img2.png", "sub/img3.png", "img10.png"]
    );
}

#[test]
fn test_filter_searches_file_names() {
    let temp_dir = fixture();
    // A substring match, not a full match, against the name only.
    let collector = FileCollector::new(temp_dir.path(), Some("g1"), true, SortMode::Lexicographical).unwrap();
    assert_eq!(names(temp_dir.path(), &collector.files()), vec!["img1.png", "img10.png"]);

    let collector = FileCollector::new(temp_dir.path(), Some("sub"), true, SortMode::Human).unwrap();
    assert!(collector.files().is_empty());
}

#[test]
fn test_unsorted_mode_returns_every_file() {
    let temp_dir = fixture();
    let collector = FileCollector::new(temp_dir.path(), None, true, SortMode::None).unwrap();
    let mut found = names(temp_dir.path(), &collector.files());
    found.sort();
    assert_eq!(
        found,
        vec!["img1.png", "img10.png", "img2.png", "notes.txt", "sub/deep/img0.png", "sub/img3.png"]
    );
}

#[test]
fn test_sampling_after_sorting() {
    let temp_dir = fixture();
    let collector = FileCollector::new(temp_dir.path(), Some(r"\.png$"), true, SortMode::Human).unwrap();
    let kept = sample(collector.files(), 2, 100).unwrap();

    let kept_names: Vec<String> = kept
        .iter()
        .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(kept_names, vec!["img0.png", "img2.png", "img10.png"]);
    assert_eq!(kept.iter().map(|c| c.counter).collect::<Vec<_>>(), vec![100, 102, 104]);
}
