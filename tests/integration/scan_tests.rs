use dupscan::duplicates::{DuplicateFinder, FinderError, ScanConfig};
use dupscan::scanner::THRESHOLD_FILE_SIZE;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn scan(root: &Path) -> ScanConfig {
    ScanConfig::new(vec![root.to_path_buf()]).with_parallelism(4)
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert!(result.groups.is_empty());
    assert_eq!(result.total_files(), 0);
    assert_eq!(result.duplicate_count, 0);
    assert_eq!(result.savings_bytes, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"content a").unwrap();
    fs::write(dir.path().join("b.txt"), b"content b").unwrap();
    fs::write(dir.path().join("c.txt"), b"content c").unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert!(result.groups.is_empty());
    assert_eq!(result.total_files(), 3);
    assert_eq!(result.hashed_files, 3);
}

#[test]
fn test_three_identical_ten_byte_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    for rel in ["a/1.txt", "a/2.txt", "b/1.txt"] {
        fs::write(dir.path().join(rel), b"0123456789").unwrap();
    }

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.groups.len(), 1);
    let group = &result.groups[0];
    assert_eq!(group.paths.len(), 3);
    assert_eq!(group.digest.extension, "txt");
    assert_eq!(group.digest.size, 10);
    assert!(group.digest.hash.starts_with('f'));
    assert_eq!(result.duplicate_count, 2);
    assert_eq!(result.savings_bytes, 20);
    assert_eq!(
        result.summary_line(),
        "Found 2 duplicates. A total of 20 B can be saved by removing them."
    );
}

#[test]
fn test_same_content_different_extension_not_grouped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.txt"), b"hello").unwrap();
    fs::write(dir.path().join("x.md"), b"hello").unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert!(result.groups.is_empty());
    assert_eq!(result.total_files(), 2);
}

#[test]
fn test_extension_comparison_ignores_case() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("photo.JPG"), b"pixels").unwrap();
    fs::write(dir.path().join("copy.jpg"), b"pixels").unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].digest.extension, "jpg");
}

fn write_large(path: &Path, len: usize) {
    let content: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
    File::create(path).unwrap().write_all(&content).unwrap();
}

#[test]
fn test_large_copy_grouped_in_fast_mode() {
    let dir = tempdir().unwrap();
    write_large(&dir.path().join("big.bin"), 1024 * 1024);
    fs::copy(dir.path().join("big.bin"), dir.path().join("big-copy.bin")).unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.groups.len(), 1);
    assert!(result.groups[0].digest.hash.starts_with('s'));
    assert_eq!(result.savings_bytes, 1024 * 1024);
}

#[test]
fn test_large_copy_grouped_in_thorough_mode() {
    let dir = tempdir().unwrap();
    write_large(&dir.path().join("big.bin"), 1024 * 1024);
    fs::copy(dir.path().join("big.bin"), dir.path().join("big-copy.bin")).unwrap();

    let result = DuplicateFinder::new(scan(dir.path()).with_thorough(true))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.groups.len(), 1);
    let hash = &result.groups[0].digest.hash;
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_thorough_mode_separates_files_sampling_cannot() {
    let dir = tempdir().unwrap();
    let size = 4 * THRESHOLD_FILE_SIZE as usize;
    let b: Vec<u8> = vec![7; size];
    let mut a = b.clone();
    // Outside every sampled region
    a[10_000] = 8;
    fs::write(dir.path().join("a.bin"), &a).unwrap();
    fs::write(dir.path().join("b.bin"), &b).unwrap();

    let fast = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();
    let thorough = DuplicateFinder::new(scan(dir.path()).with_thorough(true))
        .find_duplicates()
        .unwrap();

    assert_eq!(fast.groups.len(), 1);
    assert!(thorough.groups.is_empty());
}

#[test]
fn test_min_size_filters_small_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small1.txt"), b"tiny").unwrap();
    fs::write(dir.path().join("small2.txt"), b"tiny").unwrap();
    fs::write(dir.path().join("big1.txt"), vec![1u8; 5000]).unwrap();
    fs::write(dir.path().join("big2.txt"), vec![1u8; 5000]).unwrap();

    let result = DuplicateFinder::new(scan(dir.path()).with_min_size(4096))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].digest.size, 5000);
}

#[test]
fn test_exclusions_skip_files_and_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules").join("a.js"), b"dup").unwrap();
    fs::write(dir.path().join("b.js"), b"dup").unwrap();
    fs::write(dir.path().join(".DS_Store"), b"dup").unwrap();

    let exclusions = HashSet::from(["node_modules".to_string(), ".DS_Store".to_string()]);
    let result = DuplicateFinder::new(scan(dir.path()).with_exclusions(exclusions))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.total_files(), 1);
    assert!(result.groups.is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed_or_hashed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), b"data").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();

    let result = DuplicateFinder::new(scan(dir.path()))
        .find_duplicates()
        .unwrap();

    assert_eq!(result.total_files(), 1);
    assert!(result.groups.is_empty());
}

#[test]
fn test_group_order_is_deterministic() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        let content = format!("payload-{}", i % 10);
        fs::write(dir.path().join(format!("f{i:02}.dat")), content).unwrap();
    }

    let first = DuplicateFinder::new(scan(dir.path()).with_parallelism(8))
        .find_duplicates()
        .unwrap();
    let second = DuplicateFinder::new(scan(dir.path()).with_parallelism(1))
        .find_duplicates()
        .unwrap();

    assert_eq!(first.groups.len(), 10);
    assert_eq!(first.groups, second.groups);
}

#[test]
fn test_root_validation_errors() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let err = DuplicateFinder::new(ScanConfig::new(vec![file]))
        .find_duplicates()
        .unwrap_err();
    assert!(matches!(err, FinderError::NotADirectory(_)));

    let missing = PathBuf::from("/definitely/not/a/real/dir");
    let err = DuplicateFinder::new(ScanConfig::new(vec![missing]))
        .find_duplicates()
        .unwrap_err();
    assert!(matches!(err, FinderError::PathNotFound(_)));
}
