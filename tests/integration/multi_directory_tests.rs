use dupscan::duplicates::{DuplicateFinder, FinderError, ScanConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_scan_two_non_overlapping_directories() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("a.txt"), b"dup").unwrap();
    fs::write(dir2.path().join("b.txt"), b"dup").unwrap();

    let config = ScanConfig::new(vec![dir1.path().to_path_buf(), dir2.path().to_path_buf()]);
    let result = DuplicateFinder::new(config).find_duplicates().unwrap();

    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].paths.len(), 2);
    // Roots are walked in the order given
    assert!(result.groups[0].paths[0].starts_with(dir1.path()));
    assert_eq!(result.total_files(), 2);
}

#[test]
fn test_scan_overlapping_directories_counts_each_file_once() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("a.txt"), b"content").unwrap();
    fs::write(sub.join("b.txt"), b"content").unwrap();

    let config = ScanConfig::new(vec![dir.path().to_path_buf(), sub.clone()]);
    let result = DuplicateFinder::new(config).find_duplicates().unwrap();

    assert_eq!(result.total_files(), 2);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].paths.len(), 2);
    assert_eq!(result.duplicate_count, 1);
}

#[test]
fn test_same_directory_twice() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), b"content").unwrap();

    let config = ScanConfig::new(vec![dir.path().to_path_buf(), dir.path().to_path_buf()]);
    let result = DuplicateFinder::new(config).find_duplicates().unwrap();

    assert_eq!(result.total_files(), 1);
    assert!(result.groups.is_empty());
}

#[test]
fn test_one_bad_root_fails_validation() {
    let good = tempdir().unwrap();
    let missing = good.path().join("missing");

    let config = ScanConfig::new(vec![good.path().to_path_buf(), missing]);
    let err = DuplicateFinder::new(config).find_duplicates().unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(_)));
}
