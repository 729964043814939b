use dupscan::actions::{plan_removal, remove_duplicates};
use dupscan::duplicates::{DuplicateFinder, DuplicateGroup, ScanConfig};
use dupscan::scanner::FileDigest;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_removal_keeps_lexicographically_first_path() {
    let group = DuplicateGroup::new(
        FileDigest::new("txt", 10, "f0"),
        vec![PathBuf::from("/a/2.txt"), PathBuf::from("/a/1.txt")],
    );

    let plans = plan_removal(&[group]);

    assert_eq!(plans[0].keep, PathBuf::from("/a/1.txt"));
    assert_eq!(plans[0].delete, vec![PathBuf::from("/a/2.txt")]);
}

#[test]
fn test_scan_then_remove() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    fs::create_dir(&a).unwrap();
    fs::write(a.join("2.txt"), b"0123456789").unwrap();
    fs::write(a.join("1.txt"), b"0123456789").unwrap();
    fs::write(a.join("other.txt"), b"unrelated!").unwrap();

    let result = DuplicateFinder::new(ScanConfig::new(vec![dir.path().to_path_buf()]))
        .find_duplicates()
        .unwrap();
    let report = remove_duplicates(&result.groups).unwrap();

    assert!(a.join("1.txt").exists());
    assert!(!a.join("2.txt").exists());
    assert!(a.join("other.txt").exists());
    assert_eq!(report.removed_count(), 1);
    assert_eq!(report.bytes_freed, 10);

    // A second scan finds nothing left to remove
    let rescan = DuplicateFinder::new(ScanConfig::new(vec![dir.path().to_path_buf()]))
        .find_duplicates()
        .unwrap();
    assert!(rescan.groups.is_empty());
}

#[test]
fn test_removal_failure_is_aggregated() {
    let dir = tempdir().unwrap();
    let keep = dir.path().join("a.txt");
    fs::write(&keep, b"x").unwrap();
    let groups = vec![
        DuplicateGroup::new(
            FileDigest::new("txt", 1, "f1"),
            vec![keep.clone(), dir.path().join("b-missing.txt")],
        ),
        DuplicateGroup::new(
            FileDigest::new("txt", 1, "f2"),
            vec![dir.path().join("c.txt"), dir.path().join("d-missing.txt")],
        ),
    ];

    let err = remove_duplicates(&groups).unwrap_err();

    assert_eq!(err.errors.len(), 2);
    assert!(keep.exists());
    assert_eq!(err.report.kept.len(), 2);
}
