use dupscan::duplicates::{DuplicateFinder, ScanConfig};
use dupscan::scanner::{FileEntry, HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tempfile::tempdir;

#[test]
fn test_find_duplicates_from_files_continues_on_error() {
    let finder = DuplicateFinder::new(ScanConfig::default());
    // Files that don't exist trigger hashing errors
    let file1 = FileEntry::new(PathBuf::from("nonexistent_1.txt"), 100, SystemTime::now());
    let file2 = FileEntry::new(PathBuf::from("nonexistent_2.txt"), 100, SystemTime::now());

    let result = finder.find_duplicates_from_files(vec![file1, file2]);

    assert!(result.groups.is_empty());
    assert_eq!(result.errors.len(), 2);
    for err in result.errors.iter() {
        match err {
            ScanError::Hash(HashError::NotFound(_)) => {}
            _ => panic!("Expected NotFound HashError, got: {:?}", err),
        }
    }
    assert!(result.error().unwrap().to_string().starts_with("2 error(s)"));
}

#[test]
fn test_missing_file_does_not_hide_other_duplicates() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();

    let files = vec![
        FileEntry::new(a, 4, SystemTime::now()),
        FileEntry::new(dir.path().join("vanished.txt"), 4, SystemTime::now()),
        FileEntry::new(b, 4, SystemTime::now()),
    ];
    let result = DuplicateFinder::new(ScanConfig::default()).find_duplicates_from_files(files);

    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.hashed_files, 2);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), b"dup").unwrap();
    fs::write(dir.path().join("one.txt"), b"dup").unwrap();
    fs::write(dir.path().join("two.txt"), b"dup").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory
    let enforced = fs::read_dir(&locked).is_err();

    let result = DuplicateFinder::new(ScanConfig::new(vec![dir.path().to_path_buf()]))
        .find_duplicates()
        .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(result.groups.len(), 1);
    if enforced {
        assert_eq!(result.groups[0].paths.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            result.errors.iter().next(),
            Some(ScanError::PermissionDenied(p)) if p.ends_with("locked")
        ));
    } else {
        assert_eq!(result.groups[0].paths.len(), 3);
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let secret = dir.path().join("secret.txt");
    fs::write(&secret, b"dup").unwrap();
    fs::write(dir.path().join("open.txt"), b"dup").unwrap();
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
    let enforced = fs::File::open(&secret).is_err();

    let result = DuplicateFinder::new(ScanConfig::new(vec![dir.path().to_path_buf()]))
        .find_duplicates()
        .unwrap();

    fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(result.total_files(), 2);
    if enforced {
        assert!(result.groups.is_empty());
        assert!(matches!(
            result.errors.iter().next(),
            Some(ScanError::Hash(HashError::PermissionDenied(_)))
        ));
    } else {
        assert_eq!(result.groups.len(), 1);
    }
}
