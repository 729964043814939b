use dupscan::duplicates::{DuplicateFinder, ScanConfig, ScanResult};
use dupscan::output::csv::format_modified;
use dupscan::output::{OutputMode, ReportWriter};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn scan_with_duplicates() -> (TempDir, ScanResult) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), b"0123456789").unwrap();
    fs::write(dir.path().join("a.txt"), b"0123456789").unwrap();
    set_file_mtime(dir.path().join("a.txt"), FileTime::from_unix_time(1_600_000_000, 0)).unwrap();
    set_file_mtime(dir.path().join("b.txt"), FileTime::from_unix_time(1_600_000_000, 0)).unwrap();

    let result = DuplicateFinder::new(ScanConfig::new(vec![dir.path().to_path_buf()]))
        .find_duplicates()
        .unwrap();
    (dir, result)
}

fn write_report(mode: OutputMode, out: &Path, result: &ScanResult) -> String {
    let writer = ReportWriter::create_in(mode, "240101_000000", out.to_path_buf()).unwrap();
    writer.write(result).unwrap();
    fs::read_to_string(out).unwrap()
}

#[test]
fn test_text_report() {
    let (dir, result) = scan_with_duplicates();
    let out = tempdir().unwrap();

    let text = write_report(OutputMode::Text, &out.path().join("r.txt"), &result);
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("txt/f"));
    assert!(lines[0].ends_with("/10 B: 1 duplicate(s)"));
    assert_eq!(lines[1], format!("\t{}", dir.path().join("a.txt").display()));
    assert_eq!(lines[2], format!("\t{}", dir.path().join("b.txt").display()));
}

#[test]
fn test_csv_report_uses_scan_time_metadata() {
    let (dir, result) = scan_with_duplicates();
    let out = tempdir().unwrap();

    let csv = write_report(OutputMode::Csv, &out.path().join("r.csv"), &result);
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["file hash", "file size", "last modified", "file path"]
    );

    let rows: Vec<_> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    let expected_time =
        format_modified(std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_600_000_000));
    for row in &rows {
        assert_eq!(&row[0], result.groups[0].digest.hash.as_str());
        assert_eq!(&row[1], "10");
        assert_eq!(&row[2], expected_time.as_str());
        assert!(Path::new(&row[3]).starts_with(dir.path()));
    }
}

#[test]
fn test_json_report() {
    let (_dir, result) = scan_with_duplicates();
    let out = tempdir().unwrap();

    let json = write_report(OutputMode::Json, &out.path().join("r.json"), &result);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let groups = parsed.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["extension"], "txt");
    assert_eq!(groups[0]["size"], 10);
    assert_eq!(groups[0]["paths"].as_array().unwrap().len(), 2);
}

#[test]
fn test_report_file_is_truncated_on_write() {
    let (_dir, result) = scan_with_duplicates();
    let out = tempdir().unwrap();
    let path = out.path().join("r.txt");
    fs::write(&path, "stale content that is longer than the report itself ".repeat(50)).unwrap();

    let text = write_report(OutputMode::Text, &path, &result);

    assert!(!text.contains("stale"));
}
