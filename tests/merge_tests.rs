use filemerge::errors::MergeError;
use filemerge::merge::{BasicFileMerger, FileMerger};
use filemerge::{list_files, merge_files, FileEntry, IgnorePatterns, MergerConfig};
use std::fs;
use tempfile::tempdir;
use tracing_test::traced_test;

#[test]
fn test_single_file_round_trip() -> Result<(), MergeError> {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let content: &[u8] = b"line one\r\nline two\n\xff\xfe binary tail";
    fs::write(project.path().join("data.bin"), content).unwrap();

    let output = out_dir.path().join("data.txt");
    let config = MergerConfig::new(project.path()).with_output(&output);
    let report = merge_files(config, &[FileEntry::new("data.bin")])?;

    let merged = fs::read(&output).unwrap();
    let header = b"// data.bin\n";
    assert!(merged.starts_with(header));
    assert!(merged.ends_with(b"\n\n"));
    assert_eq!(&merged[header.len()..merged.len() - 2], content);

    assert_eq!(report.files_written, 1);
    assert!(report.failed.is_empty());
    assert_eq!(report.bytes_written, merged.len() as u64);
    Ok(())
}

#[test]
fn test_blocks_follow_selection_order() -> Result<(), MergeError> {
    let project = tempdir().unwrap();
    fs::create_dir(project.path().join("src")).unwrap();
    fs::write(project.path().join("a.txt"), "alpha").unwrap();
    fs::write(project.path().join("src/b.rs"), "fn b() {}\n").unwrap();

    let merger = BasicFileMerger::new(MergerConfig::new(project.path()));
    let mut buffer = Vec::new();
    let selection = vec![
        FileEntry::new("src/b.rs"),
        FileEntry::new("a.txt"),
        FileEntry::new("src/b.rs"),
    ];
    let report = merger.write_to(&selection, &mut buffer)?;

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "// src/b.rs\nfn b() {}\n\n\n// a.txt\nalpha\n\n// src/b.rs\nfn b() {}\n\n\n"
    );
    assert_eq!(report.files_written, 3);
    Ok(())
}

#[test]
#[traced_test]
fn test_file_deleted_after_listing_is_annotated() -> Result<(), MergeError> {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(project.path().join("keep.txt"), "kept").unwrap();
    fs::write(project.path().join("gone.txt"), "gone").unwrap();

    let files = list_files(project.path(), &IgnorePatterns::new(Vec::new()))?;
    assert_eq!(files, vec!["gone.txt", "keep.txt"]);
    fs::remove_file(project.path().join("gone.txt")).unwrap();

    let output = out_dir.path().join("merged.txt");
    let merger = BasicFileMerger::new(MergerConfig::new(project.path()).with_output(&output));
    let report = merger.merge(&files)?;

    let merged = fs::read_to_string(&output).unwrap();
    assert!(merged.starts_with("// gone.txt\n[Error reading gone.txt: "));
    assert!(merged.ends_with("// keep.txt\nkept\n\n"));
    assert_eq!(report.files_written, 1);
    assert_eq!(report.failed, vec!["gone.txt"]);
    assert!(logs_contain("Failed to read file gone.txt"));
    Ok(())
}

#[test]
fn test_uncreatable_destination_is_an_error() {
    let project = tempdir().unwrap();
    fs::write(project.path().join("a.txt"), "a").unwrap();

    let output = project.path().join("missing-dir").join("data.txt");
    let config = MergerConfig::new(project.path()).with_output(&output);
    let result = merge_files(config, &[FileEntry::new("a.txt")]);
    assert!(
        matches!(result, Err(MergeError::OutputError(_, _))),
        "Expected OutputError, got {:?}",
        result
    );
}

#[test]
fn test_existing_output_is_truncated() -> Result<(), MergeError> {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(project.path().join("a.txt"), "a").unwrap();
    let output = out_dir.path().join("data.txt");
    fs::write(&output, "stale content that is much longer than the new output").unwrap();

    merge_files(
        MergerConfig::new(project.path()).with_output(&output),
        &[FileEntry::new("a.txt")],
    )?;
    assert_eq!(fs::read_to_string(&output).unwrap(), "// a.txt\na\n\n");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_backslash_file_name_merges_its_content() -> Result<(), MergeError> {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(project.path().join("a\\b.txt"), "payload").unwrap();

    let files = list_files(project.path(), &IgnorePatterns::new(Vec::new()))?;
    let output = out_dir.path().join("data.txt");
    let report = merge_files(MergerConfig::new(project.path()).with_output(&output), &files)?;

    assert_eq!(fs::read_to_string(&output).unwrap(), "// a\\b.txt\npayload\n\n");
    assert!(report.failed.is_empty());
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_name_merges_its_content() -> Result<(), MergeError> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    fs::write(project.path().join(name), "latin-1 name").unwrap();

    let files = list_files(project.path(), &IgnorePatterns::new(Vec::new()))?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path.as_os_str(), name);
    assert_eq!(files[0].display, "caf\u{FFFD}.txt");

    let output = out_dir.path().join("data.txt");
    let report = merge_files(MergerConfig::new(project.path()).with_output(&output), &files)?;

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "// caf\u{FFFD}.txt\nlatin-1 name\n\n"
    );
    assert_eq!(report.files_written, 1);
    assert!(report.failed.is_empty());
    Ok(())
}
