use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn create_file(path: &Path, content: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn photo_mover() -> Command {
    let mut cmd = Command::cargo_bin("photo-mover").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_help_flag() {
    photo_mover()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Move photos/videos"));
}

#[test]
fn test_version_flag() {
    photo_mover()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_src() {
    photo_mover()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_dst_outside_csv_mode() {
    let dir = tempdir().unwrap();

    photo_mover()
        .args(["--src", dir.path().to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--dst"));
}

#[test]
fn test_csv_include_hash_without_csv() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    std::fs::create_dir(&src).unwrap();
    create_file(&src.join("a.jpg"), b"x");

    photo_mover()
        .args([
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dir.path().join("dst").to_str().unwrap(),
            "--csv-include-hash",
        ])
        .assert()
        .code(2);

    // Rejected before touching anything
    assert!(src.join("a.jpg").exists());
    assert!(!dir.path().join("dst").exists());
}

#[test]
fn test_output_without_csv() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    create_file(&src.join("a.jpg"), b"x");

    photo_mover()
        .args([
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dir.path().join("dst").to_str().unwrap(),
            "-o",
            dir.path().join("list.csv").to_str().unwrap(),
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--csv"));

    assert!(src.join("a.jpg").exists());
    assert!(!dir.path().join("dst").exists());
    assert!(!dir.path().join("list.csv").exists());
}

#[test]
fn test_csv_mode() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    create_file(&src.join("a.jpg"), b"data");

    let stdout = stdout_of(photo_mover().args(["--src", src.to_str().unwrap(), "--csv"]));

    assert_eq!(stdout, "filename,extension,relative_path,size_bytes\na.jpg,jpg,a.jpg,4\n");
}

#[test]
fn test_csv_include_hash() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    create_file(&src.join("a.jpg"), b"Hello, World!");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--csv",
        "--csv-include-hash",
    ]));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "filename,extension,relative_path,size_bytes,sha256");
    assert_eq!(
        lines[1],
        "a.jpg,jpg,a.jpg,13,dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
    );
}

#[test]
fn test_csv_recursive_and_extensions() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    create_file(&src.join("a.jpg"), b"1");
    create_file(&src.join("b.png"), b"2");
    create_file(&src.join("sub").join("c.gif"), b"3");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--csv",
        "--recursive",
        "--extensions",
        "jpg,GIF",
    ]));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.jpg,"));
    assert!(lines[2].starts_with("c.gif,gif,"));
    assert!(!stdout.contains("b.png"));
}

#[test]
fn test_csv_all_files() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    create_file(&src.join("a.jpg"), b"photo1");
    create_file(&src.join("sub").join("b.mp4"), b"video");
    create_file(&src.join("readme.txt"), b"not media");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--csv",
        "--recursive",
        "--all-files",
    ]));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "a.jpg,jpg,a.jpg,6");
    assert_eq!(lines[2], "readme.txt,txt,readme.txt,9");
    assert!(lines[3].starts_with("b.mp4,mp4,"));
    assert!(lines[3].ends_with(",5"));
}

#[test]
fn test_csv_output_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("photos");
    let manifest = dir.path().join("manifest.csv");
    create_file(&src.join("a.jpg"), b"data");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--csv",
        "--output",
        manifest.to_str().unwrap(),
    ]));

    assert!(stdout.is_empty());
    let records = photo_mover::read_manifest(std::fs::File::open(&manifest).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filename, "a.jpg");
}

#[test]
fn test_csv_missing_source() {
    let dir = tempdir().unwrap();

    photo_mover()
        .args(["--src", dir.path().join("nope").to_str().unwrap(), "--csv"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_move_files() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    create_file(&src.join("a.jpg"), b"x");
    create_file(&src.join("b.mp4"), b"x");
    create_file(&src.join("notes.txt"), b"x");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--dst",
        dst.to_str().unwrap(),
    ]));

    assert!(stdout.starts_with("Moved files:\n"));
    assert!(stdout.contains(&format!(" - {}", dst.join("a.jpg").display())));
    assert!(dst.join("a.jpg").exists());
    assert!(dst.join("b.mp4").exists());
    assert!(!src.join("a.jpg").exists());
    assert!(src.join("notes.txt").exists());
}

#[test]
fn test_dry_run_no_filesystem_changes() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    create_file(&src.join("f.png"), b"x");

    let stdout = stdout_of(photo_mover().args([
        "--src",
        src.to_str().unwrap(),
        "--dst",
        dst.to_str().unwrap(),
        "--dry-run",
    ]));

    assert!(stdout.starts_with("Dry run: files that would be moved:\n"));
    assert!(stdout.contains(&format!(" - {}", dst.join("f.png").display())));
    assert!(src.join("f.png").exists());
    assert!(!dst.exists());
}

#[test]
fn test_recursive_move_flattens() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    create_file(&src.join("2023").join("a.jpg"), b"a");
    create_file(&src.join("2024").join("b.heic"), b"b");

    photo_mover()
        .args([
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dst.to_str().unwrap(),
            "-r",
        ])
        .assert()
        .success();

    assert!(dst.join("a.jpg").exists());
    assert!(dst.join("b.heic").exists());
}

#[test]
fn test_verbose_flag() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    create_file(&src.join("a.jpg"), b"x");

    photo_mover()
        .args([
            "-v",
            "--src",
            src.to_str().unwrap(),
            "--dst",
            dir.path().join("dst").to_str().unwrap(),
            "--dry-run",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("DRY RUN"));
}

#[test]
fn test_move_missing_source() {
    let dir = tempdir().unwrap();

    photo_mover()
        .args([
            "--src",
            dir.path().join("nope").to_str().unwrap(),
            "--dst",
            dir.path().join("dst").to_str().unwrap(),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!dir.path().join("dst").exists());
}

#[test]
fn test_source_is_a_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.jpg");
    std::fs::write(&file_path, "content").unwrap();

    photo_mover()
        .args(["--src", file_path.to_str().unwrap(), "--csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a directory"));
}
