/// End-to-end tests of the anchorchain binary
///
/// Writes match listings to temp files, runs the binary, and checks the report text and
/// exit status.
use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const LISTING: &str = "\
> chr1
    1000        1      150
    1160      161      100
   90000    50001      250
      10    60000       20
> chr1 Reverse
> chr2
       0        0       10
       5        5       10
      20       20       10
";

fn run_anchorchain(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_anchorchain"))
        .args(args)
        .arg("--quiet")
        .output()?)
}

fn write_listing(dir: &Path, name: &str, content: &str) -> Result<String> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn test_default_settings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_listing(temp_dir.path(), "matches.txt", LISTING)?;

    let output = run_anchorchain(&["-i", &input])?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let expected = concat!(
        "> chr1\n",
        "    1000        1    150    none      -      -\n",
        "    1160      161    100    none     10     10\n",
        "#\n",
        "   90000    50001    250    none      -      -\n",
        "> chr1 Reverse\n",
        "> chr2\n",
    );
    assert_eq!(String::from_utf8(output.stdout)?, expected);
    Ok(())
}

#[test]
fn test_min_score_and_output_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_listing(temp_dir.path(), "matches.txt", LISTING)?;
    let out_path = temp_dir.path().join("clusters.txt");

    let output = run_anchorchain(&["-i", &input, "-l", "20", "-o", out_path.to_str().unwrap()])?;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let report = fs::read_to_string(&out_path)?;
    let lines: Vec<&str> = report.lines().collect();

    // chr1 gains the 20 bp singleton as a third chain, so two continuation markers
    assert_eq!(lines.iter().filter(|l| **l == "#").count(), 2);
    assert!(report.contains("      10    60000     20    none      -      -\n"));

    // chr2: the first two anchors merge into one 15 bp span
    let chr2 = report.split("> chr2\n").nth(1).unwrap();
    assert_eq!(
        chr2,
        "       0        0     15    none      -      -\n      20       20     10    none      5      5\n"
    );
    Ok(())
}

#[test]
fn test_extent_flag() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_listing(
        temp_dir.path(),
        "gapped.txt",
        "> q\n0 0 100\n300 300 100\n",
    )?;

    let summed = run_anchorchain(&["-i", &input, "-l", "350"])?;
    assert_eq!(String::from_utf8(summed.stdout)?, "> q\n");

    let extent = run_anchorchain(&["-i", &input, "-l", "350", "-e"])?;
    assert_eq!(
        String::from_utf8(extent.stdout)?,
        "> q\n       0        0    100    none      -      -\n     300      300    100    none    200    200\n"
    );
    Ok(())
}

#[test]
fn test_gzipped_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("matches.txt.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&path)?, Compression::default());
    encoder.write_all(LISTING.as_bytes())?;
    encoder.finish()?;

    let plain = write_listing(temp_dir.path(), "matches.txt", LISTING)?;
    let from_gz = run_anchorchain(&["-i", path.to_str().unwrap()])?;
    let from_plain = run_anchorchain(&["-i", &plain])?;
    assert!(from_gz.status.success());
    assert_eq!(from_gz.stdout, from_plain.stdout);
    Ok(())
}

#[test]
fn test_reads_stdin() -> Result<()> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_anchorchain"))
        .arg("--quiet")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"> only\n0 0 500\n")?;
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "> only\n       0        0    500    none      -      -\n"
    );
    Ok(())
}

#[test]
fn test_label_check() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let good = write_listing(temp_dir.path(), "good.txt", LISTING)?;
    let output = run_anchorchain(&["-i", &good, "-C"])?;
    assert!(output.status.success());

    let bad = write_listing(temp_dir.path(), "bad.txt", "> a\n0 0 300\n> b\n0 0 300\n")?;
    let output = run_anchorchain(&["-i", &bad, "-C"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reverse-strand"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_invalid_input_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_listing(temp_dir.path(), "zero.txt", "> q\n0 0 0\n")?;
    let output = run_anchorchain(&["-i", &input])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "got: {stderr}");

    let missing = temp_dir.path().join("missing.txt").to_string_lossy().into_owned();
    let output = run_anchorchain(&["-i", &missing])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open"));
    Ok(())
}

#[test]
fn test_metric_suffix_options() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_listing(temp_dir.path(), "far.txt", "> q\n0 0 150\n1500 1500 150\n")?;

    // 1350 bp apart: split at the default separation, joined with -s 2k
    let split = run_anchorchain(&["-i", &input, "-l", "300"])?;
    assert_eq!(String::from_utf8(split.stdout)?, "> q\n");

    let joined = run_anchorchain(&["-i", &input, "-l", "300", "-s", "2k"])?;
    assert!(String::from_utf8(joined.stdout)?.contains("    1500     1500    150    none   1350   1350\n"));

    let rejected = run_anchorchain(&["-i", &input, "-s", "2q"])?;
    assert!(!rejected.status.success());
    Ok(())
}
