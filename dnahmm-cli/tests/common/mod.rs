#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

pub const SMALL_FASTA: &str = "tests/data/small.fasta";
pub const CODING_SWITCH_MODEL: &str = "tests/data/coding_switch.json";

pub fn dnahmm() -> Command {
    Command::cargo_bin("dnahmm").unwrap()
}

/// Runs the dnahmm CLI quietly with the given arguments and returns stdout
pub fn run_dnahmm(args: &[&str]) -> String {
    let output = dnahmm()
        .arg("-q")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

/// Runs the dnahmm CLI expecting failure and returns stderr
pub fn run_dnahmm_failure(args: &[&str]) -> String {
    let output = dnahmm()
        .args(args)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    String::from_utf8(output).unwrap()
}

/// Writes `content` to a temporary FASTA file kept alive by the returned handle
pub fn fasta_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Replace the crate version in outputs to reduce snapshot churn.
pub fn normalize_output(s: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    s.replace(&format!("dnahmm_v{version}"), "dnahmm_vX")
        .replace(&format!("dnahmm.v{version}"), "dnahmm.vX")
}
