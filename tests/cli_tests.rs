//! Integration tests for the hpkpkit CLI
//!
//! These tests run the actual hpkpkit binary against the checked-in fixtures
//! and verify its output and exit codes.

mod util;

use std::path::PathBuf;
use std::process::{Command, Output};

fn hpkpkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hpkpkit"))
        .args(args)
        .current_dir(util::fixture(""))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute hpkpkit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_quiet_plain_header() {
    let output = hpkpkit(&["-q", "primary.crt", "backup.csr"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "Public-Key-Pins: pin-sha256=\"{}\"; pin-sha256=\"{}\"; max-age=5184000\n",
            util::PRIMARY_PIN,
            util::BACKUP_PIN
        )
    );
}

#[test]
fn test_all_directives() {
    let output = hpkpkit(&[
        "-q",
        "-s",
        "-m",
        "100",
        "-r",
        "https://example.com/hpkp",
        "backup.key",
        "primary.key",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "Public-Key-Pins: pin-sha256=\"{}\"; pin-sha256=\"{}\"; max-age=100; \
             includeSubDomains; report-uri=\"https://example.com/hpkp\"\n",
            util::BACKUP_PIN,
            util::PRIMARY_PIN
        )
    );
}

#[test]
fn test_subdomains_absent_without_flag() {
    let output = hpkpkit(&["-q", "primary.crt", "backup.key"]);
    assert!(!stdout(&output).contains("includeSubDomains"));

    let output = hpkpkit(&["-q", "-s", "primary.crt", "backup.key"]);
    assert!(stdout(&output).contains("; includeSubDomains\n"));
}

#[test]
fn test_nginx_output() {
    let output = hpkpkit(&["-n", "-q", "primary.crt", "backup.key"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "add_header Public-Key-Pins 'pin-sha256=\"{}\"; pin-sha256=\"{}\"; max-age=5184000';\n",
            util::PRIMARY_PIN,
            util::BACKUP_PIN
        )
    );
}

#[test]
fn test_apache_output() {
    let output = hpkpkit(&["-a", "-q", "primary.crt", "backup.key"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "Header always set Public-Key-Pins \"pin-sha256=\\\"{}\\\"; pin-sha256=\\\"{}\\\"; max-age=5184000\"\n",
            util::PRIMARY_PIN,
            util::BACKUP_PIN
        )
    );
}

#[test]
fn test_report_only_header() {
    let output = hpkpkit(&[
        "-q",
        "--report-only",
        "-r",
        "https://example.com/hpkp",
        "primary.crt",
        "backup.key",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Public-Key-Pins-Report-Only: pin-sha256="));
}

#[test]
fn test_banner_without_quiet() {
    let output = hpkpkit(&["primary.crt", "backup.key"]);

    assert!(output.status.success());
    let text = stdout(&output);
    let header_line = format!(
        "Public-Key-Pins: pin-sha256=\"{}\"; pin-sha256=\"{}\"; max-age=5184000",
        util::PRIMARY_PIN,
        util::BACKUP_PIN
    );
    assert!(text.lines().any(|line| line == header_line));
    assert!(text.lines().count() > 1);
}

#[test]
fn test_unknown_extension_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let notes = util::write(dir.path(), "notes.txt", "hello");
    let notes = notes.to_str().unwrap();

    let output = hpkpkit(&["-q", "primary.crt", notes]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Unknown file extension 'txt'"));
}

#[test]
fn test_single_file_is_a_usage_error() {
    let output = hpkpkit(&["-q", "primary.crt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("at least 2 files are required"));
}

#[test]
fn test_no_arguments_is_a_usage_error() {
    let output = hpkpkit(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_encrypted_key_fails() {
    let output = hpkpkit(&["-q", "primary.crt", "encrypted.key"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Encrypted private keys are not supported"));
}

#[test]
fn test_missing_file_fails() {
    let output = hpkpkit(&["-q", "primary.crt", "does-not-exist.key"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Failed to read file"));
}

#[test]
fn test_nginx_and_apache_are_exclusive() {
    let output = hpkpkit(&["-n", "-a", "primary.crt", "backup.key"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_bad_max_age_is_a_usage_error() {
    let output = hpkpkit(&["-m", "tomorrow", "primary.crt", "backup.key"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help_exits_zero() {
    for flag in ["-h", "--help", "?"] {
        let output = hpkpkit(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
        assert!(stdout(&output).contains("Usage:"), "{flag}");
    }
}

#[test]
fn test_question_mark_as_option_value() {
    let output = hpkpkit(&["-q", "-r", "?", "primary.crt", "backup.key"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains("Usage:"));
    assert!(stdout(&output).ends_with("; report-uri=\"?\"\n"));
}

#[test]
fn test_bag_attributes_certificate() {
    let output = hpkpkit(&["-q", "bag.crt", "backup.key"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(util::PRIMARY_PIN));
}

#[test]
fn test_missing_openssl_executable() {
    let missing: PathBuf = std::env::temp_dir().join("hpkpkit-no-such-openssl");
    let flag = format!("--openssl={}", missing.display());

    let output = hpkpkit(&[flag.as_str(), "-q", "primary.crt", "backup.key"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("is not available"));
}

#[test]
fn test_identical_runs_are_byte_identical() {
    let args = ["-a", "-s", "-m", "86400", "primary.csr", "ed25519.key"];
    let first = hpkpkit(&args);
    let second = hpkpkit(&args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_logs_stay_on_stderr() {
    let output = hpkpkit(&["-vv", "-q", "primary.crt", "backup.key"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 1);
    assert!(stderr(&output).contains("pin-sha256="));
}
