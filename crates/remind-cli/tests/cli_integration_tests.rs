//! End-to-end CLI flows against a temporary data file.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn remind(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("remind").unwrap();
    cmd.current_dir(dir.path());
    cmd.env("REMIND_DATA_FILE", dir.path().join("reminders.json"));
    cmd
}

#[test]
fn add_and_list_one_shot() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["add", "Dentist", "--date", "2025-03-12", "--time", "09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Dentist'"));

    remind(&dir)
        .args(["list", "--from", "2025-03-01", "--to", "2025-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentist"))
        .stdout(predicate::str::contains("2025-03-12 09:30"));
}

#[test]
fn daily_series_expands_in_window() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["add", "Stretch", "--date", "2025-01-01", "--every", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repeating every day"));

    let assert = remind(&dir)
        .args(["list", "--from", "2025-01-01", "--to", "2025-01-05"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Stretch").count(), 5);
}

#[test]
fn done_marks_one_occurrence() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["add", "Meds", "--date", "2025-01-01", "--every", "daily"])
        .assert()
        .success();

    // Address the series by a short id prefix taken from list output.
    let list = remind(&dir)
        .args(["list", "--from", "2025-01-01", "--to", "2025-01-01"])
        .assert()
        .success();
    let stdout = String::from_utf8(list.get_output().stdout.clone()).unwrap();
    let short_id = stdout
        .lines()
        .find(|l| l.contains("Meds"))
        .and_then(|l| l.split_whitespace().find(|w| w.contains("@2025-01-01")))
        .map(|w| w.split('@').next().unwrap().to_string())
        .expect("short id in list output");

    remind(&dir)
        .args(["done", &short_id, "--on", "2025-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked occurrence 2025-01-02"));

    remind(&dir)
        .args(["list", "--from", "2025-01-02", "--to", "2025-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"));
}

#[test]
fn split_bounds_original_and_creates_continuation() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["add", "Standup", "--date", "2025-01-06", "--every", "weekly"])
        .assert()
        .success();

    let list = remind(&dir)
        .args(["list", "--from", "2025-01-06", "--to", "2025-01-06"])
        .assert()
        .success();
    let stdout = String::from_utf8(list.get_output().stdout.clone()).unwrap();
    let short_id = stdout
        .lines()
        .find(|l| l.contains("Standup"))
        .and_then(|l| l.split_whitespace().find(|w| w.contains("@2025-01-06")))
        .map(|w| w.split('@').next().unwrap().to_string())
        .expect("short id in list output");

    remind(&dir)
        .args(["split", &short_id, "--at", "2025-02-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now ends 2025-02-02"))
        .stdout(predicate::str::contains("starts 2025-02-03"));

    // The bounded original stops producing occurrences at the boundary; the
    // continuation takes over.
    let after = remind(&dir)
        .args(["list", "--from", "2025-01-27", "--to", "2025-02-10"])
        .assert()
        .success();
    let stdout = String::from_utf8(after.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Standup").count(), 3); // Jan 27, Feb 3, Feb 10
}

#[test]
fn delete_series_requires_force_or_confirmation() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["add", "Old habit", "--date", "2025-01-01", "--every", "daily"])
        .assert()
        .success();

    let list = remind(&dir)
        .args(["list", "--from", "2025-01-01", "--to", "2025-01-01"])
        .assert()
        .success();
    let stdout = String::from_utf8(list.get_output().stdout.clone()).unwrap();
    let short_id = stdout
        .lines()
        .find(|l| l.contains("Old habit"))
        .and_then(|l| l.split_whitespace().find(|w| w.contains("@2025-01-01")))
        .map(|w| w.split('@').next().unwrap().to_string())
        .expect("short id in list output");

    remind(&dir)
        .args(["delete", &short_id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Old habit'"));

    remind(&dir)
        .args(["list", "--from", "2025-01-01", "--to", "2025-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reminders found."));
}

#[test]
fn unknown_id_prefix_reports_not_found() {
    let dir = TempDir::new().unwrap();
    remind(&dir)
        .args(["show", "ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No series found"));
}
