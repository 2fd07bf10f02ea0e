use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn oiltrack(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("oiltrack").unwrap();
    cmd.env("OILTRACK_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("OILTRACK_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn add(home: &Path, label: &str, date: &str, mileage: &str, due: &str) {
    oiltrack(home)
        .args(["add", "--label", label, "--date", date])
        .args(["--mileage", mileage, "--due", due])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Vehicle added: {}", label)));
}

#[test]
fn empty_list_says_so() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No vehicles found."));
}

#[test]
fn added_vehicles_are_listed_with_status() {
    let home = tempfile::tempdir().unwrap();
    add(home.path(), "Toyota Hilux", "2024-01-10", "10000", "15000");
    add(home.path(), "Ford Ranger", "2024-02-01", "14500", "15000");
    add(home.path(), "VW Amarok", "2023-11-20", "16000", "15000");

    oiltrack(home.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toyota Hilux"))
        .stdout(predicate::str::contains("on track"))
        .stdout(predicate::str::contains("due soon"))
        .stdout(predicate::str::contains("overdue"))
        .stdout(predicate::str::contains("3 vehicles"));
}

#[test]
fn add_with_missing_fields_fails() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["add", "--label", "Hilux", "--mileage", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required fields"))
        .stderr(predicate::str::contains("due-at-mileage"));

    oiltrack(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No vehicles found."));
}

#[test]
fn add_with_non_numeric_mileage_fails() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["add", "--label", "Hilux", "--date", "2024-01-10"])
        .args(["--mileage", "lots", "--due", "5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("whole number"));
}

#[test]
fn edit_changes_only_the_given_fields() {
    let home = tempfile::tempdir().unwrap();
    add(home.path(), "Hilux", "2024-01-10", "10000", "15000");

    oiltrack(home.path())
        .args(["edit", "1", "--mileage", "14800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle updated: Hilux"));

    oiltrack(home.path())
        .args(["status", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14800 km"))
        .stdout(predicate::str::contains("15000 km"))
        .stdout(predicate::str::contains("due soon"));
}

#[test]
fn remove_twice_fails_the_second_time() {
    let home = tempfile::tempdir().unwrap();
    add(home.path(), "Hilux", "2024-01-10", "10000", "15000");
    add(home.path(), "Ranger", "2024-01-10", "10000", "15000");

    oiltrack(home.path())
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle removed: Hilux"));

    oiltrack(home.path())
        .args(["rm", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vehicle matches"));

    oiltrack(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranger"))
        .stdout(predicate::str::contains("Hilux").not());
}

#[test]
fn remove_several_resolves_indexes_up_front() {
    let home = tempfile::tempdir().unwrap();
    add(home.path(), "First", "2024-01-10", "0", "5000");
    add(home.path(), "Second", "2024-01-10", "0", "5000");
    add(home.path(), "Third", "2024-01-10", "0", "5000");

    oiltrack(home.path())
        .args(["remove", "1", "3"])
        .assert()
        .success();

    oiltrack(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("First").not())
        .stdout(predicate::str::contains("Third").not());
}

#[test]
fn status_of_unknown_index_fails() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["status", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vehicle matches"));
}

#[test]
fn memory_backend_does_not_touch_disk() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["--backend", "memory", "add", "--label", "Hilux"])
        .args(["--date", "2024-01-10", "--mileage", "1", "--due", "2"])
        .assert()
        .success();

    assert!(!home.path().join("vehicles.json").exists());
}

#[test]
fn config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized oiltrack"));

    oiltrack(home.path())
        .args(["config", "refresh-interval-secs", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refresh-interval-secs set to 15"));

    oiltrack(home.path())
        .args(["config", "refresh-interval-secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));

    oiltrack(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("backend = file"));
}

#[test]
fn config_rejects_unknown_keys_and_bad_values() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));

    oiltrack(home.path())
        .args(["config", "refresh-interval-secs", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn firestore_backend_needs_a_project() {
    let home = tempfile::tempdir().unwrap();
    oiltrack(home.path())
        .args(["--backend", "firestore", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
