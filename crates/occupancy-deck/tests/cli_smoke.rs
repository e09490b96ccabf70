use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_displays_usage() {
    Command::cargo_bin("occupancy-deck")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--plots-dir"));
}

#[test]
fn writes_presentation_and_reports_slide_count() {
    let temp = tempfile::tempdir().expect("temp dir");
    let output = temp.path().join("deck.pptx");

    Command::cargo_bin("occupancy-deck")
        .expect("binary exists")
        .current_dir(temp.path())
        .env_remove("OCCUPANCY_DECK_OUTPUT")
        .env_remove("OCCUPANCY_DECK_PLOTS_DIR")
        .arg("--output")
        .arg(&output)
        .arg("--plots-dir")
        .arg(temp.path().join("plots"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Presentazione creata con successo"))
        .stdout(predicate::str::contains("Numero totale di slide: 28"))
        .stdout(predicate::str::contains("File creato:"));

    assert!(output.is_file());
}

#[test]
fn outline_prints_json_without_writing() {
    let temp = tempfile::tempdir().expect("temp dir");
    let output = temp.path().join("deck.pptx");

    Command::cargo_bin("occupancy-deck")
        .expect("binary exists")
        .current_dir(temp.path())
        .arg("--outline")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"title\""))
        .stdout(predicate::str::contains("Grazie per l'Attenzione!"));

    assert!(!output.exists());
}
