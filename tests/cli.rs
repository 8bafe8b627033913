use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn datapeek(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("datapeek").unwrap();
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("DATAPEEK_INPUT_DIR")
        .env_remove("DATAPEEK_SESSION_PROGRAM")
        .env_remove("DATAPEEK_SESSION_ARGS")
        .env_remove("DATAPEEK_LOG_LEVEL");
    cmd
}

/// Working directory with an `input_data` folder holding the given files
fn workspace(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input_data");
    fs::create_dir(&input).unwrap();
    for (name, content) in files {
        fs::write(input.join(name), content).unwrap();
    }
    dir
}

#[test]
fn renders_csv_from_default_directory() {
    let dir = workspace(&[("a.csv", b"id,name\n1,Al\n")]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout("Data from a.csv:\n---------------------\nid  name\n 1  Al\n\n");
}

#[test]
fn csv_cells_print_as_loaded() {
    let dir = workspace(&[("prices.csv", b"name,price\n Al,3.0\nBo,2.5\n")]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout("Data from prices.csv:\n---------------------\nname  price\n Al     3.0\nBo      2.5\n\n");
}

#[test]
fn empty_csv_renders_nothing() {
    let dir = workspace(&[("empty.csv", b"")]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No data returned for file: empty.csv"));
}

#[test]
fn renders_json_record_and_text_lines() {
    let dir = workspace(&[
        ("meta.json", br#"{"title": "Q3", "pages": 12}"#),
        ("notes.txt", b"first line   \nsecond\n"),
    ]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Data from meta.json:\n---------------------\ntitle: Q3\npages: 12\n\n",
        ))
        .stdout(predicate::str::contains(
            "Data from notes.txt:\n---------------------\n- first line\n- second\n\n",
        ));
}

#[test]
fn unsupported_file_is_only_logged() {
    let dir = workspace(&[("c.bin", &[0, 159, 146, 150])]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(" - WARNING - unsupported file type: .bin"))
        .stderr(predicate::str::contains("No data returned for file: c.bin"));
}

#[test]
fn malformed_file_does_not_stop_the_batch() {
    let dir = workspace(&[
        ("bad.json", b"[1, 2"),
        ("good.csv", b"x\n7\n"),
    ]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Data from good.csv:"))
        .stdout(predicate::str::contains("bad.json").not())
        .stderr(predicate::str::contains(" - ERROR - Error reading"));
}

#[test]
fn explicit_directory_argument() {
    let dir = workspace(&[]);
    let other = dir.path().join("elsewhere");
    fs::create_dir(&other).unwrap();
    fs::write(other.join("z.csv"), "k\nv\n").unwrap();

    datapeek(dir.path())
        .arg("elsewhere")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data from z.csv:"));
}

#[test]
fn missing_input_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    datapeek(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Failed to list input directory"));
}

#[test]
fn log_lines_carry_timestamp_and_level() {
    let dir = workspace(&[("a.csv", b"id\n1\n")]);

    datapeek(dir.path())
        .assert()
        .success()
        .stderr(
            predicate::str::is_match(
                r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3} - INFO - Processing file: ",
            )
            .unwrap(),
        );
}

#[test]
fn log_level_flag_silences_info() {
    let dir = workspace(&[("a.csv", b"id\n1\n")]);

    datapeek(dir.path())
        .args(["--log-level", "warn"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO").not());
}

#[test]
fn statistical_file_without_session_is_skipped() {
    let dir = workspace(&[("survey.sas7bdat", b"not really sas")]);

    datapeek(dir.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no analytics session configured"));
}

#[cfg(unix)]
#[test]
fn statistical_file_goes_through_session() {
    // `cat` plays a converter whose output is already CSV
    let dir = workspace(&[
        ("survey.sas7bdat", b"region,count\nnorth,4\n"),
        ("panel.dta", b"wave\n1\n2\n"),
    ]);

    datapeek(dir.path())
        .args(["--session-program", "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Data from survey.sas7bdat:\n---------------------\nregion  count\nnorth       4\n\n",
        ))
        .stdout(predicate::str::contains(
            "Data from panel.dta:\n---------------------\nwave\n   1\n   2\n\n",
        ))
        .stderr(predicate::str::contains("Analytics session opened using cat"))
        .stderr(predicate::str::contains("Analytics session closed"));
}
