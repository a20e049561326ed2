use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{head_commit_id, init_repository_dir, repository_dir, run_kit_command};

#[test]
fn init_creates_the_marker_directory() -> Result<(), Box<dyn std::error::Error>> {
    common::redirect_temp_dir();
    let dir = TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();
    let mut sut = Command::cargo_bin("kit")?;

    sut.arg("init").arg(dir.path());

    sut.assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty kit repository in"))
        .stdout(predicate::str::contains(dir_absolute_path));

    assert!(dir.path().join(".kit/commits").is_dir());
    assert!(dir.path().join(".kit/blobs").is_dir());
    assert!(dir.path().join(".kit/state").is_file());

    Ok(())
}

#[rstest]
fn init_refuses_an_already_initialized_directory(init_repository_dir: TempDir) {
    run_kit_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A kit repository already exists in the current directory.",
        ));
}

#[rstest]
fn commands_outside_a_repository_are_rejected(repository_dir: TempDir) {
    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Not in an initialized kit repository.",
        ));
}

#[rstest]
fn fresh_repository_starts_at_the_root_commit(init_repository_dir: TempDir) {
    run_kit_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("Thu Jan 1 00:00:00 1970 +0000"));
}

#[rstest]
fn find_locates_exactly_the_root_commit_in_a_fresh_repository(
    init_repository_dir: TempDir,
) {
    let root_id = head_commit_id(init_repository_dir.path());

    run_kit_command(init_repository_dir.path(), &["find", "initial commit"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", root_id)));
}

#[rstest]
fn root_commit_id_is_identical_across_repositories(
    repository_dir: TempDir,
    #[from(repository_dir)] other_dir: TempDir,
) {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    run_kit_command(other_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        head_commit_id(repository_dir.path()),
        head_commit_id(other_dir.path())
    );
}
