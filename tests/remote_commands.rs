use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{
    commit_file, committed_repository_dir, head_commit_id, init_repository_dir, repository_dir,
    run_kit_command,
};

/// Register `remote_dir` in `dir` under the name `origin`
fn add_origin(dir: &std::path::Path, remote_dir: &std::path::Path) {
    let marker = remote_dir.join(".kit").display().to_string();
    run_kit_command(dir, &["add-remote", "origin", &marker])
        .assert()
        .success();
}

#[rstest]
fn remotes_are_registered_and_forgotten_by_name(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_kit_command(dir.path(), &["add-remote", "origin", "/tmp/elsewhere/.kit"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["add-remote", "origin", "/tmp/other/.kit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name already exists.",
        ));

    run_kit_command(dir.path(), &["rm-remote", "origin"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["rm-remote", "origin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A remote with that name does not exist.",
        ));
}

#[rstest]
fn push_to_a_missing_remote_directory_is_rejected(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    run_kit_command(dir.path(), &["add-remote", "origin", "/nowhere/at/all/.kit"])
        .assert()
        .success();

    run_kit_command(dir.path(), &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote directory not found."));
}

#[rstest]
fn pushed_history_is_readable_from_the_remote(
    committed_repository_dir: TempDir,
    init_repository_dir: TempDir,
) {
    let local = committed_repository_dir;
    let remote = init_repository_dir;
    add_origin(local.path(), remote.path());

    run_kit_command(local.path(), &["push", "origin", "master"])
        .assert()
        .success();

    // the remote's master now points at the pushed tip, with every commit
    // and blob it needs present in the remote store
    assert_eq!(head_commit_id(remote.path()), head_commit_id(local.path()));
    run_kit_command(remote.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add a and b"));
    run_kit_command(remote.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(remote.path().join("a.txt")).unwrap(),
        "alpha\n"
    );
}

#[rstest]
fn push_requires_the_remote_tip_to_be_local_history(
    committed_repository_dir: TempDir,
    init_repository_dir: TempDir,
) {
    let local = committed_repository_dir;
    let remote = init_repository_dir;
    add_origin(local.path(), remote.path());

    // the remote advances on its own
    commit_file(remote.path(), "r.txt", "remote work\n", "remote commit");

    run_kit_command(local.path(), &["push", "origin", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please pull down remote changes before pushing.",
        ));
}

#[rstest]
fn fetch_lands_on_a_tracking_branch_without_touching_the_tree(
    init_repository_dir: TempDir,
    committed_repository_dir: TempDir,
) {
    let local = init_repository_dir;
    let remote = committed_repository_dir;
    add_origin(local.path(), remote.path());

    run_kit_command(local.path(), &["fetch", "origin", "master"])
        .assert()
        .success();

    // tracking branch exists; working tree and HEAD untouched
    run_kit_command(local.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/master"));
    assert!(!local.path().join("a.txt").exists());

    run_kit_command(local.path(), &["checkout", "origin/master"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(local.path().join("a.txt")).unwrap(),
        "alpha\n"
    );
}

#[rstest]
fn fetch_of_an_unknown_remote_branch_is_rejected(
    init_repository_dir: TempDir,
    committed_repository_dir: TempDir,
) {
    let local = init_repository_dir;
    let remote = committed_repository_dir;
    add_origin(local.path(), remote.path());

    run_kit_command(local.path(), &["fetch", "origin", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "That remote does not have that branch.",
        ));
}

#[rstest]
fn pull_fast_forwards_onto_the_fetched_history(
    init_repository_dir: TempDir,
    committed_repository_dir: TempDir,
) {
    let local = init_repository_dir;
    let remote = committed_repository_dir;
    add_origin(local.path(), remote.path());

    run_kit_command(local.path(), &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    assert_eq!(head_commit_id(local.path()), head_commit_id(remote.path()));
    assert_eq!(
        std::fs::read_to_string(local.path().join("a.txt")).unwrap(),
        "alpha\n"
    );
}

#[rstest]
fn push_then_fetch_round_trips_between_repositories(
    committed_repository_dir: TempDir,
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) {
    let author = committed_repository_dir;
    let hub = init_repository_dir;
    let reader = repository_dir;

    add_origin(author.path(), hub.path());
    run_kit_command(author.path(), &["push", "origin", "master"])
        .assert()
        .success();

    run_kit_command(reader.path(), &["init"]).assert().success();
    add_origin(reader.path(), hub.path());
    run_kit_command(reader.path(), &["pull", "origin", "master"])
        .assert()
        .success();

    assert_eq!(head_commit_id(reader.path()), head_commit_id(author.path()));
    assert_eq!(
        std::fs::read_to_string(reader.path().join("b.txt")).unwrap(),
        "beta\n"
    );
}
