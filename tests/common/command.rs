use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use kit::areas::repository::REPO_DIR;
use kit::areas::state::RepoState;
use rstest::fixture;
use std::path::Path;

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("kit binary should build");
    cmd.current_dir(dir).args(args);
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    run_kit_command(dir, &["commit", "-m", message])
}

/// Full id of the currently checked-out commit, read from the state record
pub fn head_commit_id(dir: &Path) -> String {
    RepoState::load(&dir.join(REPO_DIR))
        .expect("state record should load")
        .head
        .to_string()
}

/// Stage and commit one file in a single step
pub fn commit_file(dir: &Path, file_name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file_name), content.to_string()));
    run_kit_command(dir, &["add", file_name]).assert().success();
    kit_commit(dir, message).assert().success();
}

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit tracking a.txt and b.txt
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "alpha\n".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "beta\n".to_string()));
    run_kit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_kit_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "add a and b").assert().success();

    dir
}
