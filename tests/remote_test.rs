// tests/remote_test.rs
use gh_release::remote::{head, remote};
use gh_release::Coordinate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn checkout(config: Option<&str>, head_contents: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let git = dir.path().join(".git");
    fs::create_dir(&git).unwrap();
    if let Some(config) = config {
        fs::write(git.join("config"), config).unwrap();
    }
    if let Some(contents) = head_contents {
        fs::write(git.join("HEAD"), contents).unwrap();
    }
    dir
}

#[test]
fn test_remote_from_ssh_checkout() {
    let dir = checkout(
        Some("[remote \"origin\"]\n\turl = git@github.com:alice/myrepo.git\n"),
        None,
    );
    assert_eq!(remote(dir.path()), Coordinate::new("alice", "myrepo"));
}

#[test]
fn test_remote_from_https_checkout() {
    let dir = checkout(
        Some("[remote \"origin\"]\n\turl = https://github.com/alice/myrepo.git\n"),
        None,
    );
    assert_eq!(remote(dir.path()), Coordinate::new("alice", "myrepo"));
}

#[test]
fn test_remote_without_remote_section() {
    let dir = checkout(Some("[core]\n\tbare = false\n"), None);
    assert!(remote(dir.path()).is_empty());
}

#[test]
fn test_remote_missing_config() {
    let dir = checkout(None, None);
    assert_eq!(remote(dir.path()), Coordinate::default());
    assert_eq!(remote(Path::new("/nonexistent/checkout")), Coordinate::default());
}

#[test]
fn test_head_branch() {
    let dir = checkout(None, Some("ref: refs/heads/main\n"));
    assert_eq!(head(dir.path()), "main");
}

#[test]
fn test_head_missing() {
    let dir = checkout(None, None);
    assert_eq!(head(dir.path()), "");
}
