//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::path::Path;

use auto_commit_core::GitRepo;
use git2::{Oid, Repository, Signature};

/// A throwaway git repository in a temp directory.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create an empty repository with a local identity so `git commit` works.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config.set_bool("commit.gpgsign", false).expect("Failed to disable signing");
        }
        Self { dir, repo }
    }

    /// Set a repository-local config value.
    pub fn set_config(&self, key: &str, value: &str) {
        let mut config = self.repo.config().expect("Failed to open repo config");
        config.set_str(key, value).expect("Failed to set config value");
    }

    /// Install an executable hook script under `.git/hooks`.
    #[cfg(unix)]
    pub fn install_hook(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let hooks = self.repo.path().join("hooks");
        std::fs::create_dir_all(&hooks).expect("Failed to create hooks dir");
        let path = hooks.join(name);
        std::fs::write(&path, script).expect("Failed to write hook");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make hook executable");
    }

    /// Write a file relative to the working tree, creating parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full, content).expect("Failed to write file");
    }

    /// Add a path to the index.
    pub fn stage(&self, path: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write and stage in one step.
    pub fn write_staged(&self, path: &str, content: &str) {
        self.write(path, content);
        self.stage(path);
    }

    /// Commit whatever is in the index through libgit2. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points at.
    pub fn head_message(&self) -> String {
        let head = self.repo.head().expect("Repository has no HEAD");
        let commit = head.peel_to_commit().expect("HEAD is not a commit");
        commit.message().expect("Commit message is not utf-8").to_string()
    }

    /// The repository as the reader sees it.
    pub fn git(&self) -> GitRepo {
        GitRepo::discover(self.dir.path()).expect("Failed to discover test repo")
    }
}
