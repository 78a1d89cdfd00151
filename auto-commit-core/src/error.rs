//! error kinds surfaced to the user by the commit flow

use thiserror::Error;

/// every failure that ends a run early
#[derive(Error, Debug)]
pub enum AutoCommitError {
    /// the listing call itself failed: no repository here, or git is unavailable
    #[error("not a git repository or no staged changes: {0:#}")]
    NoRepositoryOrNoStagedChanges(#[source] anyhow::Error),

    /// the listing succeeded but nothing is staged
    #[error("no staged changes found. stage your changes first with: git add .")]
    NothingStaged,

    /// git refused or failed to create the commit
    #[error("error creating commit: {0:#}")]
    CommitFailed(#[source] anyhow::Error),
}

impl AutoCommitError {
    /// process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoRepositoryOrNoStagedChanges(_) | Self::NothingStaged | Self::CommitFailed(_) => 1,
        }
    }
}
