// message synthesis - maps change statistics to a conventional commit message

use std::fmt;
use std::str::FromStr;

use crate::analysis::{Category, ChangeStats, normalize_files};
use crate::utils::base_name;

/// file lists longer than this are summarised by count only
pub const MAX_LISTED_FILES: usize = 5;

/// a single staged file at most this many files wide gets a filename subject
const SMALL_CHANGE_FILES: usize = 3;

/// conventional commit type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Ci,
}

impl CommitType {
    pub const ALL: [CommitType; 9] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
        CommitType::Ci,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "a new feature",
            CommitType::Fix => "a bug fix",
            CommitType::Docs => "documentation only changes",
            CommitType::Style => "changes that don't affect code meaning",
            CommitType::Refactor => "code change that neither fixes a bug nor adds a feature",
            CommitType::Perf => "code change that improves performance",
            CommitType::Test => "adding or updating tests",
            CommitType::Chore => "changes to build process or dependencies",
            CommitType::Ci => "ci configuration changes",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommitType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown commit type '{s}'"))
    }
}

/// generated commit message; built once per run and never modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    commit_type: CommitType,
    subject: String,
    body: String,
}

impl CommitMessage {
    pub fn commit_type(&self) -> CommitType {
        self.commit_type
    }

    /// single line, already prefixed with `<type>: `
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// the literal text handed to `git commit`
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// first matching rule wins
pub fn select_commit_type(stats: &ChangeStats) -> CommitType {
    if stats.test_file_count > 0 {
        CommitType::Test
    } else if stats.all_documentation() {
        CommitType::Docs
    } else if stats.has_category(Category::Feat) {
        CommitType::Feat
    } else {
        CommitType::Chore
    }
}

/// subject line text after the `<type>: ` prefix; first matching rule wins
fn subject_summary(stats: &ChangeStats, files: &[&str]) -> String {
    if stats.all_documentation() {
        "update documentation".to_string()
    } else if stats.test_file_count > 0 {
        "add/update tests".to_string()
    } else if stats.added_lines > stats.removed_lines * 2 {
        "add new functionality".to_string()
    } else if stats.removed_lines > stats.added_lines {
        "remove unused code".to_string()
    } else if files.len() == 1 && files.len() <= SMALL_CHANGE_FILES {
        format!("update {}", base_name(files[0]))
    } else {
        "refactor code structure".to_string()
    }
}

fn build_body(stats: &ChangeStats, files: &[&str]) -> String {
    // negative approximations are reported as zero
    let mut lines = vec![
        format!("Files changed: {}", stats.file_count),
        format!("Lines added: {}", stats.added_lines.max(0)),
        format!("Lines removed: {}", stats.removed_lines.max(0)),
    ];

    if stats.file_count <= MAX_LISTED_FILES {
        lines.push(String::new());
        lines.push("Modified files:".to_string());
        lines.extend(files.iter().map(|file| format!("- {file}")));
    }

    lines.join("\n")
}

/// build the commit message for a classified change set; pure and deterministic
pub fn synthesize<S: AsRef<str>>(stats: &ChangeStats, files: &[S]) -> CommitMessage {
    let files = normalize_files(files);
    let commit_type = select_commit_type(stats);
    let subject = format!("{commit_type}: {}", subject_summary(stats, &files));
    let body = build_body(stats, &files);

    CommitMessage {
        commit_type,
        subject,
        body,
    }
}
