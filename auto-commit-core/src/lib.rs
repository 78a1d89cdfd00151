// auto-commit-core/src/lib.rs

// declare modules
pub mod analysis;
pub mod driver;
pub mod error;
pub mod git;
pub mod message;
pub mod utils;

// re-export key structs/functions for external use by other crates
pub use clap::Parser; // re-export Parser for CLI crate
pub use console::style; // re-export for the CLI crate's error printing

pub use crate::analysis::{analyze, classify_file, Category, ChangeStats, FileClass};
pub use crate::driver::{confirm_and_commit, CommitOutcome, Committer, Prompter, TerminalPrompter};
pub use crate::error::AutoCommitError;
pub use crate::git::{GitRepo, StagedChanges};
pub use crate::message::{synthesize, CommitMessage, CommitType};

use std::path::PathBuf;

// argument parsing struct shared with the CLI crate
#[derive(Parser, Debug, Clone)]
#[command(name = "auto-commit")]
#[command(version)]
#[command(about = "conventional commit message generator for staged changes", long_about = None)]
pub struct CoreCliArgs {
    /// path to git repository (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// commit with the generated message without asking
    #[arg(short = 'y', long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// only show the generated message, never commit
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// show per-file classification details
    #[arg(short, long)]
    pub verbose: bool,
}

/// read, classify, synthesize, then confirm and commit
pub fn execute_auto_commit_flow(args: &CoreCliArgs) -> Result<CommitOutcome, AutoCommitError> {
    let repo_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    println!("{}", style("📝 analysing staged changes...\n").cyan().bold());

    let repo = GitRepo::discover(&repo_path)?;

    let spinner = utils::staged_changes_spinner();
    let changes = repo.read_staged_changes();
    spinner.finish_and_clear();
    let StagedChanges { files, diff } = changes?;

    let stats = analyze(&files, &diff);
    let message = synthesize(&stats, &files);

    if args.verbose {
        print_details(&files, &stats, &message);
    }

    if args.dry_run {
        driver::display_message(&message);
        return Ok(CommitOutcome::Previewed);
    }

    if args.yes {
        driver::display_message(&message);
        println!("{}", style("--yes flag detected, committing without confirmation.").green());
        return driver::commit_message(&message, &repo);
    }

    confirm_and_commit(&message, &mut TerminalPrompter, &repo)
}

fn print_details(files: &[String], stats: &ChangeStats, message: &CommitMessage) {
    println!("{}", style("staged files:").cyan().bold());
    for file in files {
        let class = classify_file(file);
        println!("{}", style(format!("  - {file} ({})", class.label())).green());
    }
    println!(
        "\n{} lines added, {} lines removed",
        stats.added_lines, stats.removed_lines
    );
    let commit_type = message.commit_type();
    println!(
        "{}\n",
        style(format!("type: {commit_type} ({})", commit_type.description())).dim()
    );
}
