// commit driver - shows the message, asks once, and commits on acceptance

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, warn};

use crate::error::AutoCommitError;
use crate::git::GitRepo;
use crate::message::CommitMessage;
use crate::utils::separator;

const CONFIRM_PROMPT: &str = "✅ do you want to commit with this message? (y/n)";

/// how a run ended when nothing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// the commit exists; carries git's own summary output
    Committed { summary: String },
    /// the user answered anything but `y`, or the prompt was interrupted
    Declined,
    /// dry run: the message was shown and nothing else happened
    Previewed,
}

/// source of the single yes/no answer
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// the one place repository state is mutated
pub trait Committer {
    fn commit(&self, message: &str) -> Result<String, AutoCommitError>;
}

impl Committer for GitRepo {
    fn commit(&self, message: &str) -> Result<String, AutoCommitError> {
        GitRepo::commit(self, message)
    }
}

/// asks on the terminal, or reads a plain line when stdin is not interactive
#[derive(Debug, Default)]
pub struct TerminalPrompter;

/// the styled prompt needs a terminal on both ends; piped answers are read plainly
pub fn interactive_prompt_available(stdin_is_terminal: bool, user_attended: bool) -> bool {
    stdin_is_terminal && user_attended
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        if interactive_prompt_available(io::stdin().is_terminal(), console::user_attended()) {
            return Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| io::Error::other(e.to_string()));
        }

        print!("{prompt}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// case-insensitive `y` accepts; everything else, including empty input, declines
pub fn answer_accepts(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// print the message framed by separator lines
pub fn display_message(message: &CommitMessage) {
    let rule = separator();
    println!("{}", style(&rule).dim());
    println!("{}", style("✨ generated commit message:").green().bold());
    println!("{}\n", style(&rule).dim());
    println!("{}", style(message.render()).yellow());
    println!("\n{}", style(&rule).dim());
}

/// commit with the rendered text verbatim and report the result
pub fn commit_message(
    message: &CommitMessage,
    committer: &impl Committer,
) -> Result<CommitOutcome, AutoCommitError> {
    let summary = committer.commit(&message.render())?;
    println!("{}", style("\n✓ commit created successfully!").green().bold());
    if !summary.trim().is_empty() {
        println!("{}", summary.trim_end());
    }
    Ok(CommitOutcome::Committed { summary })
}

/// display, ask once, and commit only on an explicit `y`
pub fn confirm_and_commit(
    message: &CommitMessage,
    prompter: &mut impl Prompter,
    committer: &impl Committer,
) -> Result<CommitOutcome, AutoCommitError> {
    display_message(message);
    println!();

    let answer = match prompter.ask(CONFIRM_PROMPT) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("confirmation prompt failed, treating as decline: {e}");
            String::new()
        }
    };
    debug!(answer = answer.trim(), "confirmation answer");

    if answer_accepts(&answer) {
        commit_message(message, committer)
    } else {
        println!("{}", style("\ncommit cancelled.").yellow());
        Ok(CommitOutcome::Declined)
    }
}
