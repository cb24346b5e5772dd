//! Terminal confirmation prompt.

use std::io::Write;

use siteship_deploy::{ConfirmPrompt, DeployError, StoreFuture};

/// Asks y/n questions on the controlling terminal.
///
/// Only an explicit `y`/`yes` (case-insensitive) confirms; anything
/// else, including end-of-input, declines.
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm<'a>(&'a self, message: &'a str) -> StoreFuture<'a, bool> {
        let question = format!("{message} [y/N] ");
        Box::pin(async move {
            // Terminal reads block, so keep them off the async runtime.
            tokio::task::spawn_blocking(move || ask(&question))
                .await
                .map_err(|err| DeployError::Prompt(err.to_string()))?
        })
    }
}

fn ask(question: &str) -> Result<bool, DeployError> {
    let mut stdout = std::io::stdout();
    stdout.write_all(question.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_ascii_lowercase();
    answer == "y" || answer == "yes"
}
