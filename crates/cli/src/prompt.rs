//! Terminal prompt: alerts on stderr, confirmations read from stdin.

use std::io::{self, BufRead, Write};

use quitanda_client::Prompt;

/// Prompt backed by the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    /// `assume_yes` answers every confirmation without asking.
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn alert(&mut self, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        {
            let mut stderr = io::stderr().lock();
            let _ = write!(stderr, "{message} [y/N] ");
            let _ = stderr.flush();
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
