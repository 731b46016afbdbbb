//! User notification seam.
//!
//! The session reports validation failures, backend errors, and
//! confirmations through a [`Prompt`], and asks it before destructive
//! actions. A terminal, a GUI, or a test double can sit behind it.

/// Blocking user notices and yes/no questions.
pub trait Prompt {
    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. `true` means go ahead.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// A prompt that records alerts and answers every question the same way.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrompt {
    /// Alerts shown so far, oldest first.
    pub alerts: Vec<String>,
    /// Questions asked so far, oldest first.
    pub questions: Vec<String>,
    /// Answer given to every `confirm`.
    pub answer: bool,
}

impl RecordingPrompt {
    /// A prompt that answers yes to everything.
    #[must_use]
    pub const fn accepting() -> Self {
        Self {
            alerts: Vec::new(),
            questions: Vec::new(),
            answer: true,
        }
    }

    /// A prompt that answers no to everything.
    #[must_use]
    pub const fn declining() -> Self {
        Self {
            alerts: Vec::new(),
            questions: Vec::new(),
            answer: false,
        }
    }

    /// The most recent alert.
    #[must_use]
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Prompt for RecordingPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answer
    }
}
