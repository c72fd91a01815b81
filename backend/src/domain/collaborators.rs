//! Collaborators the domain asks for input or reports outcomes to.
//!
//! Implementations live in the io layer (terminal prompts, console output)
//! and in tests (scripted answers, recorded messages).

/// Yes/no prompt gating destructive operations
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fire-and-forget user notifications
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Fixed answer, used for `--yes` and in tests
#[derive(Debug, Clone, Copy)]
pub struct StaticConfirmation(pub bool);

impl Confirmation for StaticConfirmation {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
