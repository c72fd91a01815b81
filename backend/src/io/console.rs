//! Terminal implementations of the notification and confirmation seams.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use log::warn;

use crate::domain::{Confirmation, Notifier};

/// Prints notifications: successes to stdout, errors to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

/// Asks on the terminal; anything but an explicit "yes" counts as no
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        match Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt failed, treating as declined: {}", e);
                false
            }
        }
    }
}
