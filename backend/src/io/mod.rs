//! # IO Module
//!
//! The layer between the user and the domain: action handlers that turn
//! domain results into notifications, terminal implementations of the
//! collaborator traits, and the interactive form session.

pub mod console;
pub mod handlers;
pub mod interactive;
pub mod notifications;

pub use console::{ConsoleNotifier, TerminalConfirmation};
pub use notifications::{Notification, RecordingNotifier};
