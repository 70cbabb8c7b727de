//! Terminal implementations of the core's interaction seams: toasts printed
//! to stderr, confirmation via dialoguer, and a load spinner.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use smartstore_core::{Confirm, ConfirmPrompt, Notification, Notifier, Severity};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Prints each notification as one stderr line.
///
/// Success and info lines are suppressed in quiet mode; errors always print.
pub struct ConsoleNotifier {
    color: bool,
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn format(&self, n: &Notification) -> String {
        let (icon, summary) = match n.severity {
            Severity::Success => ("✓", n.summary.as_str()),
            Severity::Info => ("ℹ", n.summary.as_str()),
            Severity::Error => ("✗", n.summary.as_str()),
        };
        if !self.color {
            return format!("{icon} {summary}: {}", n.detail);
        }
        let head = format!("{icon} {summary}:");
        let head = match n.severity {
            Severity::Success => head.green().bold().to_string(),
            Severity::Info => head.cyan().bold().to_string(),
            Severity::Error => head.red().bold().to_string(),
        };
        format!("{head} {}", n.detail)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        if self.quiet && notification.severity != Severity::Error {
            return;
        }
        eprintln!("{}", self.format(&notification));
    }
}

/// Asks on the terminal unless `--yes` was passed.
pub struct PromptConfirm {
    yes: bool,
}

impl PromptConfirm {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    /// Whether a prompt can be answered at all.
    pub fn can_prompt(&self) -> bool {
        self.yes || io::stdin().is_terminal()
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.yes {
            return true;
        }
        eprintln!("{}", prompt.header.bold());
        dialoguer::Confirm::new()
            .with_prompt(format!(
                "{} [{} / {}]",
                prompt.message, prompt.accept_label, prompt.reject_label
            ))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "confirmation prompt failed");
                false
            })
    }
}

/// A spinner on stderr while `message` is in progress, or nothing when
/// stderr is not a terminal or output is quiet.
pub fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(80));
    Some(bar)
}

/// Spin on stderr whenever `signal` reports a backend call in flight.
///
/// The task ends once the sender is dropped, i.e. when the controller that
/// owns the flag goes away.
pub fn follow_loading(
    mut signal: watch::Receiver<bool>,
    message: &'static str,
    quiet: bool,
) -> Option<JoinHandle<()>> {
    if quiet || !io::stderr().is_terminal() {
        return None;
    }
    Some(tokio::spawn(async move {
        loop {
            let started = signal.wait_for(|busy| *busy).await.map(|_| ());
            if started.is_err() {
                break;
            }
            let bar = spinner(message, quiet);
            let finished = signal.wait_for(|busy| !*busy).await.map(|_| ());
            if let Some(bar) = bar {
                bar.finish_and_clear();
            }
            if finished.is_err() {
                break;
            }
        }
    }))
}
