// Confirmation of irreversible actions.

use crate::model::ResourceKind;

/// Text of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
}

impl ConfirmPrompt {
    pub fn delete(kind: ResourceKind) -> Self {
        Self {
            header: "Confirm Deletion".into(),
            message: format!(
                "Are you sure you want to delete this {kind}? This action cannot be undone."
            ),
            accept_label: "Yes, delete".into(),
            reject_label: "Cancel".into(),
        }
    }
}

/// Asks the user to accept or reject a prompt.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Answers every prompt the same way (`--yes`, tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.0
    }
}
