//! Disconnect confirmation

use async_trait::async_trait;
use creatorlink_core::Confirmation;
use creatorlink_domain::{CreatorLinkError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

/// Asks on the terminal. Defaults to "no".
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmation;

#[async_trait]
impl Confirmation for TerminalConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| CreatorLinkError::Internal(format!("confirmation prompt failed: {e}")))
        })
        .await
        .map_err(|e| CreatorLinkError::Internal(format!("confirmation task failed: {e}")))?
    }
}

/// Accepts every prompt (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

#[async_trait]
impl Confirmation for AssumeYes {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        tracing::debug!(prompt, "confirmation assumed");
        Ok(true)
    }
}
