//! Social connection commands

use chrono::Utc;
use creatorlink_domain::{OAuthOutcome, Result, SocialConnection};
use tracing::info;

use super::run_command;
use crate::context::AppContext;

/// List cached connections after loading them from the backend.
///
/// `attention_only` keeps connections with an expired token or repeated
/// automation errors.
pub async fn list_connections(
    ctx: &AppContext,
    platform: Option<&str>,
    attention_only: bool,
) -> Result<Vec<SocialConnection>> {
    run_command("connections::list", async {
        ctx.load().await?;
        if attention_only {
            let flagged = ctx.store.needs_attention(Utc::now());
            return Ok(match platform {
                None => flagged,
                Some(_) => {
                    let ids: Vec<String> =
                        ctx.connections.list(platform)?.into_iter().map(|c| c.id).collect();
                    flagged.into_iter().filter(|c| ids.contains(&c.id)).collect()
                }
            });
        }
        ctx.connections.list(platform)
    })
    .await
}

/// Link a new account on `platform` through the OAuth window.
pub async fn connect(ctx: &AppContext, platform: &str, scopes: &[String]) -> Result<OAuthOutcome> {
    run_command("connections::connect", async {
        ctx.load().await?;
        info!(platform, scopes = scopes.len(), "starting connection flow");
        ctx.connect_flow.connect(platform, scopes).await
    })
    .await
}

pub async fn refresh(ctx: &AppContext, id: &str) -> Result<SocialConnection> {
    run_command("connections::refresh", async {
        ctx.load().await?;
        ctx.connections.refresh(id).await
    })
    .await
}

pub async fn toggle_automation(ctx: &AppContext, id: &str, enabled: bool) -> Result<SocialConnection> {
    run_command("connections::toggle_automation", async {
        ctx.load().await?;
        ctx.connections.toggle_automation(id, enabled).await
    })
    .await
}

/// Disconnect after the configured confirmation accepts.
pub async fn disconnect(ctx: &AppContext, id: &str) -> Result<()> {
    run_command("connections::disconnect", async {
        ctx.load().await?;
        ctx.connections.disconnect(id).await
    })
    .await
}
