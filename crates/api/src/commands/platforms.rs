//! Platform catalog commands

use creatorlink_core::PlatformCatalog;
use creatorlink_domain::{Platform, PlatformStatus, Result};

use super::run_command;
use crate::context::AppContext;

pub async fn list_platforms(ctx: &AppContext, status: Option<PlatformStatus>) -> Result<Vec<Platform>> {
    run_command("platforms::list", ctx.backend.list_platforms(status)).await
}
