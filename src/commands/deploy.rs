//! Cluster deployment commands using teardown.

use anyhow::{Context, Result};
use std::path::Path;
use teardown::Client;

use crate::Context as AppContext;
use crate::cli::DeployCommand;
use crate::config::Settings;
use crate::ui;

pub fn run(ctx: &AppContext, cmd: DeployCommand) -> Result<()> {
    match cmd {
        DeployCommand::Delete { file, namespace } => {
            let client = super::client(ctx);
            delete(&client, &ctx.settings, &file, namespace.as_deref())?;
            if ctx.settings.dry_run && !ctx.quiet {
                ui::dim("Dry run - no changes made");
            }
            Ok(())
        }
    }
}

/// Delete the deployment named in `file`. Every failure is fatal.
fn delete(client: &Client, settings: &Settings, file: &Path, namespace: Option<&str>) -> Result<()> {
    let namespace = settings.namespace_or(namespace);
    client
        .delete_deployment(file, &namespace, settings.dry_run)
        .with_context(|| {
            format!(
                "Failed to delete deployment from {} in namespace {namespace}",
                file.display()
            )
        })
}
