//! Stop the development environment, locally or on the cluster.

use anyhow::{Context, Result};
use teardown::{Client, Completion, TeardownRequest};

use crate::Context as AppContext;
use crate::cli::StopArgs;
use crate::config::Settings;
use crate::project;
use crate::ui;

pub fn run(ctx: &AppContext, args: StopArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => project::current_container_name()?,
    };

    let client = super::client(ctx);
    let completion = stop(&client, &ctx.settings, &name, args.namespace.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&completion)?);
    } else if !ctx.quiet {
        print_summary(&completion, ctx.verbose > 0);
    }
    Ok(())
}

/// Stop `name` on the configured backend.
///
/// A local stop failure is returned. Cluster companion failures are only
/// reported; the command still succeeds.
fn stop(
    client: &Client,
    settings: &Settings,
    name: &str,
    namespace: Option<&str>,
) -> Result<Completion> {
    let request = TeardownRequest::base_name(name)
        .with_namespace(settings.namespace_or(namespace))
        .with_dry_run(settings.dry_run)
        .with_mode(settings.mode);

    client
        .execute(&request)
        .with_context(|| format!("Failed to stop {name}"))
}

fn print_summary(completion: &Completion, verbose: bool) {
    let Some(outcome) = completion.outcome() else {
        return;
    };

    if let Completion::Cluster { .. } = completion {
        ui::header("Cluster teardown");
        for result in &outcome.results {
            let status = if result.is_deleted() { "deleted" } else { "not deleted" };
            ui::kv(&result.resource.to_string(), status);
            if let (true, Some(error)) = (verbose, &result.error) {
                ui::dim(error);
            }
        }
        println!();
        ui::info(&format!(
            "Removed {} resources",
            ui::ratio(outcome.succeeded(), outcome.len())
        ));
        if !outcome.is_success() {
            ui::warn("Some resources could not be deleted; see errors above");
        }
    } else {
        ui::success("Development environment stopped");
    }

    if outcome.dry_run {
        ui::dim("Dry run - no changes made");
    }
}
