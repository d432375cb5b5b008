use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appctl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Tear down your application on docker or Kubernetes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Dry run - show what would be done without changing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Run against the Kubernetes cluster instead of the local container runtime
    #[arg(
        long,
        global = true,
        env = "APPCTL_CLUSTER",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub cluster: Option<bool>,

    /// Use the local container runtime even if the config or environment selects the cluster
    #[arg(long, global = true)]
    pub local: bool,

    /// Config file (defaults to ~/.config/appctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Backend choice from flags and environment, `None` when neither says
    pub fn cluster_override(&self) -> Option<bool> {
        if self.local { Some(false) } else { self.cluster }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage your deployed project on a Kubernetes cluster
    #[command(subcommand)]
    Deploy(DeployCommand),

    /// Stop the running project container, or its cluster resources with --cluster
    #[command(after_help = "Examples:
  appctl stop
      Stops the container launched by the project in the current directory.

  appctl stop --name nodejs-express-dev
      Stops the container named \"nodejs-express-dev\".

  appctl --cluster stop --name nodejs-express-dev
      Deletes the nodejs-express-dev ingress, service and deployment.")]
    Stop(StopArgs),

    /// Show the version of appctl
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Deploy Commands
// ============================================================================

#[derive(Subcommand)]
pub enum DeployCommand {
    /// Delete your deployed project using its deployment manifest
    #[command(after_help = "Examples:
  appctl deploy delete -f my-deploy.yaml
      Deletes the workload named in my-deploy.yaml from the \"default\" namespace.

  appctl deploy delete --namespace my-namespace
      Deletes the workload named in app-deploy.yaml from \"my-namespace\".")]
    Delete {
        /// The deployment manifest file for your application
        #[arg(short, long, default_value = teardown::DEFAULT_MANIFEST)]
        file: PathBuf,

        /// Target namespace (defaults to the configured namespace, then "default")
        #[arg(short, long, env = "APPCTL_NAMESPACE")]
        namespace: Option<String>,
    },
}

// ============================================================================
// Stop
// ============================================================================

#[derive(Parser)]
pub struct StopArgs {
    /// Container or base resource name (defaults to <project-dir>-dev)
    #[arg(long)]
    pub name: Option<String>,

    /// Target namespace for --cluster (defaults to the configured namespace)
    #[arg(short, long, env = "APPCTL_NAMESPACE")]
    pub namespace: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_deploy_delete_defaults() {
        let cli = Cli::try_parse_from(["appctl", "deploy", "delete"]).unwrap();
        match cli.command {
            Command::Deploy(DeployCommand::Delete { file, .. }) => {
                assert_eq!(file, PathBuf::from("app-deploy.yaml"));
            }
            _ => panic!("expected deploy delete"),
        }
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["appctl", "stop", "--name", "web", "--cluster", "--dry-run"])
                .unwrap();
        assert_eq!(cli.cluster_override(), Some(true));
        assert!(cli.dry_run);
        match cli.command {
            Command::Stop(args) => assert_eq!(args.name.as_deref(), Some("web")),
            _ => panic!("expected stop"),
        }
    }

    #[test]
    fn test_cluster_flag_can_select_local() {
        let cli = Cli::try_parse_from(["appctl", "--cluster=false", "stop"]).unwrap();
        assert_eq!(cli.cluster_override(), Some(false));

        let cli = Cli::try_parse_from(["appctl", "--cluster", "stop", "--local"]).unwrap();
        assert_eq!(cli.cluster_override(), Some(false));

        let cli = Cli::try_parse_from(["appctl", "stop", "--cluster=true"]).unwrap();
        assert_eq!(cli.cluster_override(), Some(true));
    }
}
