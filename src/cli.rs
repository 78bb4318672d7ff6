use crate::analyzer::audit::formatter::ReportFormat;
use crate::analyzer::audit::types::WorkloadKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "workload-audit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Audit Kubernetes workloads for security misconfigurations")]
#[command(long_about = "Inspects the pod templates of Deployments, DaemonSets, StatefulSets and Jobs and reports every security-relevant field as defaulted, explicitly set, or flagged, with a reason for each finding.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit the workloads of a live cluster
    Cluster {
        /// Kubeconfig context to use (defaults to the current context)
        #[arg(long)]
        context: Option<String>,

        /// Label for the cluster column (defaults to the context name)
        #[arg(long)]
        cluster_name: Option<String>,

        /// Only audit these namespaces
        #[arg(short, long, value_delimiter = ',')]
        namespace: Vec<String>,

        /// Skip namespaces matching these glob patterns
        #[arg(long, value_delimiter = ',')]
        exclude_namespace: Vec<String>,

        /// Include kube-* system namespaces
        #[arg(long)]
        include_system: bool,

        /// Workload kinds to audit (deployment, daemonset, statefulset, job)
        #[arg(short, long, value_delimiter = ',', value_parser = parse_kind)]
        kind: Vec<WorkloadKind>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Audit workloads defined in manifest files
    Manifests {
        /// A YAML file or a directory of manifests
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Label for the cluster column
        #[arg(long, default_value = "local")]
        cluster_name: String,

        /// Workload kinds to audit (deployment, daemonset, statefulset, job)
        #[arg(short, long, value_delimiter = ',', value_parser = parse_kind)]
        kind: Vec<WorkloadKind>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// List the evaluated attributes and when they are flagged
    Rules,
}

/// Report options shared by the audit commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Report file name without extension
    #[arg(long)]
    pub name: Option<String>,

    /// Evaluate workloads one at a time
    #[arg(long)]
    pub sequential: bool,
}

fn parse_kind(s: &str) -> Result<WorkloadKind, String> {
    WorkloadKind::from_kind(s).ok_or_else(|| {
        format!(
            "unsupported workload kind '{}' (expected deployment, daemonset, statefulset or job)",
            s
        )
    })
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifests_command() {
        let cli = Cli::try_parse_from([
            "workload-audit",
            "-vv",
            "manifests",
            "k8s/",
            "--kind",
            "deploy,job",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Manifests {
                path,
                cluster_name,
                kind,
                report,
            } => {
                assert_eq!(path, PathBuf::from("k8s/"));
                assert_eq!(cluster_name, "local");
                assert_eq!(kind, vec![WorkloadKind::Deployment, WorkloadKind::Job]);
                assert_eq!(report.format, Some(ReportFormat::Json));
                assert!(!report.sequential);
            }
            _ => panic!("Expected manifests command"),
        }
    }

    #[test]
    fn test_parse_cluster_command() {
        let cli = Cli::try_parse_from([
            "workload-audit",
            "cluster",
            "--context",
            "prod",
            "-n",
            "web,payments",
            "--exclude-namespace",
            "team-*",
        ])
        .unwrap();

        match cli.command {
            Commands::Cluster {
                context,
                namespace,
                exclude_namespace,
                include_system,
                kind,
                ..
            } => {
                assert_eq!(context.as_deref(), Some("prod"));
                assert_eq!(namespace, vec!["web", "payments"]);
                assert_eq!(exclude_namespace, vec!["team-*"]);
                assert!(!include_system);
                assert!(kind.is_empty());
            }
            _ => panic!("Expected cluster command"),
        }
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["workload-audit", "manifests", ".", "--kind", "cronjob"]).is_err());
    }
}
