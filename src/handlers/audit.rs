//! Handlers for the audit commands.

use crate::analyzer::audit::cluster_client::{ClusterClient, NamespaceFilter};
use crate::analyzer::audit::formatter::{self, ReportFormat};
use crate::analyzer::audit::rules::rule_descriptions;
use crate::analyzer::audit::{AuditSummary, Record, Workload, WorkloadKind, evaluate_workloads};
use crate::analyzer::audit::parser;
use crate::cli::ReportArgs;
use crate::config::types::Config;
use crate::error::{AuditError, Result};
use std::path::{Path, PathBuf};

/// Options for a live cluster audit.
#[derive(Debug, Clone, Default)]
pub struct ClusterOptions {
    pub context: Option<String>,
    pub cluster_name: Option<String>,
    pub namespaces: Vec<String>,
    pub exclude_namespaces: Vec<String>,
    pub include_system: bool,
    pub kinds: Vec<WorkloadKind>,
    pub report: ReportArgs,
}

/// Report settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub format: ReportFormat,
    pub output_dir: Option<PathBuf>,
    pub name: String,
    pub parallel: bool,
}

impl ReportSettings {
    pub fn resolve(args: &ReportArgs, config: &Config) -> Self {
        Self {
            format: args.format.unwrap_or(config.report.format),
            output_dir: args
                .output
                .clone()
                .or_else(|| config.report.output_dir.clone()),
            name: args
                .name
                .clone()
                .unwrap_or_else(|| config.report.name.clone()),
            parallel: config.audit.parallel && !args.sequential,
        }
    }
}

fn resolve_kinds(cli: &[WorkloadKind], config: &Config) -> Vec<WorkloadKind> {
    if cli.is_empty() {
        config.audit.kinds.clone()
    } else {
        cli.to_vec()
    }
}

/// Handle the `cluster` command.
pub async fn handle_cluster(options: ClusterOptions, config: &Config) -> Result<()> {
    let settings = ReportSettings::resolve(&options.report, config);
    let kinds = resolve_kinds(&options.kinds, config);

    let context = options.context.or_else(|| config.cluster.context.clone());
    let cluster_name = options
        .cluster_name
        .or_else(|| config.cluster.name.clone());

    let filter = NamespaceFilter {
        include: if options.namespaces.is_empty() {
            config.cluster.namespaces.clone()
        } else {
            options.namespaces
        },
        exclude: options
            .exclude_namespaces
            .into_iter()
            .chain(config.cluster.exclude_namespaces.iter().cloned())
            .collect(),
        include_system: options.include_system || config.cluster.include_system,
    };

    // Install rustls crypto provider (required for TLS connections to K8s API)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = ClusterClient::new(context.as_deref(), cluster_name.as_deref()).await?;
    let workloads = client.collect(&filter, &kinds).await?;

    audit_and_report(&workloads, &settings)
}

/// Handle the `manifests` command.
pub fn handle_manifests(
    path: &Path,
    cluster_name: &str,
    kinds: &[WorkloadKind],
    report: &ReportArgs,
    config: &Config,
) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InvalidArgument(format!(
            "path does not exist: {}",
            path.display()
        )));
    }

    let settings = ReportSettings::resolve(report, config);
    let kinds = resolve_kinds(kinds, config);

    let workloads: Vec<Workload> = parser::parse_path(path, cluster_name)?
        .into_iter()
        .filter(|w| kinds.contains(&w.kind))
        .collect();
    log::info!("Found {} workload(s) in {}", workloads.len(), path.display());

    audit_and_report(&workloads, &settings)
}

/// Handle the `rules` command.
pub fn handle_rules() -> Result<()> {
    println!("{:<28} {:<10} FLAGGED WHEN", "ATTRIBUTE", "SCOPE");
    for rule in rule_descriptions() {
        println!(
            "{:<28} {:<10} {}",
            rule.attribute,
            rule.scope.as_str(),
            rule.flagged_when
        );
    }
    Ok(())
}

fn audit_and_report(workloads: &[Workload], settings: &ReportSettings) -> Result<()> {
    let records = evaluate_workloads(workloads, settings.parallel);
    emit_report(&records, settings)
}

/// Print the report to stdout or write it to the output directory.
pub fn emit_report(records: &[Record], settings: &ReportSettings) -> Result<()> {
    let summary = AuditSummary::from_records(records);
    log::info!(
        "{} workload(s) audited, {} flagged",
        summary.workloads,
        summary.flagged_workloads
    );

    match &settings.output_dir {
        Some(dir) => {
            let path = formatter::write_report(records, settings.format, dir, &settings.name)?;
            println!("Report written to {}", path.display());
        }
        None => print!(
            "{}",
            formatter::format_report_to_string(records, settings.format)
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.report.format = ReportFormat::Json;
        config.report.name = "weekly".to_string();

        let args = ReportArgs {
            format: Some(ReportFormat::Table),
            sequential: true,
            ..Default::default()
        };
        let settings = ReportSettings::resolve(&args, &config);
        assert_eq!(settings.format, ReportFormat::Table);
        assert_eq!(settings.name, "weekly");
        assert!(settings.output_dir.is_none());
        assert!(!settings.parallel);

        let settings = ReportSettings::resolve(&ReportArgs::default(), &config);
        assert_eq!(settings.format, ReportFormat::Json);
        assert!(settings.parallel);
    }

    #[test]
    fn test_resolve_kinds() {
        let config = Config::default();
        assert_eq!(resolve_kinds(&[], &config), WorkloadKind::ALL.to_vec());
        assert_eq!(
            resolve_kinds(&[WorkloadKind::Job], &config),
            vec![WorkloadKind::Job]
        );
    }

    #[test]
    fn test_manifests_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("app.yaml");
        std::fs::write(
            &manifest,
            "kind: Deployment\nmetadata:\n  name: app\nspec:\n  template:\n    spec:\n      containers:\n      - name: app\n        image: app:latest\n",
        )
        .unwrap();

        let out = dir.path().join("out");
        let args = ReportArgs {
            output: Some(out.clone()),
            name: Some("audit".to_string()),
            ..Default::default()
        };
        handle_manifests(&manifest, "ci", &[], &args, &Config::default()).unwrap();

        let csv = std::fs::read_to_string(out.join("audit.csv")).unwrap();
        assert_eq!(csv.lines().count(), 1 + 6 + 7);
        assert!(csv.contains("ci,default,Deployment,app,app,Image Name,app:latest,false,true,true"));
    }

    #[test]
    fn test_manifests_missing_path() {
        let err = handle_manifests(
            Path::new("no/such/manifests"),
            "ci",
            &[],
            &ReportArgs::default(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AuditError::InvalidArgument(_)));
    }
}
