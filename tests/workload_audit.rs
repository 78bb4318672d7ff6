use std::path::Path;

use workload_audit::analyzer::audit::formatter::csv::HEADER;
use workload_audit::analyzer::audit::rules::names;
use workload_audit::analyzer::audit::{
    AuditSummary, GLOBAL_CONTAINER, ReportFormat, WorkloadKind, evaluate_workloads,
    format_report_to_string, parser,
};

const FIXTURES: &str = "tests/fixtures/manifests";

#[test]
fn audits_manifest_directory() {
    let workloads = parser::parse_path(Path::new(FIXTURES), "ci").expect("fixtures parse");

    // The Service is skipped; batch/ sorts before web.yaml
    assert_eq!(workloads.len(), 2);
    assert_eq!(workloads[0].kind, WorkloadKind::Job);
    assert_eq!(workloads[1].kind, WorkloadKind::Deployment);

    let records = evaluate_workloads(&workloads, true);
    let summary = AuditSummary::from_records(&records);
    assert_eq!(summary.workloads, 2);
    assert_eq!(summary.flagged_workloads, 2);
    assert_eq!(summary.attributes, 26);
    assert_eq!(summary.flagged_attributes, 9);

    let job = &records[0];
    let flagged: Vec<&str> = job
        .attributes
        .iter()
        .filter(|a| a.is_flagged())
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(flagged, vec![names::HOST_NETWORK]);
    assert!(!job.attribute(names::DNS_POLICY, GLOBAL_CONTAINER).unwrap().is_flagged());
}

#[test]
fn nginx_deployment_findings() {
    let workloads = parser::parse_yaml_file(&Path::new(FIXTURES).join("web.yaml"), "ci").unwrap();
    let records = evaluate_workloads(&workloads, false);
    let nginx = &records[0];

    assert_eq!(nginx.identifier(), "web/Deployment/nginx");

    let host = nginx.attribute(names::HOST_NETWORK, GLOBAL_CONTAINER).unwrap();
    assert!(host.is_flagged());
    assert!(host.is_set());
    assert_eq!(
        host.reason.as_deref(),
        Some("Host (node) network access is set to [TRUE]")
    );

    let image = nginx.attribute(names::IMAGE_NAME, "nginx").unwrap();
    assert_eq!(
        image.reason.as_deref(),
        Some("Image with [LATEST] tag is not recommended")
    );

    let escalation = nginx
        .attribute(names::ALLOW_PRIVILEGE_ESCALATION, "nginx")
        .unwrap();
    assert!(escalation.is_flagged());
    assert!(escalation.is_default());

    assert!(!nginx.attribute(names::PRIVILEGED, "nginx").unwrap().is_flagged());
    assert!(
        !nginx
            .attribute(names::CONTAINER_RUN_AS_USER, "nginx")
            .unwrap()
            .is_flagged()
    );
}

#[test]
fn csv_report_for_manifests() {
    let workloads = parser::parse_path(Path::new(FIXTURES), "ci").unwrap();
    let records = evaluate_workloads(&workloads, true);
    let csv = format_report_to_string(&records, ReportFormat::Csv);

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
    assert_eq!(lines.count(), 26);

    assert!(csv.contains(
        "ci,web,Deployment,nginx,[Global Attribute - ALL],Host Network,true,false,true,true"
    ));
    assert!(csv.contains("ci,ops,Job,migrate,migrate,Privileged,false,false,true,false"));
    assert!(csv.contains(
        "ci,ops,Job,migrate,[Global Attribute - ALL],Host Network,<nil>,true,false,true"
    ));
}

#[test]
fn json_report_carries_reasons() {
    let workloads = parser::parse_path(Path::new(FIXTURES), "ci").unwrap();
    let records = evaluate_workloads(&workloads, true);
    let json = format_report_to_string(&records, ReportFormat::Json);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["flagged_attributes"], 9);
    assert_eq!(value["records"][1]["name"], "nginx");
    assert_eq!(value["records"][0]["attributes"][0]["value"], serde_json::Value::Null);
    assert_eq!(
        value["records"][0]["attributes"][0]["reason"],
        "Host (node) network access is not set"
    );
}
