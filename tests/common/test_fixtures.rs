//! Test fixtures for creating test data

use std::path::Path;
use tempfile::TempDir;

use arete::domain::entities::settings::Settings;

pub const CORE_REPO: &str = "https://github.com/acme/widgets";

pub const CORE_SOLUTIONS_URL: &str =
    "https://raw.githubusercontent.com/acme/widgets/main/solutions/solutions.yaml";

pub const CORE_SOLUTIONS_YAML: &str = r#"solutions:
  - solution: landing-zone
    description: Opinionated landing zone
    url: https://github.com/acme/solutions.git/landing-zone@main
  - solution: gke-autopilot
    description: GKE Autopilot cluster
    url: https://github.com/acme/solutions.git/gke-autopilot@main
"#;

pub const REMOTE_REPO: &str = "https://github.com/acme/bigquery";

pub const REMOTE_SOLUTION_URL: &str =
    "https://raw.githubusercontent.com/acme/bigquery/main/base/solution.yaml";

pub const REMOTE_SOLUTION_YAML: &str = r#"apiVersion: arete/v1alpha1
kind: Config
metadata:
  name: bigquery
spec:
  url: https://github.com/acme/bigquery.git/base@main
  description: BigQuery datasets
deploy:
  stage:
    infra:
      kubeContext:
        clusterName: admin
        region: us-central1
        project: acme-admin
      requires:
        useConfigConnectorSA: "true"
        iam:
          - role: roles/bigquery.admin
            member: serviceAccount:kcc@acme-admin.iam.gserviceaccount.com
            resource:
              level: project
              id: acme-data
        services:
          - service: bigquery.googleapis.com
            project: acme-data
"#;

pub const NO_SPEC_SOLUTION_YAML: &str = r#"apiVersion: arete/v1alpha1
kind: Config
metadata:
  name: placeholder
"#;

/// Settings pointing the core repository at [`CORE_REPO`] and the cache at `dir`
pub fn settings_in(dir: &Path) -> Settings {
    Settings::with_cache_dir(dir).with_repo(CORE_REPO, "main", "solutions")
}

/// Fresh temporary cache directory
pub fn temp_cache() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Write a cache file with the given YAML
pub fn write_cache(dir: &Path, yaml: &str) {
    std::fs::write(dir.join("solutions.yaml"), yaml).expect("failed to write cache");
}
