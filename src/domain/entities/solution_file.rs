use super::solution::Solution;
use crate::common::error::AreteError;
use crate::common::result::AreteResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SOLUTION_FILE_NAME: &str = "solution.yaml";
pub const SOLUTION_FILE_KIND: &str = "Config";
pub const SOLUTION_GROUP: &str = "arete";
pub const SOLUTION_FILE_VERSION: &str = "v1alpha1";

fn is_blank_document(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

/// `arete/v1alpha1`
pub fn solution_api_version() -> String {
    format!("{}/{}", SOLUTION_GROUP, SOLUTION_FILE_VERSION)
}

/// リソースのメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// solution.yamlファイルの構造
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionFile {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// ソリューションの取得元（オプション）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<Spec>,

    /// デプロイ情報（このツールでは解釈しない）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy: Option<Deploy>,
}

impl SolutionFile {
    /// YAML文書からマニフェストを読み込む
    ///
    /// 空の文書やコメントだけの文書は、specを持たない空のマニフェストとして扱う。
    pub fn from_yaml(content: &str) -> AreteResult<Self> {
        if is_blank_document(content) {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            AreteError::parse_error_with_source(format!("invalid solution manifest: {}", e), e)
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// apiVersionとkindが既知の値かどうか
    pub fn has_expected_type(&self) -> bool {
        self.api_version == solution_api_version() && self.kind == SOLUTION_FILE_KIND
    }

    /// specが空でなければレジストリのエントリに変換する
    pub fn to_solution(&self) -> Option<Solution> {
        match &self.spec {
            Some(spec) if !spec.is_empty() => Some(Solution::new(
                self.metadata.name.clone(),
                spec.description.clone(),
                spec.url.clone(),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Spec {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.description.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deploy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl Deploy {
    pub fn is_empty(&self) -> bool {
        self.stage.as_ref().map_or(true, Stage::is_empty)
    }

    /// インフラ段階で要求されるIAMバインディング
    pub fn iam_bindings(&self) -> &[Iam] {
        self.requires()
            .map(|r| r.iam.as_slice())
            .unwrap_or_default()
    }

    /// 有効化が必要なサービス
    pub fn services(&self) -> &[Service] {
        self.requires()
            .map(|r| r.services.as_slice())
            .unwrap_or_default()
    }

    /// 他のソリューションへの依存
    pub fn dependencies(&self) -> &[Depends] {
        self.requires()
            .map(|r| r.depends.as_slice())
            .unwrap_or_default()
    }

    fn requires(&self) -> Option<&Requires> {
        self.stage
            .as_ref()
            .and_then(|s| s.infra.as_ref())
            .map(|i| &i.requires)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infra: Option<Infra>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
}

impl Stage {
    pub fn is_empty(&self) -> bool {
        self.infra.is_none() && self.app.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Infra {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_context: Option<KubeContext>,

    #[serde(default, skip_serializing_if = "Requires::is_empty")]
    pub requires: Requires,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_context: Option<KubeContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubeContext {
    #[serde(rename = "clusterName", default, skip_serializing_if = "String::is_empty")]
    pub cluster_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,

    #[serde(rename = "internalIP", default, skip_serializing_if = "String::is_empty")]
    pub internal_ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requires {
    #[serde(
        rename = "useConfigConnectorSA",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub use_config_connector_sa: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub iam: Vec<Iam>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<Depends>,
}

impl Requires {
    pub fn is_empty(&self) -> bool {
        self.use_config_connector_sa.is_empty()
            && self.iam.is_empty()
            && self.services.is_empty()
            && self.depends.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iam {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub member: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Depends {
    #[serde(rename = "asset-type", default, skip_serializing_if = "String::is_empty")]
    pub asset_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_MANIFEST: &str = r#"
apiVersion: arete/v1alpha1
kind: Config
metadata:
  name: gke-autopilot
  annotations:
    config.kubernetes.io/local-config: "true"
spec:
  url: https://github.com/acme/solutions.git/gke-autopilot@main
  description: GKE Autopilot cluster with private networking
deploy:
  stage:
    infra:
      kubeContext:
        clusterName: krmapihost-config-controller
        region: us-central1
        project: acme-admin
      requires:
        useConfigConnectorSA: "true"
        iam:
          - role: roles/container.admin
            member: serviceAccount:cc@acme-admin.iam.gserviceaccount.com
            resource:
              level: project
              id: acme-prod
        services:
          - service: container.googleapis.com
            project: acme-prod
        depends:
          - asset-type: compute.googleapis.com/Network
            scope: projects/acme-prod
            name: vpc-main
    app:
      kubeContext:
        clusterName: gke-autopilot
        zone: us-central1-a
        internalIP: "true"
"#;

    #[test]
    fn test_parse_full_manifest() {
        let file = SolutionFile::from_yaml(FULL_MANIFEST).unwrap();

        assert!(file.has_expected_type());
        assert_eq!(file.name(), "gke-autopilot");

        let deploy = file.deploy.as_ref().unwrap();
        assert!(!deploy.is_empty());
        assert_eq!(deploy.iam_bindings().len(), 1);
        assert_eq!(deploy.iam_bindings()[0].resource.as_ref().unwrap().id, "acme-prod");
        assert_eq!(deploy.services()[0].service, "container.googleapis.com");
        assert_eq!(deploy.dependencies()[0].asset_type, "compute.googleapis.com/Network");

        let app_context = deploy
            .stage
            .as_ref()
            .and_then(|s| s.app.as_ref())
            .and_then(|a| a.kube_context.as_ref())
            .unwrap();
        assert_eq!(app_context.internal_ip, "true");
    }

    #[test]
    fn test_to_solution_uses_metadata_name_and_spec() {
        let file = SolutionFile::from_yaml(FULL_MANIFEST).unwrap();

        assert_eq!(
            file.to_solution(),
            Some(Solution::new(
                "gke-autopilot",
                "GKE Autopilot cluster with private networking",
                "https://github.com/acme/solutions.git/gke-autopilot@main",
            ))
        );
    }

    #[test]
    fn test_manifest_without_spec_has_no_solution() {
        let yaml = r#"
apiVersion: arete/v1alpha1
kind: Config
metadata:
  name: deploy-only
deploy:
  stage:
    infra:
      requires:
        useConfigConnectorSA: "true"
"#;
        let file = SolutionFile::from_yaml(yaml).unwrap();

        assert!(file.spec.is_none());
        assert!(file.to_solution().is_none());
        assert!(file.deploy.unwrap().dependencies().is_empty());
    }

    #[test]
    fn test_empty_spec_mapping_has_no_solution() {
        let yaml = "apiVersion: arete/v1alpha1\nkind: Config\nmetadata:\n  name: x\nspec: {}\n";
        let file = SolutionFile::from_yaml(yaml).unwrap();

        assert_eq!(file.spec, Some(Spec::default()));
        assert!(file.to_solution().is_none());
    }

    #[test]
    fn test_unexpected_type_is_still_parsed() {
        let yaml = "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: x\n";
        let file = SolutionFile::from_yaml(yaml).unwrap();

        assert!(!file.has_expected_type());
        assert!(file.deploy.map_or(true, |d| d.is_empty()));
    }

    #[test]
    fn test_empty_and_comment_only_manifests_have_no_solution() {
        for body in ["", "\n  \n", "# nothing published yet\n", "  # indented\n\n# another\n"] {
            let file = SolutionFile::from_yaml(body).unwrap();
            assert_eq!(file, SolutionFile::default());
            assert_eq!(file.to_solution(), None);
        }
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        assert!(matches!(
            SolutionFile::from_yaml("spec: ["),
            Err(AreteError::ParseError { .. })
        ));
        assert!(matches!(
            SolutionFile::from_yaml("# header\nspec: ["),
            Err(AreteError::ParseError { .. })
        ));
    }

    #[test]
    fn test_serialize_skips_empty_sections() {
        let file = SolutionFile {
            api_version: solution_api_version(),
            kind: SOLUTION_FILE_KIND.to_string(),
            metadata: ObjectMeta {
                name: "x".to_string(),
                ..Default::default()
            },
            spec: Some(Spec {
                url: "https://github.com/acme/x".to_string(),
                description: String::new(),
            }),
            deploy: None,
        };

        let yaml = serde_yaml::to_string(&file).unwrap();
        assert!(yaml.contains("apiVersion: arete/v1alpha1"));
        assert!(!yaml.contains("deploy"));
        assert!(!yaml.contains("description"));
    }
}
