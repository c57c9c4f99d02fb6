use crate::common::error::AreteError;
use crate::common::result::AreteResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// レジストリの1エントリ
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// ソリューション名（YAMLでは`solution`キー）
    #[serde(rename = "solution", default)]
    pub name: String,

    /// 説明（空でもよい）
    #[serde(default)]
    pub description: String,

    /// ソースURL
    #[serde(default)]
    pub url: String,
}

impl Solution {
    /// 新しいSolutionインスタンスを作成
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// ソリューション名がキャッシュ内のディレクトリ名として使えるか検証する
    ///
    /// 空文字列、`.`、`..`、パス区切り文字を含む名前は拒否する。
    pub fn validate_name(name: &str) -> AreteResult<()> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\');

        if invalid {
            return Err(AreteError::validation_error(
                "solution",
                "solution name must be a single path component",
                Some(name.to_string()),
            ));
        }
        Ok(())
    }
}

/// 3つのフィールドが全て一致する場合のみ同一とみなす
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description && self.url == other.url
    }
}

/// 既知のソリューション一覧（solutions.yamlの構造）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionsList {
    /// 挿入順を保持したエントリ
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

impl SolutionsList {
    /// 空のSolutionsListを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// YAML文書から読み込む。空の文書は空のリストになる
    pub fn from_yaml(content: &str) -> AreteResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        serde_yaml::from_str(content).map_err(|e| {
            AreteError::parse_error_with_source(format!("invalid solutions list: {}", e), e)
        })
    }

    /// YAML文字列にシリアライズ
    pub fn to_yaml(&self) -> AreteResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// 同一のエントリが存在しなければ末尾に追加する
    ///
    /// 追加した場合は`true`を返す
    pub fn insert(&mut self, solution: Solution) -> bool {
        if self.solutions.contains(&solution) {
            return false;
        }
        self.solutions.push(solution);
        true
    }

    /// `other`のエントリのうち、まだ含まれていないものを末尾に追加する
    ///
    /// 自身が空の場合は`other`をそのままコピーする。
    pub fn merge(&mut self, other: &SolutionsList) {
        if self.solutions.is_empty() && !other.solutions.is_empty() {
            self.solutions = other.solutions.clone();
            return;
        }

        for solution in &other.solutions {
            self.insert(solution.clone());
        }
    }

    /// 名前でソリューションを検索
    pub fn find(&self, name: &str) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.name == name)
    }

    /// 名前に一致する最初のエントリのURLを返す
    pub fn find_url(&self, name: &str) -> AreteResult<&str> {
        self.find(name)
            .map(|s| s.url.as_str())
            .ok_or_else(|| AreteError::solution_not_found(name))
    }
}

impl From<Vec<Solution>> for SolutionsList {
    fn from(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }
}

impl<'a> IntoIterator for &'a SolutionsList {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl fmt::Display for SolutionsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.solutions.iter().map(|s| s.name.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
