use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 設定ディレクトリ名（ホームディレクトリ直下）
pub const CONFIG_DIR_NAME: &str = ".arete";
/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// キャッシュされたソリューション一覧のファイル名
pub const SOLUTIONS_FILE_NAME: &str = "solutions.yaml";

pub const DEFAULT_REPO_URL: &str = "https://github.com/shaunmitchellve/arete";
pub const DEFAULT_REPO_BRANCH: &str = "main";
pub const DEFAULT_REPO_SUB_FOLDER: &str = "solutions";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PULL_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_KPT_EXECUTABLE: &str = "kpt";

/// `~/.arete`。ホームディレクトリが取得できない場合はカレントディレクトリ
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// config.yamlの内容
///
/// 一度だけ構築して、キャッシュパスやリポジトリ、認証情報が必要な各コンポーネントに
/// 参照で渡す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// キャッシュディレクトリ。未指定の場合は空で、読み込み側が設定ディレクトリで補う
    #[serde(default)]
    pub cache: PathBuf,

    /// コアソリューション一覧を置いているリポジトリ
    #[serde(rename = "repoUrl")]
    pub repo_url: String,

    #[serde(rename = "repoBranch")]
    pub repo_branch: String,

    #[serde(rename = "repoSubFolder")]
    pub repo_sub_folder: String,

    /// プライベートリポジトリ用のトークン
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_token: Option<String>,

    pub verbose: bool,

    #[serde(rename = "fetchTimeoutSecs")]
    pub fetch_timeout_secs: u64,

    #[serde(rename = "pullTimeoutSecs")]
    pub pull_timeout_secs: u64,

    /// パッケージ取得に使うkptの実行ファイル
    pub kpt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_cache_dir(default_config_dir())
    }
}

impl Settings {
    /// キャッシュディレクトリを指定して、その他はデフォルト値で作成
    pub fn with_cache_dir(cache: impl Into<PathBuf>) -> Self {
        Self {
            cache: cache.into(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            repo_branch: DEFAULT_REPO_BRANCH.to_string(),
            repo_sub_folder: DEFAULT_REPO_SUB_FOLDER.to_string(),
            git_token: None,
            verbose: false,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            pull_timeout_secs: DEFAULT_PULL_TIMEOUT_SECS,
            kpt: DEFAULT_KPT_EXECUTABLE.to_string(),
        }
    }

    /// コアソリューションの取得元を設定
    pub fn with_repo(
        mut self,
        url: impl Into<String>,
        branch: impl Into<String>,
        sub_folder: impl Into<String>,
    ) -> Self {
        self.repo_url = url.into();
        self.repo_branch = branch.into();
        self.repo_sub_folder = sub_folder.into();
        self
    }

    /// トークンを設定。空文字列はトークンなしとして扱う
    pub fn with_git_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.git_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `<cache>/solutions.yaml`
    pub fn solutions_file(&self) -> PathBuf {
        self.cache.join(SOLUTIONS_FILE_NAME)
    }

    /// `<cache>/<name>`
    pub fn solution_dir(&self, name: &str) -> PathBuf {
        self.cache.join(name)
    }

    /// 空でないトークン
    pub fn token(&self) -> Option<&str> {
        self.git_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn pull_timeout(&self) -> Duration {
        Duration::from_secs(self.pull_timeout_secs)
    }
}
