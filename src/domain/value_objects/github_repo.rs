use crate::common::error::AreteError;
use crate::common::result::AreteResult;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// raw.githubusercontent.comのホスト名
pub const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";

/// ブランチ未指定時のデフォルト
pub const DEFAULT_BRANCH: &str = "main";

/// サブフォルダに`/`が指定された場合に使われるディレクトリ名
pub const BASE_SUB_FOLDER: &str = "base";

fn github_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https://github\.com/([a-zA-Z0-9\-/]*)").unwrap())
}

/// GitHubリポジトリの値オブジェクト（`owner/repo`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitHubRepo {
    /// `owner/repo`形式のパス
    path: String,
}

impl GitHubRepo {
    /// `https://github.com/<owner>/<repo>`形式のURLを解析
    ///
    /// スキームとホストは大文字小文字を区別する。`.git`などパスの後ろに続く
    /// 文字は無視される。
    pub fn parse(url: &str) -> AreteResult<Self> {
        let path = github_url_regex()
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim_end_matches('/'))
            .ok_or_else(|| AreteError::malformed_url(url))?;

        match path.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                path: path.to_string(),
            }),
            _ => Err(AreteError::malformed_url(url)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "https://github.com/{}", self.path)
    }
}

/// サブフォルダの正規化
///
/// `/`（または空）は`base`、先頭と末尾のスラッシュは1つずつ取り除く。
pub fn normalize_sub_folder(sub_folder: &str) -> String {
    if sub_folder == "/" || sub_folder.is_empty() {
        return BASE_SUB_FOLDER.to_string();
    }

    let without_prefix = sub_folder.strip_prefix('/').unwrap_or(sub_folder);
    without_prefix
        .strip_suffix('/')
        .unwrap_or(without_prefix)
        .to_string()
}

/// リポジトリ内の1ファイルの位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileLocation {
    pub repo: GitHubRepo,
    pub branch: String,
    pub sub_folder: String,
    pub file_name: String,
}

impl RawFileLocation {
    /// 入力を検証・正規化してRawFileLocationを作成
    pub fn new(repo_url: &str, branch: &str, sub_folder: &str, file_name: &str) -> AreteResult<Self> {
        let repo = GitHubRepo::parse(repo_url)?;
        let branch = if branch.is_empty() {
            DEFAULT_BRANCH.to_string()
        } else {
            branch.to_string()
        };

        Ok(Self {
            repo,
            branch,
            sub_folder: normalize_sub_folder(sub_folder),
            file_name: file_name.to_string(),
        })
    }

    /// raw contentのURLを組み立てる
    ///
    /// トークンがあれば`https://<token>@raw.githubusercontent.com/...`の形で埋め込む。
    pub fn raw_url(&self, token: Option<&str>) -> String {
        let credentials = match token {
            Some(token) if !token.is_empty() => format!("{}@", token),
            _ => String::new(),
        };

        format!(
            "https://{}{}/{}/{}/{}/{}",
            credentials,
            RAW_CONTENT_HOST,
            self.repo.path(),
            self.branch,
            self.sub_folder,
            self.file_name
        )
    }
}

/// ログ出力用。トークンは含まない
impl fmt::Display for RawFileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_url(None))
    }
}
