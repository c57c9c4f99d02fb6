use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::common::result::AreteResult;
use crate::domain::entities::settings::{Settings, SOLUTIONS_FILE_NAME};
use crate::domain::entities::solution::{Solution, SolutionsList};
use crate::domain::entities::solution_file::{SolutionFile, SOLUTION_FILE_NAME};
use crate::domain::value_objects::github_repo::RawFileLocation;
use crate::infrastructure::filesystem::SolutionCache;
use crate::infrastructure::http::{HttpRawContentClient, RawContentFetcher};
use crate::infrastructure::process::{KptPackagePuller, PackagePuller};

/// ソリューションレジストリの同期とパッケージ取得を行うサービス
///
/// 設定・HTTP取得・パッケージ取得・キャッシュをまとめて保持し、
/// 各操作で同じ設定を参照する。
pub struct SolutionService {
    settings: Settings,
    fetcher: Arc<dyn RawContentFetcher>,
    puller: Arc<dyn PackagePuller>,
    cache: SolutionCache,
}

impl SolutionService {
    /// 任意のフェッチャーとプラーを指定して作成
    pub fn new(
        settings: Settings,
        fetcher: Arc<dyn RawContentFetcher>,
        puller: Arc<dyn PackagePuller>,
    ) -> Self {
        let cache = SolutionCache::new(settings.cache.clone());
        Self {
            settings,
            fetcher,
            puller,
            cache,
        }
    }

    /// 設定からHTTPクライアントとkptプラーを構築して作成
    pub fn from_settings(settings: Settings) -> AreteResult<Self> {
        let fetcher = HttpRawContentClient::new(settings.fetch_timeout())?;
        let puller = KptPackagePuller::with_executable(settings.kpt.clone())
            .with_timeout(settings.pull_timeout())
            .with_verbose(settings.verbose);

        Ok(Self::new(settings, Arc::new(fetcher), Arc::new(puller)))
    }

    pub fn cache(&self) -> &SolutionCache {
        &self.cache
    }

    /// GitHubリポジトリ内の1ファイルを取得する
    ///
    /// トークンが設定されていればURLに埋め込むが、ログには出力しない。
    pub async fn fetch_raw_file(
        &self,
        repo_url: &str,
        branch: &str,
        sub_folder: &str,
        file_name: &str,
    ) -> AreteResult<String> {
        let location = RawFileLocation::new(repo_url, branch, sub_folder, file_name)?;
        debug!(url = %location, "fetching raw file");

        self.fetcher
            .fetch_text(&location.raw_url(self.settings.token()))
            .await
    }

    /// コアソリューション一覧を取得し、キャッシュとマージして保存する
    ///
    /// 取得・解析・読み込みのいずれかが失敗した場合は何も書き込まない。
    pub async fn get_core_solutions(&self) -> AreteResult<SolutionsList> {
        let content = self
            .fetch_raw_file(
                &self.settings.repo_url,
                &self.settings.repo_branch,
                &self.settings.repo_sub_folder,
                SOLUTIONS_FILE_NAME,
            )
            .await?;

        let mut solutions = SolutionsList::from_yaml(&content)?;
        let cached = self.cache.load().await?;
        debug!(
            fetched = solutions.len(),
            cached = cached.len(),
            "merging core solutions with cache"
        );

        solutions.merge(&cached);
        self.cache.persist(&solutions).await?;

        Ok(solutions)
    }

    /// 既知のソリューション一覧
    pub async fn list_solutions(&self) -> AreteResult<SolutionsList> {
        self.get_core_solutions().await
    }

    /// リモートのsolution.yamlを取得してレジストリに追加する
    ///
    /// specが空の場合は何もせず`None`を返す。
    pub async fn get_remote_solution(
        &self,
        registry: &mut SolutionsList,
        url: &str,
        branch: &str,
        sub_folder: &str,
    ) -> AreteResult<Option<Solution>> {
        let content = self
            .fetch_raw_file(url, branch, sub_folder, SOLUTION_FILE_NAME)
            .await?;
        let manifest = SolutionFile::from_yaml(&content)?;

        if !manifest.has_expected_type() {
            warn!(
                api_version = %manifest.api_version,
                kind = %manifest.kind,
                "unexpected solution manifest type"
            );
        }

        if let Some(deploy) = manifest.deploy.as_ref().filter(|d| !d.is_empty()) {
            debug!(
                solution = %manifest.name(),
                iam_bindings = deploy.iam_bindings().len(),
                services = deploy.services().len(),
                dependencies = deploy.dependencies().len(),
                "solution declares deploy requirements"
            );
        }

        let solution = match manifest.to_solution() {
            Some(solution) => solution,
            None => {
                debug!(solution = %manifest.name(), "solution manifest has no spec");
                return Ok(None);
            }
        };
        Solution::validate_name(&solution.name)?;

        registry.insert(solution.clone());
        let cached = self.cache.load().await?;
        registry.merge(&cached);
        self.cache.persist(registry).await?;

        Ok(Some(solution))
    }

    /// リモートのソリューションをレジストリに追加し、キャッシュ配下に取得する
    ///
    /// 取得したディレクトリを返す。specが空の場合は`None`。
    /// パッケージ取得に失敗してもレジストリの更新は取り消さない。
    pub async fn get_solution(
        &self,
        registry: &mut SolutionsList,
        url: &str,
        branch: &str,
        sub_folder: &str,
    ) -> AreteResult<Option<PathBuf>> {
        let solution = match self
            .get_remote_solution(registry, url, branch, sub_folder)
            .await?
        {
            Some(solution) => solution,
            None => return Ok(None),
        };

        match self.pull_into_cache(&solution.name, &solution.url).await {
            Ok(dest) => Ok(Some(dest)),
            Err(e) => {
                warn!(
                    solution = %solution.name,
                    "solution registered but package pull failed"
                );
                Err(e)
            }
        }
    }

    /// レジストリに登録済みのソリューションを名前で取得する
    pub async fn get_solution_by_name(
        &self,
        registry: &SolutionsList,
        name: &str,
    ) -> AreteResult<PathBuf> {
        Solution::validate_name(name)?;
        let url = registry.find_url(name)?;
        self.pull_into_cache(name, url).await
    }

    async fn pull_into_cache(&self, name: &str, source_url: &str) -> AreteResult<PathBuf> {
        let dest = self.settings.solution_dir(name);

        if self.cache.clear_solution_dir(&dest).await? {
            debug!(path = %dest.display(), "removed previous solution directory");
        }

        info!(solution = %name, dest = %dest.display(), "pulling solution package");
        self.puller.pull(source_url, &dest).await?;

        Ok(dest)
    }
}
