use crate::common::error::AreteError;
use std::path::PathBuf;

/// arete全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use arete::common::result::AreteResult;
/// use arete::common::error::AreteError;
///
/// fn example_function() -> AreteResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> AreteResult<()> {
///     Err(AreteError::solution_not_found("missing"))
/// }
/// ```
pub type AreteResult<T> = Result<T, AreteError>;

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// キャッシュのIOエラーとしてAreteResultに変換
    fn with_cache_error(self, message: impl Into<String>, path: &std::path::Path)
        -> AreteResult<T>
    where
        E: Into<std::io::Error>;

    /// 設定エラーとしてAreteResultに変換
    fn with_config_error(self, message: impl Into<String>, path: Option<PathBuf>) -> AreteResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_cache_error(
        self,
        message: impl Into<String>,
        path: &std::path::Path,
    ) -> AreteResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            AreteError::cache_io_error_with_source(message, Some(path.to_path_buf()), e.into())
        })
    }

    fn with_config_error(self, message: impl Into<String>, path: Option<PathBuf>) -> AreteResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| AreteError::config_error_with_source(message, path, e))
    }
}

/// async関数用のヘルパー
pub mod async_helpers {
    use super::{AreteError, AreteResult};
    use std::future::Future;

    /// タイムアウト付きasync実行
    pub async fn with_timeout<F, T>(
        operation: impl Into<String>,
        timeout_secs: u64,
        f: F,
    ) -> AreteResult<T>
    where
        F: Future<Output = AreteResult<T>>,
    {
        let timeout_duration = std::time::Duration::from_secs(timeout_secs);

        match tokio::time::timeout(timeout_duration, f).await {
            Ok(result) => result,
            Err(_) => Err(AreteError::timeout(operation, timeout_secs)),
        }
    }
}
