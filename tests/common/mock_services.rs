//! Mock services for testing
//!
//! In-memory implementations of the fetcher and package puller traits so the
//! solution service can be exercised without network access or kpt.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arete::common::error::AreteError;
use arete::common::result::AreteResult;
use arete::infrastructure::{PackagePuller, RawContentFetcher};

/// Fetcher serving canned bodies keyed by URL. Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct FakeFetcher {
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_response(self, url: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn get_call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl RawContentFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> AreteResult<String> {
        self.call_history.lock().unwrap().push(url.to_string());
        let body = self.responses.lock().unwrap().get(url).cloned();
        body.ok_or_else(|| AreteError::remote_not_found(url))
    }
}

/// Puller that records calls and writes a Kptfile into the destination
#[derive(Clone, Default)]
pub struct RecordingPuller {
    pulls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    fail_with_exit_code: Option<i32>,
}

impl RecordingPuller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every pull fail as if kpt exited with `code`
    pub fn failing(code: i32) -> Self {
        Self {
            fail_with_exit_code: Some(code),
            ..Self::default()
        }
    }

    pub fn pulls(&self) -> Vec<(String, PathBuf)> {
        self.pulls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackagePuller for RecordingPuller {
    async fn pull(&self, source_url: &str, dest: &Path) -> AreteResult<()> {
        self.pulls
            .lock()
            .unwrap()
            .push((source_url.to_string(), dest.to_path_buf()));

        if let Some(code) = self.fail_with_exit_code {
            return Err(AreteError::external_tool_error(
                format!("kpt pkg get exited with {}", code),
                format!("kpt pkg get {} {}", source_url, dest.display()),
                Some(code),
                "error: failed to clone repository",
            ));
        }

        std::fs::create_dir_all(dest)?;
        std::fs::write(dest.join("Kptfile"), format!("# pulled from {}\n", source_url))?;
        Ok(())
    }
}
