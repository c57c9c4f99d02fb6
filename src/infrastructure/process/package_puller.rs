use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

use crate::common::error::AreteError;
use crate::common::result::{async_helpers, AreteResult};

/// Materialize a package from a source URL into a local directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackagePuller: Send + Sync {
    /// Pull `source_url` into `dest`. `dest` must not exist yet.
    async fn pull(&self, source_url: &str, dest: &Path) -> AreteResult<()>;
}

/// Runs `kpt pkg get <source> <dest>`
#[derive(Debug, Clone)]
pub struct KptPackagePuller {
    kpt_executable: String,
    timeout: Duration,
    verbose: bool,
}

impl Default for KptPackagePuller {
    fn default() -> Self {
        Self {
            kpt_executable: "kpt".to_string(),
            timeout: Duration::from_secs(300),
            verbose: false,
        }
    }
}

impl KptPackagePuller {
    /// Use a custom kpt executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            kpt_executable: executable.into(),
            ..Self::default()
        }
    }

    /// Kill the child if it has not finished after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Log the tool output on success too
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!("{} {}", self.kpt_executable, args.join(" "))
    }

    async fn execute_kpt_command(&self, args: &[&str]) -> AreteResult<std::process::Output> {
        let command = self.command_line(args);

        let mut cmd = Command::new(&self.kpt_executable);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        async_helpers::with_timeout(command.clone(), self.timeout.as_secs(), async {
            cmd.output().await.map_err(|e| {
                AreteError::external_tool_error_with_source(
                    format!("Failed to run {}", self.kpt_executable),
                    command.clone(),
                    e,
                )
            })
        })
        .await
    }
}

#[async_trait]
impl PackagePuller for KptPackagePuller {
    async fn pull(&self, source_url: &str, dest: &Path) -> AreteResult<()> {
        let dest_str = dest.to_str().ok_or_else(|| {
            AreteError::validation_error(
                "dest",
                "destination path is not valid UTF-8",
                Some(dest.display().to_string()),
            )
        })?;

        let args = ["pkg", "get", source_url, dest_str];
        let output = self.execute_kpt_command(&args).await?;

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            error!(exit_code = ?output.status.code(), "{}", captured.trim_end());
            return Err(AreteError::external_tool_error(
                format!("{} pkg get exited with {}", self.kpt_executable, output.status),
                self.command_line(&args),
                output.status.code(),
                captured,
            ));
        }

        if self.verbose {
            debug!("{}", captured.trim_end());
        }

        Ok(())
    }
}
