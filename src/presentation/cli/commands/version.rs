use anyhow::Result;

/// Handler for the version command
pub struct VersionCommand;

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self) -> Result<()> {
        println!("{}", self.version_line());
        Ok(())
    }

    /// `arete <version> (<git hash> <build date>) <target>`
    pub fn version_line(&self) -> String {
        format!(
            "arete {} ({} {}) {}",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH"),
            env!("BUILD_DATE"),
            env!("BUILD_TARGET"),
        )
    }
}
