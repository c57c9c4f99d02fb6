use anyhow::Result;

use crate::application::services::solution_service::SolutionService;
use crate::presentation::ui::DisplayHelper;

/// Handler for `solution get`
pub struct SolutionGetCommand {
    /// Repository URL or a solution name already in the registry
    pub target: String,
    pub branch: String,
    pub sub_folder: String,
}

impl SolutionGetCommand {
    pub fn new(target: String, branch: String, sub_folder: String) -> Self {
        Self {
            target,
            branch,
            sub_folder,
        }
    }

    /// Whether the target names a repository rather than a registry entry
    pub fn is_repository_url(&self) -> bool {
        self.target.starts_with("https://")
    }

    pub async fn execute(&self, service: &SolutionService, display: &DisplayHelper) -> Result<()> {
        let spinner = display.create_spinner("Fetching solutions...");
        let registry = service.get_core_solutions().await;
        spinner.finish_and_clear();
        let mut registry = registry?;

        let spinner = display.create_spinner(&format!("Getting {}...", self.target));
        let result = if self.is_repository_url() {
            service
                .get_solution(&mut registry, &self.target, &self.branch, &self.sub_folder)
                .await
        } else {
            service
                .get_solution_by_name(&registry, &self.target)
                .await
                .map(Some)
        };
        spinner.finish_and_clear();

        match result? {
            Some(dest) => display.success(&format!(
                "Solution pulled into {}",
                display.format_path(&dest.display().to_string())
            )),
            None => display.warning(&format!(
                "{} has no solution spec, nothing to get",
                display.format_url(&self.target)
            )),
        }

        Ok(())
    }
}
