use anyhow::Result;

use crate::application::services::solution_service::SolutionService;
use crate::domain::entities::solution::SolutionsList;
use crate::presentation::cli::OutputFormat;
use crate::presentation::ui::DisplayHelper;

/// Handler for `solution list`
pub struct SolutionListCommand {
    pub output: OutputFormat,
}

impl SolutionListCommand {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    pub async fn execute(&self, service: &SolutionService, display: &DisplayHelper) -> Result<()> {
        let spinner = display.create_spinner("Fetching solutions...");
        let result = service.list_solutions().await;
        spinner.finish_and_clear();

        let solutions = result?;
        print!("{}", self.render(&solutions, display)?);
        Ok(())
    }

    /// Render the registry in the selected output format
    pub fn render(&self, solutions: &SolutionsList, display: &DisplayHelper) -> Result<String> {
        let rendered = match self.output {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(solutions)?),
            OutputFormat::Yaml => solutions.to_yaml()?,
            OutputFormat::Text => {
                if solutions.is_empty() {
                    "No solutions found\n".to_string()
                } else {
                    solutions
                        .iter()
                        .map(|s| format!("{}\n", display.format_solution(s)))
                        .collect()
                }
            }
        };
        Ok(rendered)
    }
}
