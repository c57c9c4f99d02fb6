pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use tracing::debug;

use crate::application::services::solution_service::SolutionService;
use crate::domain::entities::settings::{default_config_dir, Settings};
use crate::infrastructure::filesystem::ConfigStore;
use crate::presentation::ui::DisplayHelper;

use commands::{SolutionGetCommand, SolutionListCommand, VersionCommand};
use logging::LogControl;

/// Output format options for solution list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// arete - install infrastructure solutions published on GitHub
#[derive(Debug, Parser)]
#[command(name = "arete")]
#[command(about = "Fetch, cache and install infrastructure solutions published on GitHub")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration and cache directory (defaults to ~/.arete)
    #[arg(long, global = true, env = "ARETE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// GitHub token for private repositories
    #[arg(long, global = true, env = "ARETE_GIT_TOKEN", hide_env_values = true)]
    pub git_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show version and build information
    Version,

    /// Work with solutions
    Solution {
        #[command(subcommand)]
        command: SolutionCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum SolutionCommands {
    /// List the known solutions
    List {
        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Register a solution and pull it into the cache
    Get {
        /// Solution repository URL (https://github.com/<owner>/<repo>) or a known solution name
        target: String,

        /// Branch holding solution.yaml
        #[arg(short, long, default_value = "main")]
        branch: String,

        /// Folder holding solution.yaml ("/" means "base")
        #[arg(short, long, default_value = "/")]
        sub_folder: String,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    log_control: Option<LogControl>,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self {
            cli,
            log_control: None,
        }
    }

    /// Let `verbose: true` in config.yaml raise the log level
    pub fn with_log_control(mut self, log_control: LogControl) -> Self {
        self.log_control = Some(log_control);
        self
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        // Set up colored output
        colored::control::set_override(!self.cli.no_color);

        // Handle the command
        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Version => VersionCommand::new().execute(),
            Commands::Solution { command } => self.handle_solution_command(command).await,
        }
    }

    async fn handle_solution_command(&self, command: &SolutionCommands) -> anyhow::Result<()> {
        let service = SolutionService::from_settings(self.load_settings().await?)?;
        let display = DisplayHelper::new(!self.cli.no_color);

        match command {
            SolutionCommands::List { output } => {
                SolutionListCommand::new(*output)
                    .execute(&service, &display)
                    .await
            }
            SolutionCommands::Get {
                target,
                branch,
                sub_folder,
            } => {
                SolutionGetCommand::new(target.clone(), branch.clone(), sub_folder.clone())
                    .execute(&service, &display)
                    .await
            }
        }
    }

    /// Bootstrap the config directory and apply flag/environment overrides
    async fn load_settings(&self) -> anyhow::Result<Settings> {
        let config_dir = self
            .cli
            .config_dir
            .clone()
            .unwrap_or_else(default_config_dir);

        let mut settings = ConfigStore::new(config_dir).bootstrap().await?;

        if let Some(token) = &self.cli.git_token {
            settings = settings.with_git_token(token.clone());
        }
        if self.cli.verbose {
            settings = settings.with_verbose(true);
        } else if settings.verbose {
            if let Some(log_control) = &self.log_control {
                if log_control.enable_debug() {
                    debug!("verbose logging enabled by config.yaml");
                }
            }
        }

        debug!(
            cache = %settings.cache.display(),
            repo = %settings.repo_url,
            branch = %settings.repo_branch,
            sub_folder = %settings.repo_sub_folder,
            "settings loaded"
        );
        Ok(settings)
    }
}
