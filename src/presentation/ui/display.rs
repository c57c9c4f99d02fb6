use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::domain::entities::solution::Solution;

/// Display utilities for the CLI interface
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "⚠".yellow().bold(), message);
        } else {
            println!("[WARNING] {}", message);
        }
    }

    /// Format a file path with appropriate styling
    pub fn format_path(&self, path: &str) -> String {
        if self.use_color {
            path.cyan().to_string()
        } else {
            format!("'{}'", path)
        }
    }

    /// Format a URL with appropriate styling
    pub fn format_url(&self, url: &str) -> String {
        if self.use_color {
            url.blue().underline().to_string()
        } else {
            url.to_string()
        }
    }

    /// Render one registry entry: the name, then the description indented below it
    pub fn format_solution(&self, solution: &Solution) -> String {
        let name = if self.use_color {
            solution.name.bold().to_string()
        } else {
            solution.name.clone()
        };

        if solution.description.is_empty() {
            name
        } else {
            format!("{}\n  {}", name, solution.description)
        }
    }

    /// Create a spinner for indeterminate operations
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = if self.use_color {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        };

        if self.use_color {
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"])
                .template("{spinner:.green} {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(120));
        }

        pb
    }
}
