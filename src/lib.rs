//! # arete - Solution registry for kpt packages
//!
//! `arete` keeps a local registry of infrastructure "solutions" published in
//! GitHub repositories and installs them with `kpt pkg get`.
//!
//! ## Features
//!
//! - **Core solutions**: Fetch the curated `solutions.yaml` from a configurable repository
//! - **Local cache**: Merge remote entries into `~/.arete/solutions.yaml` without losing local ones
//! - **Remote solutions**: Register any repository carrying a `solution.yaml` manifest
//! - **Installation**: Materialize a solution under the cache directory with kpt
//!
//! ## Quick Start
//!
//! ```bash
//! arete solution list
//! arete solution get https://github.com/acme/gke --branch main --sub-folder /
//! arete solution get landing-zone
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Registry entries, manifests, settings and GitHub locations
//! - [`application`]: The solution service tying fetch, merge, persist and pull together
//! - [`infrastructure`]: HTTP, file system and process access
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Shared utilities and error handling
//!
//! ## Error Handling
//!
//! - [`common::error::AreteError`]: Main error type with detailed context
//! - [`common::result::AreteResult`]: Type alias for `Result<T, AreteError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use arete::application::services::solution_service::SolutionService;
//! use arete::infrastructure::ConfigStore;
//! use arete::domain::entities::settings::default_config_dir;
//!
//! # async fn example() -> arete::Result<()> {
//! let settings = ConfigStore::new(default_config_dir()).bootstrap().await?;
//! let service = SolutionService::from_settings(settings)?;
//!
//! let solutions = service.list_solutions().await?;
//! for solution in &solutions {
//!     println!("{} -> {}", solution.name, solution.url);
//! }
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::AreteError;
pub use crate::common::result::AreteResult as Result;
