/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - HTTP access to raw GitHub content
/// - File system operations (config file, solutions cache)
/// - Process execution (kpt package puller)
pub mod filesystem;
pub mod http;
pub mod process;

// Re-export commonly used types
pub use filesystem::{config_store::ConfigStore, solution_cache::SolutionCache};
pub use http::{HttpRawContentClient, RawContentFetcher};
pub use process::{KptPackagePuller, PackagePuller};
