pub mod config_store;
pub mod solution_cache;

pub use config_store::ConfigStore;
pub use solution_cache::SolutionCache;
