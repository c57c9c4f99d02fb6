pub mod settings;
pub mod solution;
pub mod solution_file;
