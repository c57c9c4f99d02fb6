pub mod solution_get;
pub mod solution_list;
pub mod version;

pub use solution_get::*;
pub use solution_list::*;
pub use version::*;
