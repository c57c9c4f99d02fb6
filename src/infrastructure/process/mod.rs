pub mod package_puller;

pub use package_puller::{KptPackagePuller, PackagePuller};
