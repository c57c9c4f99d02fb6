pub mod github_repo;
