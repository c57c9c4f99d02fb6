pub mod solution_service;
