pub mod clip_repo;
pub mod error;
pub mod user_repo;
