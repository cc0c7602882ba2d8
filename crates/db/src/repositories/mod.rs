//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod retro_repo;
pub mod session_repo;
pub mod sprint_repo;
pub mod trail_repo;
pub mod user_repo;

pub use retro_repo::RetroRepo;
pub use session_repo::SessionRepo;
pub use sprint_repo::SprintRepo;
pub use trail_repo::TrailRepo;
pub use user_repo::UserRepo;
