pub mod loader;
pub mod seed;

pub use loader::{LoadOutcome, LoadSource, resolve_initial};
pub use seed::sample_courses;
