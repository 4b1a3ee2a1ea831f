//! Policy document parsing and input validation (pure Rust)

pub mod policy;
pub mod project;

pub use policy::parse_policy;
pub use project::validate_project_id;
