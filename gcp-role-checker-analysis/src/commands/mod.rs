//! Commands module - service layer for role checker operations

mod check;
pub(crate) mod service;
mod used_services;

pub use check::{analyze, ProjectReport};
pub use service::RoleCheckerService;
pub use used_services::{collect_used_services, TimeWindow};
