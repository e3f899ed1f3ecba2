//! CLI presentation: text and json formatters per command family.

mod analysis;
mod captures;
mod config;
mod shared;

pub use analysis::{format_description, format_follow_up, format_problem, format_solution};
pub use captures::format_captures;
pub use config::format_config_validation;
