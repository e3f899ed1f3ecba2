//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; the route table dispatches to `WingmanApi`.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_captures, format_config_validation, format_description, format_follow_up,
    format_problem, format_solution,
};
pub use route::RunContext;
