//! Configuration sources, applied in precedence order by `ConfigLoader`.

pub mod global_file;
pub mod workspace_file;
