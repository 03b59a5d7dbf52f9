//! CLI domain: parse, route and output only. Commands go through a single
//! route table onto the session and store APIs.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::RunContext;
