//! CLI domain: parse, route, output, and presentation only.
//! No resolution logic; the route table dispatches to the resolver.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_candidates_json, format_candidates_text, format_value_map, format_value_maps,
    CandidateRow,
};
pub use route::RunContext;
