//! Application layer of the ratings context.

pub mod command_handlers;
pub mod query_handlers;
